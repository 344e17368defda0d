//! Response bodies

use serde::Serialize;

/// Full health status
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "healthy", or "degraded" when the data directory is missing
    pub status: String,
    /// Whether a monthly data file has been published
    pub data_configured: bool,
    pub uptime_seconds: u64,
    pub version: String,
}

/// Metadata of the published data file
#[derive(Debug, Serialize)]
pub struct MetadataResponse {
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheet: Option<String>,
    pub fetched_at: String,
    /// Row count claimed by the file
    pub row_count: u64,
    /// Rows actually present
    pub rows: usize,
    /// Human-readable age, e.g. "3 hours ago"
    pub age: String,
    /// Field names seen across all rows
    pub fields: Vec<String>,
}
