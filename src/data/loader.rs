//! Data Loader
//!
//! Fetches JSON data files published under the data base path. A missing or
//! unreadable file is the expected "not configured yet" state of a freshly
//! forked dashboard, so the tolerant entry points return `None`/`false`
//! instead of an error and log at info level.

use serde::de::DeserializeOwned;

use super::error::{DataError, DataResult};
use super::fetch::Fetch;
use super::types::{DataFile, MonthlyDataRow};

/// Base path of data files, relative to the served static root
pub const DATA_BASE_PATH: &str = "/data";

/// Well-known monthly data file
pub const MONTHLY_DATA_FILE: &str = "monthly_data.json";

/// Loads data files through a [`Fetch`] implementation
pub struct DataLoader<F> {
    fetcher: F,
    base_path: String,
}

impl<F: Fetch> DataLoader<F> {
    /// Create a loader reading from [`DATA_BASE_PATH`]
    pub fn new(fetcher: F) -> Self {
        Self::with_base_path(fetcher, DATA_BASE_PATH)
    }

    /// Create a loader reading from a custom base path
    pub fn with_base_path(fetcher: F, base_path: impl Into<String>) -> Self {
        let base_path = base_path.into();
        Self {
            fetcher,
            base_path: base_path.trim_end_matches('/').to_string(),
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Resource path of a data file
    pub fn path_for(&self, filename: &str) -> String {
        format!("{}/{}", self.base_path, filename.trim_start_matches('/'))
    }

    /// Fetch and decode a data file.
    ///
    /// The body is decoded straight into `DataFile<R>`; beyond what the row
    /// type itself demands there is no structural validation. A row count
    /// that disagrees with the rows is logged, not rejected.
    pub async fn load_data_file<R: DeserializeOwned>(&self, filename: &str) -> DataResult<DataFile<R>> {
        let path = self.path_for(filename);
        let response = self.fetcher.get(&path).await?;

        if !response.is_success() {
            return Err(DataError::Status {
                path,
                status: response.status,
            });
        }

        let file: DataFile<R> = serde_json::from_slice(&response.body).map_err(|e| DataError::Malformed {
            path: path.clone(),
            message: e.to_string(),
        })?;

        if let Some((claimed, actual)) = file.row_count_mismatch() {
            tracing::warn!(path = %path, claimed, actual, "Data file row_count does not match its rows");
        }

        tracing::debug!(path = %path, rows = file.len(), "Loaded data file");
        Ok(file)
    }

    /// Load a data file, treating any failure as "not configured"
    pub async fn load_optional<R: DeserializeOwned>(&self, filename: &str) -> Option<DataFile<R>> {
        match self.load_data_file(filename).await {
            Ok(file) => Some(file),
            Err(e) => {
                tracing::info!(error = %e, "No {} found. Configure data source first.", filename);
                None
            }
        }
    }

    /// Load monthly data. Returns `None` if the file doesn't exist yet.
    pub async fn load_monthly_data(&self) -> Option<DataFile<MonthlyDataRow>> {
        self.load_optional(MONTHLY_DATA_FILE).await
    }

    /// Check whether the monthly data file exists
    pub async fn has_data_configured(&self) -> bool {
        self.has_file(MONTHLY_DATA_FILE).await
    }

    /// Existence probe for any data file; probe failures read as absent
    pub async fn has_file(&self, filename: &str) -> bool {
        let path = self.path_for(filename);
        match self.fetcher.head(&path).await {
            Ok(status) => (200..300).contains(&status),
            Err(e) => {
                tracing::debug!(path = %path, error = %e, "Existence probe failed");
                false
            }
        }
    }
}
