//! Health Routes
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (data directory readable)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::server::dto::HealthResponse;
use crate::server::state::AppState;

/// GET /health/live
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Ready once the data directory exists. A missing data file is not a
/// readiness problem; the dashboard shows its setup guide instead.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    if data_dir_ok(&state).await {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /health
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let dir_ok = data_dir_ok(&state).await;
    let configured = data_configured(&state).await;

    Json(HealthResponse {
        status: if dir_ok { "healthy" } else { "degraded" }.to_string(),
        data_configured: configured,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn data_dir_ok(state: &AppState) -> bool {
    tokio::fs::metadata(state.data_dir())
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false)
}

async fn data_configured(state: &AppState) -> bool {
    state.loader.has_file(state.monthly_file()).await
}
