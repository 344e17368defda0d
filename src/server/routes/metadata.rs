//! Metadata Route
//!
//! - GET /api/v1/metadata - Metadata of the published data file

use axum::{extract::State, Json};
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::data::{data_age, field_names, DataFile};
use crate::server::dto::MetadataResponse;
use crate::server::error::{ApiError, ApiResult};
use crate::server::state::AppState;

/// GET /api/v1/metadata
///
/// 404 `NOT_CONFIGURED` until the data file exists.
pub async fn get_metadata(State(state): State<Arc<AppState>>) -> ApiResult<Json<MetadataResponse>> {
    let file_name = state.monthly_file();
    let file: DataFile<Map<String, Value>> = match state.loader.load_data_file(file_name).await {
        Ok(file) => file,
        Err(e) if e.is_not_found() => return Err(ApiError::NotConfigured(file_name.to_string())),
        Err(e) => return Err(e.into()),
    };

    let metadata = &file.metadata;
    Ok(Json(MetadataResponse {
        source: metadata.source.clone(),
        sheet: metadata.sheet.clone(),
        fetched_at: metadata.fetched_at.clone(),
        row_count: metadata.row_count,
        rows: file.len(),
        age: data_age(&metadata.fetched_at),
        fields: field_names(&file.data),
    }))
}
