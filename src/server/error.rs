//! Server Error Types
//!
//! Error types for the HTTP layer and their conversion to JSON responses
//! with appropriate status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::data::DataError;

/// Server error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// No data file has been published yet
    #[error("Not configured: {0}")]
    NotConfigured(String),

    /// Reading or decoding a data file failed
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
    pub request_id: String,
}

/// Error details
#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::NotConfigured(_) => (StatusCode::NOT_FOUND, "NOT_CONFIGURED"),
            ApiError::Data(DataError::Malformed { .. }) => (StatusCode::UNPROCESSABLE_ENTITY, "MALFORMED_DATA"),
            ApiError::Data(_) => (StatusCode::BAD_GATEWAY, "DATA_ERROR"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let request_id = uuid::Uuid::new_v4().to_string();

        // Absence is expected until the pipeline has run
        if matches!(self, ApiError::NotConfigured(_)) {
            tracing::debug!(request_id = %request_id, "{}", self);
        } else {
            tracing::error!(
                request_id = %request_id,
                error_code = %code,
                error_message = %self,
                "API error occurred"
            );
        }

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: self.to_string(),
            },
            request_id,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for server handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let not_configured = ApiError::NotConfigured("monthly_data.json".into());
        assert_eq!(not_configured.status_and_code(), (StatusCode::NOT_FOUND, "NOT_CONFIGURED"));

        let malformed = ApiError::from(DataError::Malformed {
            path: "/monthly_data.json".into(),
            message: "expected value".into(),
        });
        assert_eq!(malformed.status_and_code().0, StatusCode::UNPROCESSABLE_ENTITY);

        let fetch = ApiError::from(DataError::fetch("/monthly_data.json", "denied"));
        assert_eq!(fetch.status_and_code(), (StatusCode::BAD_GATEWAY, "DATA_ERROR"));
    }

    #[test]
    fn test_response_status() {
        let response = ApiError::Internal("boom".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
