//! Data loading error types
//!
//! These are genuine faults. The not-yet-configured state is not an error:
//! the loader's tolerant entry points turn every `DataError` into "absent".

use thiserror::Error;

/// Errors that can occur while fetching or decoding a data file
#[derive(Error, Debug)]
pub enum DataError {
    /// Transport failed (connection refused, timeout, unreadable file)
    #[error("Fetch failed for {path}: {message}")]
    Fetch { path: String, message: String },

    /// Resource answered with a non-success status
    #[error("Failed to load data file {path}: status {status}")]
    Status { path: String, status: u16 },

    /// Body was not a valid data envelope
    #[error("Malformed data file {path}: {message}")]
    Malformed { path: String, message: String },
}

impl DataError {
    pub fn fetch(path: impl Into<String>, error: impl std::fmt::Display) -> Self {
        DataError::Fetch {
            path: path.into(),
            message: error.to_string(),
        }
    }

    /// True when the resource simply does not exist yet
    pub fn is_not_found(&self) -> bool {
        matches!(self, DataError::Status { status: 404, .. })
    }
}

/// Result type alias for data operations
pub type DataResult<T> = Result<T, DataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DataError::Status {
            path: "/data/monthly_data.json".to_string(),
            status: 404,
        };
        assert_eq!(
            err.to_string(),
            "Failed to load data file /data/monthly_data.json: status 404"
        );
        assert!(err.is_not_found());

        let err = DataError::fetch("/data/x.json", "connection refused");
        assert_eq!(err.to_string(), "Fetch failed for /data/x.json: connection refused");
        assert!(!err.is_not_found());
    }
}
