//! services/api/src/error.rs
//!
//! Defines the primary error type for the entire API service, and the mapping
//! from core port errors to HTTP responses.

use crate::config::ConfigError;
use axum::http::StatusCode;
use learnhub_core::ports::PortError;
use tracing::{error, warn};

/// The primary error type for the `api` service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The OpenAPI document could not be rendered.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The status code a port error is reported with.
pub fn status_for(e: &PortError) -> StatusCode {
    match e {
        PortError::NotFound(_) => StatusCode::NOT_FOUND,
        PortError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        PortError::Unauthorized => StatusCode::UNAUTHORIZED,
        PortError::MalformedSource(_) | PortError::Unexpected(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Converts a port error into the `(StatusCode, String)` pair handlers return.
pub fn into_http(e: PortError) -> (StatusCode, String) {
    let status = status_for(&e);
    if status.is_server_error() {
        error!("Request failed: {:?}", e);
        (status, "Internal server error".to_string())
    } else {
        warn!("Request rejected: {}", e);
        (status, e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use learnhub_core::ports::FieldError;

    #[test]
    fn client_errors_keep_their_message() {
        let (status, body) = into_http(PortError::Validation(vec![FieldError::new(
            "phone",
            "Phone number is required",
        )]));
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body.contains("phone: Phone number is required"));

        let (status, _) = into_http(PortError::NotFound("course '9'".to_string()));
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn server_errors_hide_details() {
        let (status, body) = into_http(PortError::Unexpected("disk on fire".to_string()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.contains("disk"));
    }
}
