//! Error types for the cache adapters
//!
//! Provides unified error handling using thiserror.
//!
//! Cache misses are never errors: `has` returns `false` and `get` returns the
//! caller's default. Only configuration, capability and write-path I/O
//! failures surface as a [`CacheError`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for adapters, the factory and the HTTP front-end.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Adapter `type` missing from the configuration or not registered
    #[error("Unsupported adapter: {0}")]
    UnsupportedAdapter(String),

    /// A field an adapter needs is missing or malformed
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The runtime capability a backend depends on is not available
    #[error("Unsupported backend: {0}")]
    UnsupportedBackend(String),

    /// Disk or network failure while writing to the backing store
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    /// Key not found in cache (HTTP layer only)
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Invalid request data (HTTP layer only)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl CacheError {
    /// Returns true for errors caused by the cache configuration itself.
    ///
    /// These should stop application startup rather than be retried.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            CacheError::UnsupportedAdapter(_) | CacheError::Configuration(_)
        )
    }
}

impl From<std::io::Error> for CacheError {
    fn from(err: std::io::Error) -> Self {
        CacheError::BackendUnavailable(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            CacheError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            CacheError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            CacheError::BackendUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            CacheError::UnsupportedAdapter(_)
            | CacheError::Configuration(_)
            | CacheError::UnsupportedBackend(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_errors_are_flagged() {
        assert!(CacheError::UnsupportedAdapter("bogus".into()).is_configuration());
        assert!(CacheError::Configuration("path".into()).is_configuration());
        assert!(!CacheError::UnsupportedBackend("memcache".into()).is_configuration());
        assert!(!CacheError::BackendUnavailable("disk".into()).is_configuration());
    }

    #[test]
    fn test_io_error_maps_to_backend_unavailable() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: CacheError = io.into();
        assert!(matches!(err, CacheError::BackendUnavailable(_)));
    }

    #[test]
    fn test_response_status_codes() {
        let cases = [
            (CacheError::NotFound("k".into()), StatusCode::NOT_FOUND),
            (CacheError::InvalidRequest("k".into()), StatusCode::BAD_REQUEST),
            (
                CacheError::BackendUnavailable("down".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                CacheError::Configuration("seconds".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
