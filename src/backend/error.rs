//! Typed errors for backend operations
//!
//! The controller collapses every failure into one user notification, but
//! adapters still classify failures so logs and future callers can tell an
//! expired token from a flaky network.

use thiserror::Error;

/// Backend operation errors with typed variants
#[derive(Debug, Error)]
pub enum BackendError {
    /// Authentication token is expired or invalid (HTTP 401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Rate limit exceeded (HTTP 429)
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Malformed request (HTTP 400); should not retry
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Server-side error (HTTP 5xx)
    #[error("Service error: {0}")]
    ServiceError(String),

    /// Network connectivity issue (connection refused, timeout, etc.)
    #[error("Network error: {0}")]
    Network(String),

    /// The service replied but the payload was not in the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Other errors not fitting the above categories
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl BackendError {
    /// Check if this error is transient (a later identical call may succeed)
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            BackendError::Unauthorized(_)
                | BackendError::RateLimited(_)
                | BackendError::ServiceError(_)
                | BackendError::Network(_)
        )
    }

    /// Convert HTTP status code and error text into a typed BackendError
    pub fn from_http_status(status: reqwest::StatusCode, error_text: String) -> Self {
        match status.as_u16() {
            401 => BackendError::Unauthorized(error_text),
            429 => BackendError::RateLimited(error_text),
            400 => BackendError::BadRequest(error_text),
            500..=599 => BackendError::ServiceError(error_text),
            _ => BackendError::Other(anyhow::anyhow!("HTTP {}: {}", status, error_text)),
        }
    }

    /// Convert network/connection errors into a typed BackendError
    pub fn from_network_error(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            BackendError::Network(format!("Request timeout: {}", e))
        } else if e.is_connect() {
            BackendError::Network(format!("Connection failed: {}", e))
        } else if let Some(status) = e.status() {
            Self::from_http_status(status, e.to_string())
        } else {
            BackendError::Other(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(BackendError::RateLimited("quota".into()).is_retryable());
        assert!(BackendError::Network("refused".into()).is_retryable());
        assert!(!BackendError::BadRequest("bad arg".into()).is_retryable());
        assert!(!BackendError::MalformedResponse("no text".into()).is_retryable());
    }

    #[test]
    fn test_from_http_status() {
        let err = BackendError::from_http_status(
            reqwest::StatusCode::UNAUTHORIZED,
            "invalid token".to_string(),
        );
        assert!(matches!(err, BackendError::Unauthorized(_)));

        let err = BackendError::from_http_status(
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            "boom".to_string(),
        );
        assert!(matches!(err, BackendError::ServiceError(_)));
    }

    #[test]
    fn test_error_display() {
        let err = BackendError::Unauthorized("token expired".to_string());
        assert_eq!(err.to_string(), "Unauthorized: token expired");
    }
}
