//! # Error Types
//!
//! Typed error handling for the payrexx-rs SDK.
//! All API operations return `Result<T, PayrexxError>`.

use thiserror::Error;

/// Failure of the underlying HTTP exchange.
///
/// Produced by a [`Transport`](crate::transport::Transport) or by the API
/// client when the remote service answers with a non-2xx status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Connection, DNS, TLS or body read failure
    #[error("Network error: {0}")]
    Network(String),

    /// The transport gave up waiting for the remote service
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The remote service answered with a non-2xx status
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

/// Core error type for all SDK operations
#[derive(Debug, Error)]
pub enum PayrexxError {
    /// Configuration errors (missing credentials, invalid base URL)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Request rejected locally before any network call
    #[error("Validation error: {0}")]
    Validation(String),

    /// HTTP call failed or returned a non-2xx status
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// HTTP call succeeded but the body does not have the expected shape
    #[error("Protocol mismatch: {0}")]
    ProtocolMismatch(String),

    /// The service answered 2xx but reported `status: "error"` in its envelope
    #[error("Payrexx API error: {message}")]
    Api { message: String },

    /// Request parameters could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PayrexxError {
    /// Returns true if repeating the same call may succeed.
    ///
    /// The SDK never retries on its own; this is for callers that do.
    pub fn is_retryable(&self) -> bool {
        match self {
            PayrexxError::Transport(TransportError::Network(_))
            | PayrexxError::Transport(TransportError::Timeout(_)) => true,
            PayrexxError::Transport(TransportError::Status { status, .. }) => {
                *status == 429 || *status >= 500
            }
            _ => false,
        }
    }

    /// Returns true for local request validation failures
    pub fn is_validation(&self) -> bool {
        matches!(self, PayrexxError::Validation(_))
    }

    /// Returns true when the remote service broke the response contract
    pub fn is_protocol_mismatch(&self) -> bool {
        matches!(self, PayrexxError::ProtocolMismatch(_))
    }

    /// HTTP status of a rejected call, if the error carries one
    pub fn http_status(&self) -> Option<u16> {
        match self {
            PayrexxError::Transport(TransportError::Status { status, .. }) => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias for SDK operations
pub type PayrexxResult<T> = Result<T, PayrexxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(PayrexxError::from(TransportError::Network("reset".into())).is_retryable());
        assert!(PayrexxError::from(TransportError::Timeout("30s".into())).is_retryable());
        assert!(PayrexxError::from(TransportError::Status {
            status: 503,
            body: String::new()
        })
        .is_retryable());
        assert!(PayrexxError::from(TransportError::Status {
            status: 429,
            body: String::new()
        })
        .is_retryable());

        assert!(!PayrexxError::from(TransportError::Status {
            status: 404,
            body: String::new()
        })
        .is_retryable());
        assert!(!PayrexxError::Validation("Amount required".into()).is_retryable());
        assert!(!PayrexxError::ProtocolMismatch("empty data".into()).is_retryable());
    }

    #[test]
    fn test_error_kinds() {
        assert!(PayrexxError::Validation("x".into()).is_validation());
        assert!(PayrexxError::ProtocolMismatch("x".into()).is_protocol_mismatch());
        assert!(!PayrexxError::Api {
            message: "x".into()
        }
        .is_protocol_mismatch());
    }

    #[test]
    fn test_transport_error_is_transparent() {
        let err = PayrexxError::from(TransportError::Status {
            status: 401,
            body: "unauthorized".into(),
        });
        assert_eq!(err.to_string(), "HTTP 401: unauthorized");
        assert_eq!(err.http_status(), Some(401));
        assert_eq!(PayrexxError::Validation("x".into()).http_status(), None);
    }
}
