//! Client errors.
//!
//! Errors here are hard failures: misuse caught before any request is sent,
//! or a request that never completed. A service that answers "no" is not an
//! error; see [`TriggerOutcome`](crate::TriggerOutcome).

use pushko_core::{ConfigurationError, ValidationError};
use pushko_protocol::SignatureError;
use pushko_transport::TransportError;
use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, PushkoError>;

/// Client errors.
#[derive(Debug, Error)]
pub enum PushkoError {
    /// Credentials or profile are incomplete.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// A channel name, socket id, or channel count was rejected.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The transport could not be created.
    #[error("Transport unavailable: {0}")]
    TransportUnavailable(String),

    /// The request could not be completed.
    #[error("Transport error: {0}")]
    Transport(TransportError),

    /// The request could not be signed.
    #[error("Signing error: {0}")]
    Signature(#[from] SignatureError),

    /// A payload could not be encoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A successful response carried a body that could not be understood.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<TransportError> for PushkoError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Unavailable(reason) => PushkoError::TransportUnavailable(reason),
            other => PushkoError::Transport(other),
        }
    }
}

impl PushkoError {
    /// Whether the error was raised before any network activity.
    #[must_use]
    pub fn is_preflight(&self) -> bool {
        matches!(
            self,
            PushkoError::Configuration(_) | PushkoError::Validation(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_mapping() {
        let unavailable: PushkoError = TransportError::Unavailable("no tls".into()).into();
        assert!(matches!(unavailable, PushkoError::TransportUnavailable(_)));

        let timeout: PushkoError = TransportError::Timeout.into();
        assert!(matches!(timeout, PushkoError::Transport(TransportError::Timeout)));
        assert!(!timeout.is_preflight());
    }

    #[test]
    fn test_validation_is_preflight() {
        let err: PushkoError = ValidationError::InvalidSocketId("x".into()).into();
        assert!(err.is_preflight());
        assert_eq!(err.to_string(), "Validation error: Invalid socket id: \"x\"");
    }
}
