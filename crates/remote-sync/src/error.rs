//! Error types for the remote sync client.

use thiserror::Error;

/// Result type alias for remote sync operations.
pub type Result<T> = std::result::Result<T, RemoteSyncError>;

/// Errors that can occur while talking to the remote endpoint.
#[derive(Debug, Error)]
pub enum RemoteSyncError {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Non-success response from the remote endpoint
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
}

impl RemoteSyncError {
    /// Create an API error from status and message
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }
}

impl From<RemoteSyncError> for quotebook_core::Error {
    fn from(err: RemoteSyncError) -> Self {
        quotebook_core::Error::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_becomes_transport() {
        let err: quotebook_core::Error = RemoteSyncError::api(503, "down").into();
        match err {
            quotebook_core::Error::Transport(msg) => assert_eq!(msg, "API error (503): down"),
            other => panic!("unexpected error: {other:?}"),
        }

        let json_err = serde_json::from_str::<u8>("x").unwrap_err();
        let err: quotebook_core::Error = RemoteSyncError::from(json_err).into();
        assert!(matches!(err, quotebook_core::Error::Transport(_)));
    }
}
