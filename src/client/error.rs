//! Simulator HTTP client errors

use thiserror::Error;

/// Errors from one-shot requests to the simulator's HTTP endpoints.
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Build(String),

    /// Request timeout
    #[error("request timeout after {0}s")]
    Timeout(u64),

    /// Connection failed
    #[error("connection failed: {0}")]
    Network(String),

    /// Non-2xx response
    #[error("HTTP error: {status}")]
    Http { status: u16 },

    /// Body was not the expected JSON
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// Classify a reqwest error.
    pub(crate) fn from_reqwest(e: reqwest::Error, timeout_seconds: u64) -> Self {
        if e.is_timeout() {
            ClientError::Timeout(timeout_seconds)
        } else {
            ClientError::Network(e.to_string())
        }
    }
}
