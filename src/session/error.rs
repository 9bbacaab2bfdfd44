//! Session error types

use std::time::Duration;
use thiserror::Error;
use tokio_tungstenite::tungstenite;

/// Why a session ended abnormally.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Failed to connect to {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: tungstenite::Error,
    },

    #[error("Timed out after {}s connecting to {url}", timeout.as_secs())]
    ConnectTimeout { url: String, timeout: Duration },

    #[error("Transport error: {0}")]
    Transport(#[from] tungstenite::Error),

    #[error("Session task failed: {0}")]
    Task(String),
}

/// Whether a transport error ends the session.
///
/// Invalid UTF-8 in one text frame, an oversized frame or a full write
/// buffer affect a single message; everything else means the connection is
/// gone or unusable.
pub fn is_terminal(error: &tungstenite::Error) -> bool {
    !matches!(
        error,
        tungstenite::Error::Utf8
            | tungstenite::Error::Capacity(_)
            | tungstenite::Error::WriteBufferFull(_)
    )
}
