//! Error types for frame decoding and command encoding.

use serde_json::error::Category;
use thiserror::Error;

/// Errors raised while translating between wire frames and typed messages.
#[derive(Debug, Error)]
pub enum WireError {
    /// Frame payload is not valid UTF-8
    #[error("frame is not valid UTF-8")]
    InvalidUtf8,

    /// Frame is not a JSON document
    #[error("frame is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// Frame is JSON but does not match the expected schema
    #[error("frame does not match the schema: {0}")]
    Schema(#[source] serde_json::Error),

    /// Command could not be serialised
    #[error("failed to encode command: {0}")]
    Encode(#[source] serde_json::Error),
}

impl WireError {
    /// Sort a decode failure into syntax or schema errors.
    pub(crate) fn from_decode(err: serde_json::Error) -> Self {
        match err.classify() {
            Category::Syntax | Category::Eof | Category::Io => Self::InvalidJson(err),
            Category::Data => Self::Schema(err),
        }
    }

    /// Short machine-friendly label used as a metrics/log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidUtf8 => "invalid_utf8",
            Self::InvalidJson(_) => "invalid_json",
            Self::Schema(_) => "schema",
            Self::Encode(_) => "encode",
        }
    }
}
