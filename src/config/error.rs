//! Errors raised while loading `odyssey.toml`

use std::path::PathBuf;
use thiserror::Error;

/// Why the dashboard could not build its configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// `--config` named a file that does not exist
    #[error("Config file not found: {0} (run `odyssey config init` to create one)")]
    NotFound(PathBuf),

    #[error("Could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML syntax error or a value of the wrong type
    #[error("{path} is not a valid dashboard config: {message}")]
    Parse { path: PathBuf, message: String },

    /// A setting parsed but cannot be used, named by its dotted key
    #[error("Invalid value for '{field}': {message}")]
    Validation { field: String, message: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        ConfigError::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Dotted key of the offending setting, for validation failures.
    pub fn field(&self) -> Option<&str> {
        match self {
            ConfigError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}
