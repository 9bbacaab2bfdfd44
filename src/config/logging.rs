//! `[logging]` section
//!
//! Log lines go to stderr so they never interleave with dashboards drawn on
//! stdout. Per-component levels target the crate's own modules.

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// Modules that accept a `[logging.component_levels]` entry.
pub const COMPONENTS: [&str; 8] = [
    "cli",
    "client",
    "logging",
    "mission_log",
    "session",
    "store",
    "view",
    "wire",
];

const LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Shape of each log line on stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Multi-line output for an operator watching the terminal
    #[default]
    Pretty,
    /// One JSON object per line, for log shippers
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Unknown log format '{}', use pretty or json", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Base level for every module
    pub level: String,
    pub format: LogFormat,
    /// Overrides keyed by module, e.g. `session = "debug"`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_levels: Option<HashMap<String, String>>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            component_levels: None,
        }
    }
}

impl LoggingConfig {
    /// Reject levels `tracing` would not understand and components that
    /// name no module of this crate.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_level(&self.level) {
            return Err(ConfigError::invalid(
                "logging.level",
                format!("'{}' is not one of {}", self.level, LEVELS.join(", ")),
            ));
        }

        let Some(levels) = &self.component_levels else {
            return Ok(());
        };
        let mut components: Vec<_> = levels.iter().collect();
        components.sort();
        for (component, level) in components {
            let field = format!("logging.component_levels.{}", component);
            if !COMPONENTS.contains(&component.as_str()) {
                return Err(ConfigError::invalid(
                    &field,
                    format!("unknown component, expected one of {}", COMPONENTS.join(", ")),
                ));
            }
            if !is_level(level) {
                return Err(ConfigError::invalid(
                    &field,
                    format!("'{}' is not a log level", level),
                ));
            }
        }
        Ok(())
    }
}

fn is_level(level: &str) -> bool {
    LEVELS.contains(&level.trim().to_ascii_lowercase().as_str())
}
