//! Configuration module for the dashboard
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`SIMULATOR_HOST`, `ODYSSEY_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use odyssey::config::DashboardConfig;
//!
//! let config = DashboardConfig::default();
//! assert_eq!(config.simulator.host, "localhost:8000");
//!
//! let toml = r#"
//! [simulator]
//! host = "rov-sim.local:9000"
//! "#;
//! let config: DashboardConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.simulator.telemetry_url(), "ws://rov-sim.local:9000/ws/telemetry");
//! ```

pub mod console;
pub mod error;
pub mod logging;
pub mod simulator;

pub use console::ConsoleConfig;
pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use simulator::SimulatorConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Example configuration written by `odyssey config init`.
pub const EXAMPLE_CONFIG: &str = include_str!("../../odyssey.example.toml");

/// Unified dashboard configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DashboardConfig {
    /// Simulator endpoints and timeouts
    pub simulator: SimulatorConfig,
    /// Operator console behaviour
    pub console: ConsoleConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl DashboardConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content =
                    std::fs::read_to_string(p).map_err(|source| ConfigError::Read {
                        path: p.to_path_buf(),
                        source,
                    })?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse {
                    path: p.to_path_buf(),
                    message: e.to_string(),
                })
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(host) = std::env::var("SIMULATOR_HOST") {
            if !host.trim().is_empty() {
                self.simulator.host = host.trim().to_string();
            }
        }

        if let Ok(level) = std::env::var("ODYSSEY_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("ODYSSEY_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sim = &self.simulator;

        if sim.host.trim().is_empty() {
            return Err(ConfigError::invalid(
                "simulator.host",
                "host cannot be empty",
            ));
        }
        if sim.host.contains("://") {
            return Err(ConfigError::invalid(
                "simulator.host",
                "host must be host:port without a scheme",
            ));
        }

        for (field, path) in [
            ("simulator.telemetry_path", &sim.telemetry_path),
            ("simulator.mission_log_path", &sim.mission_log_path),
            ("simulator.hello_path", &sim.hello_path),
        ] {
            if !path.starts_with('/') {
                return Err(ConfigError::invalid(field, "path must start with '/'"));
            }
        }

        if sim.connect_timeout_seconds == 0 {
            return Err(ConfigError::invalid(
                "simulator.connect_timeout_seconds",
                "timeout must be non-zero",
            ));
        }
        if sim.request_timeout_seconds == 0 {
            return Err(ConfigError::invalid(
                "simulator.request_timeout_seconds",
                "timeout must be non-zero",
            ));
        }
        if self.console.jettison_confirm_ms == 0 {
            return Err(ConfigError::invalid(
                "console.jettison_confirm_ms",
                "confirmation window must be non-zero",
            ));
        }

        self.logging.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_dashboard_config_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.simulator.host, "localhost:8000");
        assert_eq!(config.console.jettison_confirm_ms, 3000);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_parse_minimal_toml() {
        let toml = r#"
        [simulator]
        host = "192.168.1.20:8000"
        "#;

        let config: DashboardConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.simulator.host, "192.168.1.20:8000");
        assert_eq!(config.simulator.telemetry_path, "/ws/telemetry"); // Default
    }

    #[test]
    fn test_config_parse_example_file() {
        let config: DashboardConfig = toml::from_str(EXAMPLE_CONFIG).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.simulator.host, "localhost:8000");
    }

    #[test]
    fn test_config_load_from_file() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "[console]\njettison_confirm_ms = 5000").unwrap();

        let config = DashboardConfig::load(Some(temp.path())).unwrap();
        assert_eq!(config.console.jettison_confirm_ms, 5000);
    }

    #[test]
    fn test_config_missing_file_error() {
        let result = DashboardConfig::load(Some(Path::new("/nonexistent/odyssey.toml")));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_config_invalid_toml_error() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "[simulator\nhost = ").unwrap();

        let result = DashboardConfig::load(Some(temp.path()));
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_config_load_none_returns_defaults() {
        let config = DashboardConfig::load(None).unwrap();
        assert_eq!(config.simulator.host, "localhost:8000");
    }

    #[test]
    fn test_config_env_overrides() {
        // Single test so parallel tests never observe each other's variables
        std::env::set_var("SIMULATOR_HOST", "sim.example:8100");
        std::env::set_var("ODYSSEY_LOG_LEVEL", "debug");
        std::env::set_var("ODYSSEY_LOG_FORMAT", "json");
        let config = DashboardConfig::default().with_env_overrides();
        assert_eq!(config.simulator.host, "sim.example:8100");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);

        std::env::set_var("SIMULATOR_HOST", "   ");
        std::env::set_var("ODYSSEY_LOG_FORMAT", "xml");
        let config = DashboardConfig::default().with_env_overrides();
        std::env::remove_var("SIMULATOR_HOST");
        std::env::remove_var("ODYSSEY_LOG_LEVEL");
        std::env::remove_var("ODYSSEY_LOG_FORMAT");

        // Invalid values keep defaults
        assert_eq!(config.simulator.host, "localhost:8000");
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_config_validation_empty_host() {
        let mut config = DashboardConfig::default();
        config.simulator.host = "".to_string();

        let result = config.validate();
        assert!(matches!(
            result,
            Err(ConfigError::Validation { ref field, .. }) if field == "simulator.host"
        ));
    }

    #[test]
    fn test_config_validation_host_with_scheme() {
        let mut config = DashboardConfig::default();
        config.simulator.host = "http://localhost:8000".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_relative_path() {
        let mut config = DashboardConfig::default();
        config.simulator.mission_log_path = "mission-log".to_string();

        let result = config.validate();
        assert!(matches!(
            result,
            Err(ConfigError::Validation { ref field, .. }) if field == "simulator.mission_log_path"
        ));
    }

    #[test]
    fn test_config_validation_zero_timeouts() {
        let mut config = DashboardConfig::default();
        config.simulator.connect_timeout_seconds = 0;
        assert!(config.validate().is_err());

        let mut config = DashboardConfig::default();
        config.console.jettison_confirm_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_covers_logging_section() {
        let mut config = DashboardConfig::default();
        config.logging.level = "chatty".to_string();
        assert_eq!(config.validate().unwrap_err().field(), Some("logging.level"));
    }
}
