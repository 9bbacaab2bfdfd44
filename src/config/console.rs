//! Operator console configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings for the interactive operator surfaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// How long an armed jettison waits for confirmation
    pub jettison_confirm_ms: u64,
    /// Use ANSI colours in rendered output
    pub color: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            jettison_confirm_ms: 3000,
            color: true,
        }
    }
}

impl ConsoleConfig {
    pub fn jettison_confirm_timeout(&self) -> Duration {
        Duration::from_millis(self.jettison_confirm_ms)
    }
}
