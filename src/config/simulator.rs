//! Simulator endpoint configuration

use serde::{Deserialize, Serialize};

/// Where the simulator lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// `host:port` of the simulator, without scheme
    pub host: String,
    pub telemetry_path: String,
    pub mission_log_path: String,
    pub hello_path: String,
    pub connect_timeout_seconds: u64,
    pub request_timeout_seconds: u64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            host: "localhost:8000".to_string(),
            telemetry_path: "/ws/telemetry".to_string(),
            mission_log_path: "/mission-log".to_string(),
            hello_path: "/hello".to_string(),
            connect_timeout_seconds: 10,
            request_timeout_seconds: 5,
        }
    }
}

impl SimulatorConfig {
    /// WebSocket URL of the telemetry/command channel.
    pub fn telemetry_url(&self) -> String {
        format!("ws://{}{}", self.host, self.telemetry_path)
    }

    /// Base HTTP URL of the simulator.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.host)
    }

    pub fn mission_log_url(&self) -> String {
        format!("{}{}", self.base_url(), self.mission_log_path)
    }

    pub fn hello_url(&self) -> String {
        format!("{}{}", self.base_url(), self.hello_path)
    }
}
