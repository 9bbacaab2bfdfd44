//! HTTP client for the simulator's request/response endpoints.
//!
//! The live telemetry channel lives in [`crate::session`]; this client only
//! covers the one-shot mission log and hello check.

mod error;

pub use error::ClientError;

use crate::config::SimulatorConfig;
use crate::wire::{HelloResponse, LogEntry};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// One-shot client for `/mission-log` and `/hello`.
#[derive(Debug, Clone)]
pub struct SimulatorClient {
    client: reqwest::Client,
    mission_log_url: String,
    hello_url: String,
    timeout_seconds: u64,
}

impl SimulatorClient {
    pub fn new(config: &SimulatorConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| ClientError::Build(e.to_string()))?;

        Ok(Self {
            client,
            mission_log_url: config.mission_log_url(),
            hello_url: config.hello_url(),
            timeout_seconds: config.request_timeout_seconds,
        })
    }

    /// Full mission log, in server order.
    pub async fn fetch_mission_log(&self) -> Result<Vec<LogEntry>, ClientError> {
        self.get_json(&self.mission_log_url).await
    }

    pub async fn hello(&self) -> Result<HelloResponse, ClientError> {
        self.get_json(&self.hello_url).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ClientError> {
        tracing::debug!(url = %url, "GET");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ClientError::from_reqwest(e, self.timeout_seconds))?;

        if !response.status().is_success() {
            return Err(ClientError::Http {
                status: response.status().as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ClientError::from_reqwest(e, self.timeout_seconds))?;

        serde_json::from_str(&body).map_err(|e| {
            ClientError::InvalidResponse(format!("Failed to parse response from {}: {}", url, e))
        })
    }
}
