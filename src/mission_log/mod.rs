//! Mission log view state.
//!
//! The log is fetched once when the view opens. Failures are logged and
//! render the same neutral empty state as an empty log; there is no retry
//! and the store is never involved.

use crate::client::SimulatorClient;
use crate::wire::LogEntry;

/// Shown while the request is in flight.
pub const LOADING_MESSAGE: &str = "Loading...";

/// Shown for an empty log and for a failed fetch.
pub const EMPTY_MESSAGE: &str = "No log entries available";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissionLogState {
    Loading,
    Loaded(Vec<LogEntry>),
    Failed,
}

impl MissionLogState {
    /// Entries to list; empty unless loaded.
    pub fn entries(&self) -> &[LogEntry] {
        match self {
            MissionLogState::Loaded(entries) => entries,
            MissionLogState::Loading | MissionLogState::Failed => &[],
        }
    }

    /// Message to show instead of the entry list, if any.
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            MissionLogState::Loading => Some(LOADING_MESSAGE),
            MissionLogState::Loaded(entries) if !entries.is_empty() => None,
            MissionLogState::Loaded(_) | MissionLogState::Failed => Some(EMPTY_MESSAGE),
        }
    }
}

/// Fetch the mission log once and settle into `Loaded` or `Failed`.
pub async fn load(client: &SimulatorClient) -> MissionLogState {
    match client.fetch_mission_log().await {
        Ok(entries) => {
            tracing::debug!(entries = entries.len(), "Mission log loaded");
            MissionLogState::Loaded(entries)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch mission log");
            MissionLogState::Failed
        }
    }
}
