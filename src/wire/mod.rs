//! Wire types shared with the simulator.
//!
//! Inbound: one JSON-encoded [`TelemetrySnapshot`] per WebSocket frame.
//! Outbound: one JSON-encoded [`Command`] per frame. The mission log and
//! hello payloads travel over plain HTTP.
//!
//! # Example
//!
//! ```rust
//! use odyssey::wire::{decode_snapshot, encode_command, Command, MissionStatus, TelemetrySnapshot};
//!
//! let frame = serde_json::to_string(&TelemetrySnapshot::standby()).unwrap();
//! let snapshot = decode_snapshot(&frame).unwrap();
//! assert_eq!(snapshot.mission_state.status, MissionStatus::Standby);
//!
//! assert_eq!(
//!     encode_command(&Command::ResetSimulation).unwrap(),
//!     r#"{"command":"RESET_SIMULATION"}"#
//! );
//! ```

mod command;
mod error;
mod lenient;
mod mission_log;
mod telemetry;

pub use command::*;
pub use error::WireError;
pub use mission_log::*;
pub use telemetry::*;

/// Decode a text frame into a snapshot.
///
/// Rejects anything that is not a JSON object with the snapshot's sections;
/// unknown status values and unusable numbers are tolerated.
pub fn decode_snapshot(frame: &str) -> Result<TelemetrySnapshot, WireError> {
    serde_json::from_str(frame).map_err(WireError::from_decode)
}

/// Decode a binary frame carrying UTF-8 JSON.
pub fn decode_snapshot_bytes(frame: &[u8]) -> Result<TelemetrySnapshot, WireError> {
    let text = std::str::from_utf8(frame).map_err(|_| WireError::InvalidUtf8)?;
    decode_snapshot(text)
}

/// Serialise a command into a single text frame.
pub fn encode_command(command: &Command) -> Result<String, WireError> {
    serde_json::to_string(command).map_err(WireError::Encode)
}

/// Parse a command frame. Inverse of [`encode_command`].
pub fn decode_command(frame: &str) -> Result<Command, WireError> {
    serde_json::from_str(frame).map_err(WireError::from_decode)
}
