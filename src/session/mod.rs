//! Real-time session with the simulator.
//!
//! A [`Session`] owns one WebSocket connection. While it is open, inbound
//! snapshots replace the store's telemetry and a command sink backed by the
//! connection is installed in the store. The session never reconnects: once
//! it reads [`SessionState::Closed`] a new one has to be mounted.
//!
//! ```no_run
//! use odyssey::config::SimulatorConfig;
//! use odyssey::session::{Session, SessionState};
//! use odyssey::store::TelemetryStore;
//! use odyssey::wire::{Command, Scenario};
//!
//! # async fn run() {
//! let store = TelemetryStore::global().clone();
//! let session = Session::mount(&SimulatorConfig::default(), store.clone());
//!
//! if session.wait_for(SessionState::Open).await == SessionState::Open {
//!     store.send_command(Command::StartSimulation { scenario: Scenario::Nominal });
//! }
//! session.unmount().await.ok();
//! # }
//! ```

mod error;
mod sink;
mod worker;

pub use error::{is_terminal, SessionError};

use crate::config::SimulatorConfig;
use crate::logging::generate_session_id;
use crate::store::TelemetryStore;
use std::fmt;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

/// Lifecycle of a session. `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    Idle,
    Connecting,
    Open,
    Closed,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Connecting => "connecting",
            SessionState::Open => "open",
            SessionState::Closed => "closed",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handle to a mounted session.
///
/// Dropping the handle cancels the session; [`Session::unmount`] also waits
/// for the connection to be torn down and reports how it ended.
pub struct Session {
    id: String,
    state: watch::Receiver<SessionState>,
    cancel: CancellationToken,
    task: Option<JoinHandle<Result<(), SessionError>>>,
}

impl Session {
    /// Start connecting to the simulator's telemetry endpoint.
    ///
    /// Must be called from within a tokio runtime. The session is
    /// `Connecting` when this returns.
    pub fn mount(config: &SimulatorConfig, store: TelemetryStore) -> Self {
        let id = generate_session_id();
        let (state_tx, state_rx) = watch::channel(SessionState::Idle);
        let cancel = CancellationToken::new();

        let url = config.telemetry_url();
        let span = tracing::info_span!("session", session_id = %id, url = %url);
        let worker = worker::Worker::new(
            url,
            Duration::from_secs(config.connect_timeout_seconds),
            store,
            state_tx,
        );

        let task = tokio::spawn(worker.run(cancel.clone()).instrument(span));

        Self {
            id,
            state: state_rx,
            cancel,
            task: Some(task),
        }
    }

    /// Correlation ID attached to every log event of this session.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> SessionState {
        *self.state.borrow()
    }

    /// Watch channel that observes every state transition.
    pub fn subscribe_state(&self) -> watch::Receiver<SessionState> {
        self.state.clone()
    }

    /// Wait until the session reaches `target` or closes.
    ///
    /// Returns the state that ended the wait, so a caller waiting for
    /// `Open` gets `Closed` back when the connection failed.
    pub async fn wait_for(&self, target: SessionState) -> SessionState {
        let mut state = self.state.clone();
        let reached = state
            .wait_for(|s| *s == target || *s == SessionState::Closed)
            .await
            .map(|s| *s);
        reached.unwrap_or(SessionState::Closed)
    }

    /// Close the connection from whatever state it is in and wait for the
    /// session task to finish.
    ///
    /// Returns the error that ended the session, if it ended abnormally
    /// before the unmount.
    pub async fn unmount(mut self) -> Result<(), SessionError> {
        self.cancel.cancel();
        match self.task.take() {
            Some(task) => match task.await {
                Ok(result) => result,
                Err(e) => Err(SessionError::Task(e.to_string())),
            },
            None => Ok(()),
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("state", &self.state())
            .finish()
    }
}
