//! Command sink backed by an open session.

use super::SessionState;
use crate::store::{CommandSink, SendOutcome};
use crate::wire::{self, Command};
use tokio::sync::{mpsc, watch};

/// Serialises commands onto the session's outbound queue.
///
/// Sends are accepted only while the session reads `Open`; the queue is
/// drained by the session task, one text frame per command.
pub(crate) struct SessionSink {
    state: watch::Receiver<SessionState>,
    outbound: mpsc::UnboundedSender<String>,
}

impl SessionSink {
    pub(crate) fn new(
        state: watch::Receiver<SessionState>,
        outbound: mpsc::UnboundedSender<String>,
    ) -> Self {
        Self { state, outbound }
    }
}

impl CommandSink for SessionSink {
    fn send(&self, command: &Command) -> SendOutcome {
        let state = *self.state.borrow();
        if state != SessionState::Open {
            tracing::warn!(
                command = command.name(),
                state = %state,
                "Session not open, dropping command"
            );
            return SendOutcome::Dropped;
        }

        let frame = match wire::encode_command(command) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::error!(command = command.name(), error = %e, "Failed to encode command");
                return SendOutcome::Dropped;
            }
        };

        match self.outbound.send(frame) {
            Ok(()) => {
                tracing::debug!(command = %command, "Command queued");
                SendOutcome::Sent
            }
            Err(_) => {
                tracing::warn!(
                    command = command.name(),
                    "Session task has stopped, dropping command"
                );
                SendOutcome::Dropped
            }
        }
    }
}
