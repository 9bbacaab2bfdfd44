//! Command sink abstraction installed into the store by the session.

use crate::wire::Command;

/// Result of handing a command to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Command was serialised and queued on the transport
    Sent,
    /// Command was logged and discarded
    Dropped,
}

impl SendOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            SendOutcome::Sent => "sent",
            SendOutcome::Dropped => "dropped",
        }
    }
}

/// Destination for operator commands.
///
/// Implementations must not block and must not panic; failures are logged
/// and reported as [`SendOutcome::Dropped`].
pub trait CommandSink: Send + Sync {
    fn send(&self, command: &Command) -> SendOutcome;
}

impl<F> CommandSink for F
where
    F: Fn(&Command) -> SendOutcome + Send + Sync,
{
    fn send(&self, command: &Command) -> SendOutcome {
        self(command)
    }
}

/// Sink used whenever no session is open.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisconnectedSink;

impl CommandSink for DisconnectedSink {
    fn send(&self, command: &Command) -> SendOutcome {
        tracing::warn!(
            command = command.name(),
            "No open simulator session, dropping command"
        );
        SendOutcome::Dropped
    }
}
