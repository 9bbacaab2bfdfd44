//! Send command handler

use crate::cli::{load_config_with_overrides, SendArgs};
use crate::config::SimulatorConfig;
use crate::logging::init_tracing;
use crate::session::{Session, SessionState};
use crate::store::{SendOutcome, TelemetryStore};
use crate::wire::Command;

/// Handle `odyssey send` command
///
/// Opens a session, hands one command to the store and closes the session
/// again. Unlike the console, no phase or enablement gating is applied.
pub async fn handle_send(args: &SendArgs) -> Result<String, Box<dyn std::error::Error>> {
    let config = load_config_with_overrides(&args.simulator)?;
    init_tracing(&config.logging)?;

    let command = Command::from(args.command);
    send_once(&config.simulator, TelemetryStore::global(), command).await?;

    Ok(format!("✓ Sent {}", command))
}

/// Send `command` over a fresh session and unmount it.
pub(crate) async fn send_once(
    config: &SimulatorConfig,
    store: &TelemetryStore,
    command: Command,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::mount(config, store.clone());

    if session.wait_for(SessionState::Open).await != SessionState::Open {
        let reason = match session.unmount().await {
            Err(e) => e.to_string(),
            Ok(()) => "session closed before opening".to_string(),
        };
        return Err(format!("Could not reach simulator at {}: {}", config.host, reason).into());
    }

    let outcome = store.send_command(command);
    session.unmount().await?;

    match outcome {
        SendOutcome::Sent => Ok(()),
        SendOutcome::Dropped => Err(format!("{} was dropped", command.name()).into()),
    }
}
