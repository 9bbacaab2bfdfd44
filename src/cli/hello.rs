//! Hello command handler

use crate::cli::{load_config_with_overrides, HelloArgs};
use crate::client::SimulatorClient;
use crate::logging::init_tracing;

/// Handle `odyssey hello` command
pub async fn handle_hello(args: &HelloArgs) -> Result<String, Box<dyn std::error::Error>> {
    let config = load_config_with_overrides(&args.simulator)?;
    init_tracing(&config.logging)?;

    let client = SimulatorClient::new(&config.simulator)?;
    let hello = client.hello().await?;

    Ok(format!(
        "✓ {} answered: {}",
        config.simulator.base_url(),
        hello.message
    ))
}
