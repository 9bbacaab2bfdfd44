//! Log command handler

use crate::cli::output::{format_log_json, format_log_table};
use crate::cli::{apply_color_choice, load_config_with_overrides, LogArgs};
use crate::client::SimulatorClient;
use crate::logging::init_tracing;
use crate::mission_log::{self, MissionLogState};

/// Handle `odyssey log` command
///
/// A failed fetch renders the same empty state as an empty log and is not
/// an error; only a broken configuration is.
pub async fn handle_log(args: &LogArgs) -> Result<String, Box<dyn std::error::Error>> {
    let config = load_config_with_overrides(&args.simulator)?;
    init_tracing(&config.logging)?;
    apply_color_choice(&config, false);

    let client = SimulatorClient::new(&config.simulator)?;
    let state = mission_log::load(&client).await;
    render_log(&state, args.json)
}

fn render_log(state: &MissionLogState, json: bool) -> Result<String, Box<dyn std::error::Error>> {
    if json {
        Ok(format_log_json(state.entries())?)
    } else {
        Ok(format_log_table(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::{LogEntry, LogLevel};

    #[test]
    fn test_render_log_failed_as_json_is_empty_list() {
        let output = render_log(&MissionLogState::Failed, true).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["entries"], serde_json::json!([]));
    }

    #[test]
    fn test_render_log_keeps_server_order() {
        colored::control::set_override(false);
        let state = MissionLogState::Loaded(vec![
            LogEntry {
                timestamp: "2025-06-01T12:00:00Z".to_string(),
                level: LogLevel::Info,
                message: "Descent started".to_string(),
            },
            LogEntry {
                timestamp: "2025-06-01T12:00:05Z".to_string(),
                level: LogLevel::Operator,
                message: "Command Sent: DEPLOY_ARM.".to_string(),
            },
        ]);

        let output = render_log(&state, false).unwrap();
        let first = output.find("Descent started").unwrap();
        let second = output.find("DEPLOY_ARM").unwrap();
        assert!(first < second);
    }
}
