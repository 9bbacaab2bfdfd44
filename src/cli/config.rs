//! `odyssey config init`

use crate::cli::ConfigInitArgs;
use crate::config::{DashboardConfig, EXAMPLE_CONFIG};
use std::fs;

const DEFAULT_HOST_LINE: &str = "host = \"localhost:8000\"";

/// Write the example config, pointed at `--host` when one is given.
///
/// The host is validated before anything touches the disk.
pub fn handle_config_init(args: &ConfigInitArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.output.exists() && !args.force {
        return Err(format!(
            "{} already exists, pass --force to replace it",
            args.output.display()
        )
        .into());
    }

    let content = render_example(args.host.as_deref())?;
    fs::write(&args.output, content)?;

    println!("✓ Wrote {}", args.output.display());
    match &args.host {
        Some(host) => println!("  Dashboard will connect to ws://{}", host),
        None => println!("  Edit [simulator].host if the simulator is not on localhost:8000"),
    }

    Ok(())
}

fn render_example(host: Option<&str>) -> Result<String, Box<dyn std::error::Error>> {
    let Some(host) = host else {
        return Ok(EXAMPLE_CONFIG.to_string());
    };

    let mut candidate = DashboardConfig::default();
    candidate.simulator.host = host.trim().to_string();
    candidate.validate()?;

    Ok(EXAMPLE_CONFIG.replacen(
        DEFAULT_HOST_LINE,
        &format!("host = \"{}\"", candidate.simulator.host),
        1,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_args(output: std::path::PathBuf, force: bool, host: Option<&str>) -> ConfigInitArgs {
        ConfigInitArgs {
            output,
            force,
            host: host.map(str::to_string),
        }
    }

    #[test]
    fn test_config_init_writes_valid_dashboard_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let output_path = temp_dir.path().join("odyssey.toml");

        handle_config_init(&init_args(output_path.clone(), false, None)).unwrap();

        let config = DashboardConfig::load(Some(&output_path)).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.simulator.host, "localhost:8000");
        assert_eq!(
            config.simulator.telemetry_url(),
            "ws://localhost:8000/ws/telemetry"
        );
        assert_eq!(config.console.jettison_confirm_ms, 3000);
    }

    #[test]
    fn test_config_init_with_host_points_at_simulator() {
        let temp_dir = tempfile::tempdir().unwrap();
        let output_path = temp_dir.path().join("odyssey.toml");

        handle_config_init(&init_args(output_path.clone(), false, Some("rov-sim.lab:9100")))
            .unwrap();

        let config = DashboardConfig::load(Some(&output_path)).unwrap();
        assert_eq!(config.simulator.host, "rov-sim.lab:9100");
        // The rest of the example survives
        let content = std::fs::read_to_string(&output_path).unwrap();
        assert!(content.contains("# [logging.component_levels]"));
    }

    #[test]
    fn test_config_init_rejects_host_with_scheme() {
        let temp_dir = tempfile::tempdir().unwrap();
        let output_path = temp_dir.path().join("odyssey.toml");

        let err =
            handle_config_init(&init_args(output_path.clone(), false, Some("ws://rov-sim:8000")))
                .unwrap_err();

        assert!(err.to_string().contains("simulator.host"));
        assert!(!output_path.exists());
    }

    #[test]
    fn test_config_init_keeps_existing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let output_path = temp_dir.path().join("odyssey.toml");
        std::fs::write(&output_path, "[simulator]\nhost = \"bench:8000\"\n").unwrap();

        let err = handle_config_init(&init_args(output_path.clone(), false, None)).unwrap_err();

        assert!(err.to_string().contains("--force"));
        let config = DashboardConfig::load(Some(&output_path)).unwrap();
        assert_eq!(config.simulator.host, "bench:8000");
    }

    #[test]
    fn test_config_init_force_replaces_existing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let output_path = temp_dir.path().join("odyssey.toml");
        std::fs::write(&output_path, "[simulator]\nhost = \"bench:8000\"\n").unwrap();

        handle_config_init(&init_args(output_path.clone(), true, None)).unwrap();

        let config = DashboardConfig::load(Some(&output_path)).unwrap();
        assert_eq!(config.simulator.host, "localhost:8000");
    }
}
