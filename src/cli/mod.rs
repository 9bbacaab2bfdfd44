//! CLI module for the Odyssey dashboard
//!
//! Command-line interface definitions and handlers for the ROV operator dashboard.
//!
//! # Commands
//!
//! - `monitor` - Live dashboard, redrawn on every telemetry change
//! - `console` - Interactive operator console
//! - `send` - Send a single command and exit
//! - `log` - Print the mission log
//! - `hello` - Check the simulator's hello endpoint
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Watch a simulator on another machine
//! odyssey monitor --host 192.168.1.20:8000
//!
//! # Start the power fault scenario
//! odyssey send start power_fault
//!
//! # Generate shell completions
//! odyssey completions bash > ~/.bash_completion.d/odyssey
//! ```

pub mod completions;
pub mod config;
pub mod console;
pub mod hello;
pub mod log;
pub mod monitor;
pub mod output;
pub mod send;

pub use completions::handle_completions;
pub use config::handle_config_init;

use crate::config::DashboardConfig;
use crate::wire::{Command, PropulsionSetting, Scenario};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Odyssey - ROV operator dashboard
#[derive(Parser, Debug)]
#[command(
    name = "odyssey",
    version,
    about = "Operator dashboard for the Odyssey ROV simulator"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the live dashboard
    Monitor(MonitorArgs),
    /// Interactive operator console
    Console(ConsoleArgs),
    /// Send one command to the simulator
    Send(SendArgs),
    /// Print the mission log
    Log(LogArgs),
    /// Check that the simulator answers
    Hello(HelloArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Options shared by every command that talks to the simulator.
#[derive(Args, Debug, Clone)]
pub struct SimulatorArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "odyssey.toml")]
    pub config: PathBuf,

    /// Override simulator host:port
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "ODYSSEY_LOG_LEVEL")]
    pub log_level: Option<String>,
}

#[derive(Args, Debug)]
pub struct MonitorArgs {
    #[command(flatten)]
    pub simulator: SimulatorArgs,

    /// Exit after drawing the first telemetry frame
    #[arg(long)]
    pub once: bool,

    /// Disable coloured output
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Args, Debug)]
pub struct ConsoleArgs {
    #[command(flatten)]
    pub simulator: SimulatorArgs,

    /// Disable coloured output
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Args, Debug)]
pub struct SendArgs {
    #[command(flatten)]
    pub simulator: SimulatorArgs,

    #[command(subcommand)]
    pub command: SendCommand,
}

/// Commands accepted by `odyssey send`.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendCommand {
    /// Start a scenario (nominal, pressure_anomaly, power_fault)
    Start { scenario: Scenario },
    /// Set propulsion (active, inactive)
    Propulsion { status: PropulsionSetting },
    /// Deploy the manipulator arm
    DeployArm,
    /// Collect a sample with the deployed arm
    CollectSample,
    /// Jettison the science package
    Jettison,
    /// Reset the simulation to standby
    Reset,
}

impl From<SendCommand> for Command {
    fn from(command: SendCommand) -> Self {
        match command {
            SendCommand::Start { scenario } => Command::StartSimulation { scenario },
            SendCommand::Propulsion { status } => Command::SetPropulsionState { status },
            SendCommand::DeployArm => Command::DeployArm,
            SendCommand::CollectSample => Command::CollectSample,
            SendCommand::Jettison => Command::JettisonPackage,
            SendCommand::Reset => Command::ResetSimulation,
        }
    }
}

#[derive(Args, Debug)]
pub struct LogArgs {
    #[command(flatten)]
    pub simulator: SimulatorArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct HelloArgs {
    #[command(flatten)]
    pub simulator: SimulatorArgs,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "odyssey.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,

    /// Simulator host:port to write instead of localhost:8000
    #[arg(short = 'H', long)]
    pub host: Option<String>,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

/// Load configuration with file, environment and CLI layers applied, then validate.
pub fn load_config_with_overrides(
    args: &SimulatorArgs,
) -> Result<DashboardConfig, Box<dyn std::error::Error>> {
    // Load from file if it exists, otherwise use defaults
    let mut config = if args.config.exists() {
        DashboardConfig::load(Some(&args.config))?
    } else {
        tracing::debug!("Config file not found, using defaults");
        DashboardConfig::default()
    };

    // Apply environment variable overrides
    config = config.with_env_overrides();

    // Apply CLI overrides (highest priority)
    if let Some(ref host) = args.host {
        config.simulator.host = host.clone();
    }
    if let Some(ref log_level) = args.log_level {
        config.logging.level = log_level.clone();
    }

    config.validate()?;
    Ok(config)
}

/// Turn off ANSI colours when asked to, by flag or by config.
pub(crate) fn apply_color_choice(config: &DashboardConfig, no_color: bool) {
    if no_color || !config.console.color {
        colored::control::set_override(false);
    }
}
