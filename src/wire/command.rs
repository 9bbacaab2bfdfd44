//! Operator commands sent to the simulator.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::PropulsionStatus;

/// Scenario the simulator should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    Nominal,
    PressureAnomaly,
    PowerFault,
}

impl Scenario {
    pub const ALL: [Scenario; 3] = [
        Scenario::Nominal,
        Scenario::PressureAnomaly,
        Scenario::PowerFault,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::Nominal => "nominal",
            Scenario::PressureAnomaly => "pressure_anomaly",
            Scenario::PowerFault => "power_fault",
        }
    }

    /// Button label on the scenario selector.
    pub fn label(&self) -> &'static str {
        match self {
            Scenario::Nominal => "Nominal Mission",
            Scenario::PressureAnomaly => "Pressure Anomaly",
            Scenario::PowerFault => "Power Fault",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scenario {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "nominal" => Ok(Scenario::Nominal),
            "pressure_anomaly" => Ok(Scenario::PressureAnomaly),
            "power_fault" => Ok(Scenario::PowerFault),
            _ => Err(format!("Invalid scenario: {}", s)),
        }
    }
}

/// Requested thruster state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropulsionSetting {
    Active,
    Inactive,
}

impl PropulsionSetting {
    /// The setting that flips the reported state. Anything not `active`
    /// is treated as stopped, so the request is to engage.
    pub fn toggled_from(current: &PropulsionStatus) -> Self {
        match current {
            PropulsionStatus::Active => PropulsionSetting::Inactive,
            _ => PropulsionSetting::Active,
        }
    }
}

impl FromStr for PropulsionSetting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" | "on" | "engage" => Ok(PropulsionSetting::Active),
            "inactive" | "off" | "disengage" => Ok(PropulsionSetting::Inactive),
            _ => Err(format!("Invalid propulsion setting: {}", s)),
        }
    }
}

/// A command frame, tagged by `command` with its payload under `payload`.
///
/// # Examples
///
/// ```
/// use odyssey::wire::{Command, Scenario};
///
/// let json = serde_json::to_string(&Command::StartSimulation {
///     scenario: Scenario::Nominal,
/// })
/// .unwrap();
/// assert_eq!(json, r#"{"command":"START_SIMULATION","payload":{"scenario":"nominal"}}"#);
///
/// let json = serde_json::to_string(&Command::DeployArm).unwrap();
/// assert_eq!(json, r#"{"command":"DEPLOY_ARM"}"#);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "command",
    content = "payload",
    rename_all = "SCREAMING_SNAKE_CASE"
)]
pub enum Command {
    StartSimulation { scenario: Scenario },
    SetPropulsionState { status: PropulsionSetting },
    DeployArm,
    CollectSample,
    JettisonPackage,
    ResetSimulation,
}

impl Command {
    /// Value of the `command` discriminator.
    pub fn name(&self) -> &'static str {
        match self {
            Command::StartSimulation { .. } => "START_SIMULATION",
            Command::SetPropulsionState { .. } => "SET_PROPULSION_STATE",
            Command::DeployArm => "DEPLOY_ARM",
            Command::CollectSample => "COLLECT_SAMPLE",
            Command::JettisonPackage => "JETTISON_PACKAGE",
            Command::ResetSimulation => "RESET_SIMULATION",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::StartSimulation { scenario } => write!(f, "{} ({})", self.name(), scenario),
            Command::SetPropulsionState { status } => {
                let status = match status {
                    PropulsionSetting::Active => "active",
                    PropulsionSetting::Inactive => "inactive",
                };
                write!(f, "{} ({})", self.name(), status)
            }
            _ => f.write_str(self.name()),
        }
    }
}
