use super::{DisplayStatus, PLACEHOLDER};
use crate::wire::{
    AlertSeverity, ArmStatus, HullStatus, PackageStatus, PowerStatus, PropulsionStatus,
    TelemetrySnapshot,
};
use std::fmt;

/// A subsystem shown as a graph node and, for some, a control card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subsystem {
    Power,
    MainBus,
    Propulsion,
    Hull,
    Manipulator,
    SciencePackage,
}

impl Subsystem {
    pub const ALL: [Subsystem; 6] = [
        Subsystem::Power,
        Subsystem::MainBus,
        Subsystem::Propulsion,
        Subsystem::Hull,
        Subsystem::Manipulator,
        Subsystem::SciencePackage,
    ];

    /// Graph node id.
    pub fn id(&self) -> &'static str {
        match self {
            Subsystem::Power => "power",
            Subsystem::MainBus => "main-bus",
            Subsystem::Propulsion => "propulsion",
            Subsystem::Hull => "hull",
            Subsystem::Manipulator => "manipulator",
            Subsystem::SciencePackage => "science-package",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Subsystem::Power => "Power System",
            Subsystem::MainBus => "Main Bus",
            Subsystem::Propulsion => "Propulsion",
            Subsystem::Hull => "Hull Integrity",
            Subsystem::Manipulator => "Manipulator",
            Subsystem::SciencePackage => "Science Package",
        }
    }

    /// Display status. Rules are checked in order and the first match wins.
    pub fn status(&self, snapshot: &TelemetrySnapshot) -> DisplayStatus {
        let rov = &snapshot.rov_state;
        match self {
            // The bus has no telemetry of its own and follows power health.
            Subsystem::Power | Subsystem::MainBus => match rov.power.status {
                PowerStatus::Fault => DisplayStatus::Critical,
                PowerStatus::Discharging => DisplayStatus::Nominal,
                PowerStatus::Unknown(_) => DisplayStatus::Default,
            },
            Subsystem::Propulsion => match rov.propulsion.status {
                PropulsionStatus::Active => DisplayStatus::Nominal,
                PropulsionStatus::Inactive => DisplayStatus::Inactive,
                PropulsionStatus::Unknown(_) => DisplayStatus::Default,
            },
            Subsystem::Hull => match rov.hull_integrity.status {
                HullStatus::Nominal => DisplayStatus::Nominal,
                HullStatus::Warning => DisplayStatus::Warning,
                HullStatus::Critical => DisplayStatus::Critical,
                HullStatus::Unknown(_) => DisplayStatus::Default,
            },
            Subsystem::Manipulator => {
                if rov.manipulator_arm.sample_collected {
                    DisplayStatus::Success
                } else if snapshot.alert.severity == Some(AlertSeverity::Info) {
                    DisplayStatus::Info
                } else if rov.manipulator_arm.status == ArmStatus::Stowed {
                    DisplayStatus::Inactive
                } else {
                    DisplayStatus::Default
                }
            }
            Subsystem::SciencePackage => {
                if rov.science_package.status == PackageStatus::Jettisoned {
                    DisplayStatus::Nominal
                } else if snapshot.alert.severity == Some(AlertSeverity::Critical) {
                    DisplayStatus::Critical
                } else {
                    DisplayStatus::Default
                }
            }
        }
    }

    /// Display value shown on the node.
    pub fn value(&self, snapshot: &TelemetrySnapshot) -> String {
        let rov = &snapshot.rov_state;
        match self {
            Subsystem::Power => format_percent_tenths(rov.power.charge_percent),
            Subsystem::MainBus => "Online".to_string(),
            Subsystem::Propulsion => format_percent_whole(rov.propulsion.power_level_percent),
            Subsystem::Hull => format_bar(rov.hull_integrity.hull_pressure_kpa),
            Subsystem::Manipulator => {
                if rov.manipulator_arm.sample_collected {
                    "Sample Stored".to_string()
                } else {
                    rov.manipulator_arm.status.to_string()
                }
            }
            Subsystem::SciencePackage => rov.science_package.status.to_string(),
        }
    }
}

impl fmt::Display for Subsystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Node/card contents for one subsystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsystemView {
    pub subsystem: Subsystem,
    pub label: &'static str,
    pub status: DisplayStatus,
    pub value: String,
}

impl SubsystemView {
    pub fn derive(subsystem: Subsystem, snapshot: &TelemetrySnapshot) -> Self {
        Self {
            subsystem,
            label: subsystem.label(),
            status: subsystem.status(snapshot),
            value: subsystem.value(snapshot),
        }
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// `87.25` renders as `87.3%`; ties round away from zero.
pub(crate) fn format_percent_tenths(value: Option<f64>) -> String {
    match finite(value) {
        Some(v) => format!("{:.1}%", round_tenths(v)),
        None => PLACEHOLDER.to_string(),
    }
}

/// `0.5` renders as `1%`.
pub(crate) fn format_percent_whole(value: Option<f64>) -> String {
    match finite(value) {
        Some(v) => format!("{:.0}%", without_negative_zero(v.round())),
        None => PLACEHOLDER.to_string(),
    }
}

/// kPa to bar with one decimal, half-up: `250` renders as `2.5 bar`,
/// `1005` as `10.1 bar`.
pub(crate) fn format_bar(kpa: Option<u64>) -> String {
    match kpa {
        Some(kpa) => {
            let tenths = kpa.saturating_add(5) / 10;
            format!("{}.{} bar", tenths / 10, tenths % 10)
        }
        None => PLACEHOLDER.to_string(),
    }
}

/// One decimal place, half away from zero.
pub(crate) fn format_tenths(value: Option<f64>) -> String {
    match finite(value) {
        Some(v) => format!("{:.1}", round_tenths(v)),
        None => PLACEHOLDER.to_string(),
    }
}

fn round_tenths(v: f64) -> f64 {
    without_negative_zero((v * 10.0).round() / 10.0)
}

fn without_negative_zero(v: f64) -> f64 {
    if v == 0.0 {
        0.0
    } else {
        v
    }
}
