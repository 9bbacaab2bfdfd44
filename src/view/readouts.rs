use super::subsystem::format_tenths;
use super::PLACEHOLDER;
use crate::wire::{MissionStatus, TelemetrySnapshot};

/// Sidebar readouts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyReadouts {
    /// Depth (m)
    pub depth: String,
    /// Battery (%)
    pub battery: String,
    /// Hull Pressure (kPa)
    pub hull_pressure: String,
}

impl KeyReadouts {
    pub fn derive(snapshot: &TelemetrySnapshot) -> Self {
        let rov = &snapshot.rov_state;
        Self {
            depth: format_tenths(rov.environment.depth_meters),
            battery: format_tenths(rov.power.charge_percent),
            hull_pressure: rov
                .hull_integrity
                .hull_pressure_kpa
                .map(|kpa| kpa.to_string())
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorBorder {
    Neutral,
    Nominal,
    Critical,
}

/// Mission status box in the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissionStatusIndicator {
    /// `en_route` renders as `EN ROUTE`
    pub text: String,
    pub border: IndicatorBorder,
}

impl MissionStatusIndicator {
    pub fn derive(status: &MissionStatus) -> Self {
        let border = match status {
            MissionStatus::MissionSuccess => IndicatorBorder::Nominal,
            MissionStatus::MissionFailureHullBreach | MissionStatus::MissionFailureLostSignal => {
                IndicatorBorder::Critical
            }
            _ => IndicatorBorder::Neutral,
        };

        Self {
            text: status.as_str().replace('_', " ").to_uppercase(),
            border,
        }
    }
}
