use crate::wire::{Command, MissionStatus, Scenario};
use std::fmt;

/// Which top-level screen the dashboard shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MissionPhase {
    /// Scenario selector
    Standby,
    /// System overview and subsystem controls
    Operational,
    /// Mission over, only a reset is offered
    Ended,
}

impl MissionPhase {
    /// Label of the only action offered once the mission has ended.
    pub const RETURN_LABEL: &'static str = "Return to Scenario Selector";

    pub fn classify(status: &MissionStatus) -> Self {
        match status {
            MissionStatus::Standby => MissionPhase::Standby,
            MissionStatus::MissionSuccess
            | MissionStatus::MissionFailureHullBreach
            | MissionStatus::MissionFailureLostSignal => MissionPhase::Ended,
            MissionStatus::Unknown(raw) if raw.starts_with("mission_failure") => {
                MissionPhase::Ended
            }
            _ => MissionPhase::Operational,
        }
    }

    /// Buttons offered by the scenario selector, in display order.
    pub fn scenario_choices() -> impl Iterator<Item = (&'static str, Command)> {
        Scenario::ALL
            .into_iter()
            .map(|scenario| (scenario.label(), Command::StartSimulation { scenario }))
    }

    /// Command behind "Return to Scenario Selector".
    pub fn return_command() -> Command {
        Command::ResetSimulation
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MissionPhase::Standby => "standby",
            MissionPhase::Operational => "operational",
            MissionPhase::Ended => "ended",
        }
    }
}

impl fmt::Display for MissionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tabs of the operational screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OperationalTab {
    #[default]
    SystemOverview,
    SubsystemControls,
}

impl OperationalTab {
    pub const ALL: [OperationalTab; 2] = [
        OperationalTab::SystemOverview,
        OperationalTab::SubsystemControls,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            OperationalTab::SystemOverview => "System Overview",
            OperationalTab::SubsystemControls => "Subsystem Controls",
        }
    }
}
