//! Derived view model.
//!
//! Every function here is a pure projection of one [`TelemetrySnapshot`]
//! into display values. Renderers re-derive on store notifications; nothing
//! in this module holds timers or touches the transport, except
//! [`GuardedAction`], which only stores a deadline.

mod alert;
mod controls;
mod graph;
mod phase;
mod readouts;
mod subsystem;

pub use alert::{alert_feed_line, AlertBorder, MasterAlert};
pub use controls::{
    click_jettison, ButtonView, Controls, GuardClick, GuardState, GuardedAction, JettisonClick,
    DEFAULT_CONFIRM_TIMEOUT,
};
pub use graph::{GraphEdge, GraphNode, SystemGraph, TOPOLOGY};
pub use phase::{MissionPhase, OperationalTab};
pub use readouts::{IndicatorBorder, KeyReadouts, MissionStatusIndicator};
pub use subsystem::{Subsystem, SubsystemView};

use crate::store::TelemetryStore;
use crate::wire::TelemetrySnapshot;
use std::fmt;

/// Shown wherever a numeric reading is missing or not finite.
pub const PLACEHOLDER: &str = "---";

/// Display status of a subsystem node or card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayStatus {
    Nominal,
    Warning,
    Critical,
    Fault,
    Inactive,
    Info,
    Success,
    Default,
}

impl DisplayStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayStatus::Nominal => "nominal",
            DisplayStatus::Warning => "warning",
            DisplayStatus::Critical => "critical",
            DisplayStatus::Fault => "fault",
            DisplayStatus::Inactive => "inactive",
            DisplayStatus::Info => "info",
            DisplayStatus::Success => "success",
            DisplayStatus::Default => "default",
        }
    }

    /// Stroke colour for edges leaving a node in this status.
    ///
    /// `nominal` and `inactive` have no palette entry and share the
    /// neutral colour.
    pub fn edge_color(&self) -> &'static str {
        match self {
            DisplayStatus::Success => "#34D399",
            DisplayStatus::Warning => "#FBBF24",
            DisplayStatus::Critical | DisplayStatus::Fault => "#F87171",
            DisplayStatus::Info => "#60A5FA",
            DisplayStatus::Nominal | DisplayStatus::Inactive | DisplayStatus::Default => {
                "#374151"
            }
        }
    }
}

impl fmt::Display for DisplayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a dashboard renders for one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub phase: MissionPhase,
    pub alert: MasterAlert,
    pub alert_feed: String,
    pub mission_status: MissionStatusIndicator,
    pub readouts: KeyReadouts,
    pub subsystems: Vec<SubsystemView>,
    pub graph: SystemGraph,
    pub controls: Controls,
}

impl DashboardView {
    pub fn derive(snapshot: &TelemetrySnapshot) -> Self {
        Self {
            phase: MissionPhase::classify(&snapshot.mission_state.status),
            alert: MasterAlert::derive(&snapshot.alert),
            alert_feed: alert_feed_line(snapshot),
            mission_status: MissionStatusIndicator::derive(&snapshot.mission_state.status),
            readouts: KeyReadouts::derive(snapshot),
            subsystems: Subsystem::ALL
                .iter()
                .map(|subsystem| SubsystemView::derive(*subsystem, snapshot))
                .collect(),
            graph: SystemGraph::project(snapshot),
            controls: Controls::derive(snapshot),
        }
    }

    /// Derive from whatever `store` currently holds.
    pub fn current(store: &TelemetryStore) -> Self {
        Self::derive(&store.get())
    }

    pub fn subsystem(&self, subsystem: Subsystem) -> Option<&SubsystemView> {
        self.subsystems.iter().find(|view| view.subsystem == subsystem)
    }
}
