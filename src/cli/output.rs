//! Output formatting helpers for CLI commands

use crate::mission_log::MissionLogState;
use crate::session::SessionState;
use crate::view::{
    AlertBorder, ButtonView, DashboardView, DisplayStatus, IndicatorBorder, MissionPhase,
    OperationalTab, Subsystem,
};
use crate::wire::{LogEntry, LogLevel};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde_json::json;

/// Colour a display status the way the dashboard borders do.
pub fn paint_status(status: DisplayStatus) -> String {
    let text = status.as_str();
    match status {
        DisplayStatus::Nominal | DisplayStatus::Success => text.green().to_string(),
        DisplayStatus::Warning => text.yellow().to_string(),
        DisplayStatus::Critical | DisplayStatus::Fault => text.red().to_string(),
        DisplayStatus::Info => text.blue().to_string(),
        DisplayStatus::Inactive | DisplayStatus::Default => text.dimmed().to_string(),
    }
}

fn paint_session(state: SessionState) -> String {
    let text = state.as_str().to_uppercase();
    match state {
        SessionState::Open => text.green().to_string(),
        SessionState::Connecting | SessionState::Idle => text.yellow().to_string(),
        SessionState::Closed => text.red().to_string(),
    }
}

fn button_cell(button: &ButtonView) -> String {
    if !button.enabled {
        format!("[{}] (disabled)", button.label).dimmed().to_string()
    } else if button.destructive {
        format!("[{}]", button.label).red().bold().to_string()
    } else {
        format!("[{}]", button.label)
    }
}

/// Header line: mission status, master alert, session state.
pub fn format_header(view: &DashboardView, session: SessionState) -> String {
    let mission = match view.mission_status.border {
        IndicatorBorder::Nominal => view.mission_status.text.green().bold().to_string(),
        IndicatorBorder::Critical => view.mission_status.text.red().bold().to_string(),
        IndicatorBorder::Neutral => view.mission_status.text.bold().to_string(),
    };

    let mut alert = match view.alert.border {
        AlertBorder::Info => view.alert.label.blue().to_string(),
        AlertBorder::Warning => view.alert.label.yellow().to_string(),
        AlertBorder::Critical => view.alert.label.red().to_string(),
        AlertBorder::Neutral => view.alert.label.dimmed().to_string(),
    };
    if view.alert.flashing {
        alert = alert.blink().to_string();
    }
    if let Some(message) = &view.alert.message {
        alert = format!("{} {}", alert, message);
    }

    format!(
        "MISSION STATUS {}  |  {}  |  LINK {}",
        mission,
        alert,
        paint_session(session)
    )
}

/// Depth, battery and hull pressure readouts.
pub fn format_readouts(view: &DashboardView) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Depth (m)", "Battery (%)", "Hull Pressure (kPa)"]);
    table.add_row(vec![
        Cell::new(&view.readouts.depth),
        Cell::new(&view.readouts.battery),
        Cell::new(&view.readouts.hull_pressure),
    ]);
    table.to_string()
}

/// System overview: one row per rendered node, then the edges.
pub fn format_overview(view: &DashboardView) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["System", "Status", "Value"]);

    for node in &view.graph.nodes {
        table.add_row(vec![
            Cell::new(node.label),
            Cell::new(paint_status(node.status)),
            Cell::new(&node.value),
        ]);
    }

    let links: Vec<String> = view
        .graph
        .edges
        .iter()
        .map(|edge| format!("{} -> {} ({})", edge.source, edge.target, edge.color))
        .collect();

    format!("{}\n{}", table, links.join("\n"))
}

/// Subsystem control cards.
///
/// `jettison` is the guarded button as currently decorated.
pub fn format_controls(view: &DashboardView, jettison: &ButtonView) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Subsystem", "Status", "Actions"]);

    let cards = [
        (
            "Propulsion",
            Subsystem::Propulsion,
            button_cell(&view.controls.propulsion),
        ),
        (
            "Manipulator Arm",
            Subsystem::Manipulator,
            format!(
                "{} {}",
                button_cell(&view.controls.deploy_arm),
                button_cell(&view.controls.collect_sample)
            ),
        ),
        ("Science Package", Subsystem::SciencePackage, button_cell(jettison)),
    ];

    for (name, subsystem, actions) in cards {
        let status = view
            .subsystem(subsystem)
            .map(|s| format!("{} ({})", s.value, paint_status(s.status)))
            .unwrap_or_default();
        table.add_row(vec![Cell::new(name), Cell::new(status), Cell::new(actions)]);
    }

    table.to_string()
}

/// Whole dashboard for the current phase.
pub fn render_dashboard(
    view: &DashboardView,
    session: SessionState,
    jettison: &ButtonView,
) -> String {
    let mut out = Vec::new();
    out.push(format_header(view, session));
    out.push(format_readouts(view));

    match view.phase {
        MissionPhase::Standby => {
            out.push("Select a Simulation Scenario".bold().to_string());
            for (label, command) in MissionPhase::scenario_choices() {
                out.push(format!("  [{}]  ({})", label, command));
            }
        }
        MissionPhase::Operational => {
            for tab in OperationalTab::ALL {
                out.push(tab.label().bold().to_string());
                out.push(match tab {
                    OperationalTab::SystemOverview => format_overview(view),
                    OperationalTab::SubsystemControls => format_controls(view, jettison),
                });
            }
        }
        MissionPhase::Ended => {
            out.push(
                format!("Mission ended: {}", view.mission_status.text)
                    .bold()
                    .to_string(),
            );
            out.push(format!("  [{}]", MissionPhase::RETURN_LABEL));
        }
    }

    out.push(format!("Alerts: {}", view.alert_feed));
    out.join("\n")
}

fn paint_level(level: LogLevel) -> String {
    let text = level.to_string();
    match level {
        LogLevel::Info => text.blue().to_string(),
        LogLevel::Warning => text.yellow().to_string(),
        LogLevel::Critical => text.red().to_string(),
        LogLevel::Operator => text.dimmed().to_string(),
    }
}

/// Format the mission log as a table, or its placeholder.
pub fn format_log_table(state: &MissionLogState) -> String {
    if let Some(placeholder) = state.placeholder() {
        return placeholder.to_string();
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Time", "Level", "Message"]);

    for entry in state.entries() {
        table.add_row(vec![
            Cell::new(&entry.timestamp),
            Cell::new(paint_level(entry.level)),
            Cell::new(&entry.message),
        ]);
    }

    table.to_string()
}

/// Format mission log entries as JSON
pub fn format_log_json(entries: &[LogEntry]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({ "entries": entries }))
}
