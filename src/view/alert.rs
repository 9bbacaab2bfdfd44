use crate::wire::{Alert, AlertSeverity, TelemetrySnapshot};

/// Border style of the master alert indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertBorder {
    Neutral,
    Info,
    Warning,
    Critical,
}

/// Master alert indicator in the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MasterAlert {
    /// Severity text while active, otherwise `IDLE`
    pub label: String,
    pub message: Option<String>,
    pub border: AlertBorder,
    pub flashing: bool,
}

impl MasterAlert {
    pub const IDLE_LABEL: &'static str = "IDLE";

    /// An inactive alert renders as idle even if the frame still carries a
    /// severity or message from the previous alert.
    pub fn derive(alert: &Alert) -> Self {
        if !alert.active {
            return Self {
                label: Self::IDLE_LABEL.to_string(),
                message: None,
                border: AlertBorder::Neutral,
                flashing: false,
            };
        }

        let (border, flashing) = match &alert.severity {
            Some(AlertSeverity::Info) => (AlertBorder::Info, false),
            Some(AlertSeverity::Warning) => (AlertBorder::Warning, true),
            Some(AlertSeverity::Critical) => (AlertBorder::Critical, true),
            Some(AlertSeverity::Unknown(_)) | None => (AlertBorder::Neutral, false),
        };

        let label = match &alert.severity {
            Some(severity) => severity.as_str().to_string(),
            None => Self::IDLE_LABEL.to_string(),
        };

        Self {
            label,
            message: alert.message.clone().filter(|message| !message.is_empty()),
            border,
            flashing,
        }
    }
}

/// One-line live alert feed.
///
/// `[YYYY-MM-DD HH:MM:SS] message` while an alert is active. The raw
/// timestamp is used when it does not parse.
pub fn alert_feed_line(snapshot: &TelemetrySnapshot) -> String {
    if !snapshot.alert.active {
        return "No active alerts".to_string();
    }

    let time = match snapshot.parsed_timestamp() {
        Some(parsed) => parsed.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => snapshot.timestamp.clone(),
    };

    format!(
        "[{}] {}",
        time,
        snapshot.alert.message.as_deref().unwrap_or_default()
    )
}
