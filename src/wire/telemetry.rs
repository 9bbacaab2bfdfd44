//! Telemetry snapshot schema.
//!
//! Status fields are open enums: every documented value has its own variant
//! and anything else is carried verbatim in `Unknown`, so a frame with a
//! surprising status is still accepted and re-encodes unchanged.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::lenient;

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            /// Value outside the documented set, kept verbatim
            Unknown(String),
        }

        impl $name {
            /// Wire representation of this value.
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $wire,)+
                    Self::Unknown(raw) => raw,
                }
            }

            /// Whether the value belongs to the documented set.
            pub fn is_known(&self) -> bool {
                !matches!(self, Self::Unknown(_))
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                match raw.as_str() {
                    $($wire => Self::$variant,)+
                    _ => Self::Unknown(raw),
                }
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self::from(raw.to_string())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Unknown(raw) => raw,
                    known => known.as_str().to_string(),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum! {
    /// Battery state reported by the power system.
    pub enum PowerStatus {
        Discharging => "discharging",
        Fault => "fault",
    }
}

wire_enum! {
    /// Thruster state.
    pub enum PropulsionStatus {
        Active => "active",
        Inactive => "inactive",
    }
}

wire_enum! {
    /// Hull integrity classification computed by the simulator.
    pub enum HullStatus {
        Nominal => "nominal",
        Warning => "warning",
        Critical => "critical",
    }
}

wire_enum! {
    /// Manipulator arm position.
    pub enum ArmStatus {
        Stowed => "stowed",
        Deployed => "deployed",
        Gripping => "gripping",
    }
}

wire_enum! {
    /// Whether the science package is still carried.
    pub enum PackageStatus {
        Attached => "attached",
        Jettisoned => "jettisoned",
    }
}

wire_enum! {
    /// Mission state machine position, owned by the simulator.
    pub enum MissionStatus {
        Standby => "standby",
        EnRoute => "en_route",
        Searching => "searching",
        Returning => "returning",
        MissionSuccess => "mission_success",
        EmergencyAscent => "emergency_ascent",
        MissionFailureHullBreach => "mission_failure_hull_breach",
        MissionFailureLostSignal => "mission_failure_lost_signal",
    }
}

wire_enum! {
    /// Severity of the active alert.
    pub enum AlertSeverity {
        Info => "INFO",
        Warning => "WARNING",
        Critical => "CRITICAL",
    }
}

/// Complete simulator state at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    /// ISO-8601 UTC timestamp, kept as sent
    pub timestamp: String,
    pub rov_state: RovState,
    pub mission_state: MissionState,
    pub alert: Alert,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RovState {
    pub power: Power,
    pub propulsion: Propulsion,
    pub hull_integrity: HullIntegrity,
    pub manipulator_arm: ManipulatorArm,
    pub science_package: SciencePackage,
    pub environment: Environment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Power {
    #[serde(default, deserialize_with = "lenient::number")]
    pub charge_percent: Option<f64>,
    pub status: PowerStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Propulsion {
    #[serde(default, deserialize_with = "lenient::number")]
    pub power_level_percent: Option<f64>,
    pub status: PropulsionStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HullIntegrity {
    #[serde(default, deserialize_with = "lenient::unsigned")]
    pub hull_pressure_kpa: Option<u64>,
    pub status: HullStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManipulatorArm {
    pub status: ArmStatus,
    pub sample_collected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SciencePackage {
    pub status: PackageStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    #[serde(default, deserialize_with = "lenient::number")]
    pub depth_meters: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub water_temp_celsius: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionState {
    pub status: MissionStatus,
    #[serde(default)]
    pub operator_override: bool,
}

/// Master alert. `severity` and `message` are expected to be present
/// exactly when `active` is true, but either combination decodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub active: bool,
    #[serde(default)]
    pub severity: Option<AlertSeverity>,
    #[serde(default)]
    pub message: Option<String>,
}

impl Alert {
    /// No active alert.
    pub fn idle() -> Self {
        Self {
            active: false,
            severity: None,
            message: None,
        }
    }

    /// An active alert with the given severity and message.
    pub fn raised(severity: AlertSeverity, message: impl Into<String>) -> Self {
        Self {
            active: true,
            severity: Some(severity),
            message: Some(message.into()),
        }
    }
}

impl TelemetrySnapshot {
    /// Powered-but-idle ROV waiting in standby, stamped with the current time.
    ///
    /// # Examples
    ///
    /// ```
    /// use odyssey::wire::{MissionStatus, TelemetrySnapshot};
    ///
    /// let snapshot = TelemetrySnapshot::standby();
    /// assert_eq!(snapshot.rov_state.power.charge_percent, Some(100.0));
    /// assert_eq!(snapshot.mission_state.status, MissionStatus::Standby);
    /// assert!(!snapshot.alert.active);
    /// ```
    pub fn standby() -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            rov_state: RovState {
                power: Power {
                    charge_percent: Some(100.0),
                    status: PowerStatus::Discharging,
                },
                propulsion: Propulsion {
                    power_level_percent: Some(0.0),
                    status: PropulsionStatus::Inactive,
                },
                hull_integrity: HullIntegrity {
                    hull_pressure_kpa: Some(0),
                    status: HullStatus::Nominal,
                },
                manipulator_arm: ManipulatorArm {
                    status: ArmStatus::Stowed,
                    sample_collected: false,
                },
                science_package: SciencePackage {
                    status: PackageStatus::Attached,
                },
                environment: Environment {
                    depth_meters: Some(0.0),
                    water_temp_celsius: Some(18.0),
                },
            },
            mission_state: MissionState {
                status: MissionStatus::Standby,
                operator_override: false,
            },
            alert: Alert::idle(),
        }
    }

    /// Parsed timestamp. RFC 3339 is expected; an ISO-8601 value without
    /// an offset is read as UTC.
    pub fn parsed_timestamp(&self) -> Option<chrono::DateTime<Utc>> {
        if let Ok(ts) = chrono::DateTime::parse_from_rfc3339(&self.timestamp) {
            return Some(ts.with_timezone(&Utc));
        }
        chrono::NaiveDateTime::parse_from_str(&self.timestamp, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }
}

impl Default for TelemetrySnapshot {
    fn default() -> Self {
        Self::standby()
    }
}
