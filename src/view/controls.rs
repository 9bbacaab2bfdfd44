use crate::store::{SendOutcome, TelemetryStore};
use crate::wire::{ArmStatus, Command, PackageStatus, PropulsionSetting, TelemetrySnapshot};
use std::time::Duration;
use tokio::time::Instant;

/// Default confirmation window of a guarded action.
pub const DEFAULT_CONFIRM_TIMEOUT: Duration = Duration::from_millis(3000);

/// A control button and the command it sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonView {
    pub label: &'static str,
    pub enabled: bool,
    /// Rendered in the destructive style
    pub destructive: bool,
    pub command: Command,
}

impl ButtonView {
    fn new(label: &'static str, enabled: bool, command: Command) -> Self {
        Self {
            label,
            enabled,
            destructive: false,
            command,
        }
    }

    /// Send the button's command. Returns `None` when the button is disabled.
    pub fn press(&self, store: &TelemetryStore) -> Option<SendOutcome> {
        if !self.enabled {
            tracing::debug!(button = self.label, "Ignoring press on disabled button");
            return None;
        }
        Some(store.send_command(self.command))
    }
}

/// Subsystem control cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Controls {
    pub propulsion: ButtonView,
    pub deploy_arm: ButtonView,
    pub collect_sample: ButtonView,
    /// Unarmed jettison button; see [`GuardedAction::decorate`] for the armed look
    pub jettison: ButtonView,
}

impl Controls {
    pub fn derive(snapshot: &TelemetrySnapshot) -> Self {
        let rov = &snapshot.rov_state;

        let toggle = PropulsionSetting::toggled_from(&rov.propulsion.status);
        let propulsion_label = match toggle {
            PropulsionSetting::Active => "Engage",
            PropulsionSetting::Inactive => "Disengage",
        };

        Self {
            propulsion: ButtonView::new(
                propulsion_label,
                true,
                Command::SetPropulsionState { status: toggle },
            ),
            deploy_arm: ButtonView::new(
                "Deploy Arm",
                rov.manipulator_arm.status == ArmStatus::Stowed,
                Command::DeployArm,
            ),
            collect_sample: ButtonView::new(
                "Collect Sample",
                rov.manipulator_arm.status == ArmStatus::Deployed,
                Command::CollectSample,
            ),
            jettison: ButtonView::new(
                "Jettison",
                rov.science_package.status != PackageStatus::Jettisoned,
                Command::JettisonPackage,
            ),
        }
    }
}

/// State of a guarded action at some instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Idle,
    Armed { deadline: Instant },
}

/// What a click on a guarded action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardClick {
    /// First click; a second one before the deadline confirms
    Armed,
    /// Second click in time; the action should run
    Confirmed,
}

/// Two-click confirmation for destructive commands.
///
/// Holds only a deadline: expiry is evaluated lazily against the instant
/// passed in, so there is no timer to cancel and dropping the guard simply
/// forgets an armed state.
///
/// # Examples
///
/// ```
/// use odyssey::view::{GuardClick, GuardedAction};
/// use std::time::Duration;
/// use tokio::time::Instant;
///
/// let mut guard = GuardedAction::new("Confirm Jettison", Duration::from_millis(3000));
/// let start = Instant::now();
///
/// assert_eq!(guard.click(start), GuardClick::Armed);
/// assert!(guard.is_armed(start + Duration::from_millis(2999)));
/// assert!(!guard.is_armed(start + Duration::from_millis(3001)));
/// ```
#[derive(Debug, Clone)]
pub struct GuardedAction {
    confirm_label: &'static str,
    timeout: Duration,
    state: GuardState,
}

impl GuardedAction {
    pub fn new(confirm_label: &'static str, timeout: Duration) -> Self {
        Self {
            confirm_label,
            timeout,
            state: GuardState::Idle,
        }
    }

    /// Guard for the science-package jettison button.
    pub fn jettison(timeout: Duration) -> Self {
        Self::new("Confirm Jettison", timeout)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// State at `now`; an armed guard past its deadline reads as idle.
    pub fn state(&self, now: Instant) -> GuardState {
        match self.state {
            GuardState::Armed { deadline } if now < deadline => self.state,
            _ => GuardState::Idle,
        }
    }

    pub fn is_armed(&self, now: Instant) -> bool {
        matches!(self.state(now), GuardState::Armed { .. })
    }

    pub fn click(&mut self, now: Instant) -> GuardClick {
        match self.state(now) {
            GuardState::Armed { .. } => {
                self.state = GuardState::Idle;
                GuardClick::Confirmed
            }
            GuardState::Idle => {
                self.state = GuardState::Armed {
                    deadline: now + self.timeout,
                };
                GuardClick::Armed
            }
        }
    }

    pub fn disarm(&mut self) {
        self.state = GuardState::Idle;
    }

    /// Apply the armed look to `button` while armed.
    pub fn decorate(&self, mut button: ButtonView, now: Instant) -> ButtonView {
        if button.enabled && self.is_armed(now) {
            button.label = self.confirm_label;
            button.destructive = true;
        }
        button
    }
}

impl Default for GuardedAction {
    fn default() -> Self {
        Self::jettison(DEFAULT_CONFIRM_TIMEOUT)
    }
}

/// Outcome of clicking the jettison button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JettisonClick {
    /// Package already gone, nothing happened
    Disabled,
    /// Waiting for confirmation
    Armed,
    /// Confirmed; `JETTISON_PACKAGE` was handed to the store
    Sent(SendOutcome),
}

/// Click the guarded jettison button against the store's current snapshot.
pub fn click_jettison(
    store: &TelemetryStore,
    guard: &mut GuardedAction,
    now: Instant,
) -> JettisonClick {
    let snapshot = store.get();
    if snapshot.rov_state.science_package.status == PackageStatus::Jettisoned {
        guard.disarm();
        return JettisonClick::Disabled;
    }

    match guard.click(now) {
        GuardClick::Armed => {
            tracing::debug!(
                timeout_ms = guard.timeout().as_millis() as u64,
                "Jettison armed, awaiting confirmation"
            );
            JettisonClick::Armed
        }
        GuardClick::Confirmed => JettisonClick::Sent(store.send_command(Command::JettisonPackage)),
    }
}
