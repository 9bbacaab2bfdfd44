//! Interactive operator console
//!
//! Reads one command per line from stdin and applies the same gating as the
//! dashboard: scenario selection only in standby, subsystem controls only
//! while operational, and a two-step confirmation for jettison.

use crate::cli::output::{format_header, format_log_table, render_dashboard};
use crate::cli::{apply_color_choice, load_config_with_overrides, ConsoleArgs};
use crate::client::SimulatorClient;
use crate::logging::init_tracing;
use crate::mission_log;
use crate::session::{Session, SessionState};
use crate::store::{SendOutcome, TelemetryStore};
use crate::view::{
    click_jettison, ButtonView, DashboardView, GuardedAction, JettisonClick, MissionPhase,
};
use crate::wire::{Command, PropulsionSetting, Scenario};
use std::str::FromStr;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::Notify;
use tokio::time::Instant;

const HELP: &str = "\
Commands:
  start <nominal|pressure_anomaly|power_fault>   Start a scenario (standby only)
  engage | disengage | propulsion                 Set or toggle propulsion
  deploy                                          Deploy the manipulator arm
  collect                                         Collect a sample
  jettison                                        Jettison the science package (twice to confirm)
  reset                                           Return to the scenario selector (mission ended)
  status                                          Show the full dashboard
  log                                             Show the mission log
  help                                            Show this help
  quit | exit                                     Leave the console";

/// One parsed console line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleInput {
    Start(Scenario),
    Engage,
    Disengage,
    TogglePropulsion,
    Deploy,
    Collect,
    Jettison,
    Reset,
    Status,
    Log,
    Help,
    Quit,
}

impl FromStr for ConsoleInput {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let Some(verb) = words.next() else {
            return Err("Empty command".to_string());
        };

        let input = match verb.to_lowercase().as_str() {
            "start" => {
                let scenario = words
                    .next()
                    .ok_or_else(|| "Usage: start <scenario>".to_string())?;
                ConsoleInput::Start(scenario.parse()?)
            }
            "engage" => ConsoleInput::Engage,
            "disengage" => ConsoleInput::Disengage,
            "propulsion" => ConsoleInput::TogglePropulsion,
            "deploy" => ConsoleInput::Deploy,
            "collect" => ConsoleInput::Collect,
            "jettison" => ConsoleInput::Jettison,
            "reset" | "return" => ConsoleInput::Reset,
            "status" => ConsoleInput::Status,
            "log" => ConsoleInput::Log,
            "help" | "?" => ConsoleInput::Help,
            "quit" | "exit" => ConsoleInput::Quit,
            other => return Err(format!("Unknown command: {} (try 'help')", other)),
        };

        if words.next().is_some() {
            return Err(format!("Too many arguments for '{}'", verb));
        }
        Ok(input)
    }
}

/// What the console loop should do after a line was dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Message(String),
    ShowStatus,
    ShowLog,
    Help,
    Quit,
}

fn sent_message(command: Command, outcome: SendOutcome) -> Reply {
    match outcome {
        SendOutcome::Sent => Reply::Message(format!("✓ Sent {}", command)),
        SendOutcome::Dropped => Reply::Message(format!(
            "✗ {} dropped: no open simulator session",
            command.name()
        )),
    }
}

fn press(button: &ButtonView, store: &TelemetryStore) -> Reply {
    match button.press(store) {
        Some(outcome) => sent_message(button.command, outcome),
        None => Reply::Message(format!("{} is not available right now", button.label)),
    }
}

fn require_phase(view: &DashboardView, phase: MissionPhase) -> Result<(), Reply> {
    if view.phase == phase {
        Ok(())
    } else {
        Err(Reply::Message(format!(
            "Not available while the mission is {}",
            view.phase
        )))
    }
}

/// Apply one console input against the store's current snapshot.
pub fn dispatch(
    input: ConsoleInput,
    store: &TelemetryStore,
    guard: &mut GuardedAction,
    now: Instant,
) -> Reply {
    let view = DashboardView::current(store);

    let gate = match input {
        ConsoleInput::Start(_) => require_phase(&view, MissionPhase::Standby),
        ConsoleInput::Reset => require_phase(&view, MissionPhase::Ended),
        ConsoleInput::Engage
        | ConsoleInput::Disengage
        | ConsoleInput::TogglePropulsion
        | ConsoleInput::Deploy
        | ConsoleInput::Collect
        | ConsoleInput::Jettison => require_phase(&view, MissionPhase::Operational),
        ConsoleInput::Status | ConsoleInput::Log | ConsoleInput::Help | ConsoleInput::Quit => {
            Ok(())
        }
    };
    if let Err(reply) = gate {
        return reply;
    }

    match input {
        ConsoleInput::Start(scenario) => {
            let command = Command::StartSimulation { scenario };
            sent_message(command, store.send_command(command))
        }
        ConsoleInput::Reset => {
            let command = MissionPhase::return_command();
            sent_message(command, store.send_command(command))
        }
        ConsoleInput::TogglePropulsion => press(&view.controls.propulsion, store),
        ConsoleInput::Engage | ConsoleInput::Disengage => {
            let (wanted, state) = if input == ConsoleInput::Engage {
                (PropulsionSetting::Active, "engaged")
            } else {
                (PropulsionSetting::Inactive, "disengaged")
            };
            let requested = Command::SetPropulsionState { status: wanted };
            if view.controls.propulsion.command == requested {
                press(&view.controls.propulsion, store)
            } else {
                Reply::Message(format!("Propulsion already {}", state))
            }
        }
        ConsoleInput::Deploy => press(&view.controls.deploy_arm, store),
        ConsoleInput::Collect => press(&view.controls.collect_sample, store),
        ConsoleInput::Jettison => match click_jettison(store, guard, now) {
            JettisonClick::Disabled => {
                Reply::Message("Science package already jettisoned".to_string())
            }
            JettisonClick::Armed => Reply::Message(format!(
                "{}: type 'jettison' again within {}s",
                guard.decorate(view.controls.jettison.clone(), now).label,
                guard.timeout().as_secs_f32()
            )),
            JettisonClick::Sent(outcome) => sent_message(Command::JettisonPackage, outcome),
        },
        ConsoleInput::Status => Reply::ShowStatus,
        ConsoleInput::Log => Reply::ShowLog,
        ConsoleInput::Help => Reply::Help,
        ConsoleInput::Quit => Reply::Quit,
    }
}

/// Handle `odyssey console` command
pub async fn handle_console(args: &ConsoleArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config_with_overrides(&args.simulator)?;
    init_tracing(&config.logging)?;
    apply_color_choice(&config, args.no_color);

    let client = SimulatorClient::new(&config.simulator)?;
    let store = TelemetryStore::global().clone();
    let session = Session::mount(&config.simulator, store.clone());
    tracing::info!(session_id = session.id(), "Operator console started");

    // Only the header is echoed on change; `status` prints the rest
    let changed = Arc::new(Notify::new());
    let listener = Arc::clone(&changed);
    let _subscription = store.subscribe(
        |snapshot| {
            let view = DashboardView::derive(snapshot);
            (view.phase, view.alert, view.mission_status)
        },
        move |_| listener.notify_one(),
    );

    let mut guard = GuardedAction::jettison(config.console.jettison_confirm_timeout());
    let mut state = session.subscribe_state();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", HELP);
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                let input = match line.parse::<ConsoleInput>() {
                    Ok(input) => input,
                    Err(e) => {
                        println!("{}", e);
                        continue;
                    }
                };

                match dispatch(input, &store, &mut guard, Instant::now()) {
                    Reply::Message(message) => println!("{}", message),
                    Reply::ShowStatus => {
                        let view = DashboardView::current(&store);
                        let jettison =
                            guard.decorate(view.controls.jettison.clone(), Instant::now());
                        println!("{}", render_dashboard(&view, session.state(), &jettison));
                    }
                    Reply::ShowLog => {
                        println!("{}", mission_log::LOADING_MESSAGE);
                        let log = mission_log::load(&client).await;
                        println!("{}", format_log_table(&log));
                    }
                    Reply::Help => println!("{}", HELP),
                    Reply::Quit => break,
                }
            }
            _ = changed.notified() => {
                println!("{}", format_header(&DashboardView::current(&store), session.state()));
            }
            result = state.changed() => {
                let current = session.state();
                println!("Link {}", current);
                if result.is_err() || current == SessionState::Closed {
                    break;
                }
            }
        }
    }

    session.unmount().await?;
    Ok(())
}
