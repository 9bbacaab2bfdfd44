//! Session integration tests
//!
//! Drives a real session against a mock simulator over WebSockets and checks
//! the store, the derived view and the frames the simulator receives.

mod common;

use common::{frame_with, unused_addr, wait_for_snapshot, MockSimulator};
use odyssey::config::SimulatorConfig;
use odyssey::session::{Session, SessionError, SessionState};
use odyssey::store::{SendOutcome, TelemetryStore};
use odyssey::view::{
    click_jettison, DashboardView, DisplayStatus, GuardedAction, JettisonClick, MissionPhase,
    Subsystem,
};
use odyssey::wire::{
    self, ArmStatus, Command, MissionStatus, PackageStatus, PowerStatus, Scenario,
};
use serde_json::json;
use std::time::Duration;
use tokio::time::Instant;

async fn open_session(sim: &MockSimulator, store: &TelemetryStore) -> Session {
    let session = Session::mount(&sim.config(), store.clone());
    assert_eq!(session.wait_for(SessionState::Open).await, SessionState::Open);
    session
}

#[tokio::test]
async fn test_initial_mount_shows_standby_defaults() {
    let sim = MockSimulator::start().await;
    let store = TelemetryStore::new();
    let session = Session::mount(&sim.config(), store.clone());

    // Nothing pushed yet
    let view = DashboardView::current(&store);
    assert_eq!(view.phase, MissionPhase::Standby);
    assert_eq!(view.alert.label, "IDLE");
    assert_eq!(store.get().rov_state.power.charge_percent, Some(100.0));

    session.unmount().await.unwrap();
}

#[tokio::test]
async fn test_scenario_selection_sends_one_start_frame() {
    let mut sim = MockSimulator::start().await;
    let store = TelemetryStore::new();
    let session = open_session(&sim, &store).await;

    sim.push(frame_with(|f| f["mission_state"]["status"] = json!("standby")));
    wait_for_snapshot(&store, |s| s.timestamp == "2025-06-01T12:00:00.000Z").await;

    let (_, command) = MissionPhase::scenario_choices()
        .find(|(label, _)| *label == "Nominal Mission")
        .unwrap();
    assert_eq!(store.send_command(command), SendOutcome::Sent);

    assert_eq!(
        sim.next_command().await,
        json!({"command": "START_SIMULATION", "payload": {"scenario": "nominal"}})
    );
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(sim.drain_commands().is_empty());

    session.unmount().await.unwrap();
}

#[tokio::test]
async fn test_power_fault_frame_reaches_view() {
    let sim = MockSimulator::start().await;
    let store = TelemetryStore::new();
    let session = open_session(&sim, &store).await;

    sim.push(frame_with(|f| {
        f["rov_state"]["power"]["status"] = json!("fault");
        f["alert"] = json!({"active": true, "severity": "CRITICAL", "message": "Bus fault"});
    }));
    wait_for_snapshot(&store, |s| s.rov_state.power.status == PowerStatus::Fault).await;

    let view = DashboardView::current(&store);
    assert_eq!(view.subsystem(Subsystem::Power).unwrap().status, DisplayStatus::Critical);
    assert_eq!(view.subsystem(Subsystem::MainBus).unwrap().status, DisplayStatus::Critical);
    assert!(view.alert.flashing);
    assert_eq!(view.alert.message.as_deref(), Some("Bus fault"));

    session.unmount().await.unwrap();
}

#[tokio::test]
async fn test_hull_pressure_renders_in_bar() {
    let sim = MockSimulator::start().await;
    let store = TelemetryStore::new();
    let session = open_session(&sim, &store).await;

    sim.push(frame_with(|f| {
        f["rov_state"]["hull_integrity"] = json!({"hull_pressure_kpa": 250, "status": "warning"});
    }));
    wait_for_snapshot(&store, |s| s.rov_state.hull_integrity.hull_pressure_kpa == Some(250)).await;

    let view = DashboardView::current(&store);
    let hull = view.subsystem(Subsystem::Hull).unwrap();
    assert_eq!(hull.value, "2.5 bar");
    assert_eq!(hull.status, DisplayStatus::Warning);

    session.unmount().await.unwrap();
}

#[tokio::test]
async fn test_collect_sample_between_frames() {
    let mut sim = MockSimulator::start().await;
    let store = TelemetryStore::new();
    let session = open_session(&sim, &store).await;

    sim.push(frame_with(|f| f["rov_state"]["manipulator_arm"]["status"] = json!("deployed")));
    wait_for_snapshot(&store, |s| s.rov_state.manipulator_arm.status == ArmStatus::Deployed).await;

    let view = DashboardView::current(&store);
    assert_eq!(
        view.controls.collect_sample.press(&store),
        Some(SendOutcome::Sent)
    );
    assert_eq!(sim.next_command().await, json!({"command": "COLLECT_SAMPLE"}));

    sim.push(frame_with(|f| {
        f["timestamp"] = json!("2025-06-01T12:00:01.000Z");
        f["rov_state"]["manipulator_arm"] = json!({"status": "deployed", "sample_collected": true});
    }));
    wait_for_snapshot(&store, |s| s.rov_state.manipulator_arm.sample_collected).await;

    let view = DashboardView::current(&store);
    let arm = view.subsystem(Subsystem::Manipulator).unwrap();
    assert_eq!(arm.status, DisplayStatus::Success);
    assert_eq!(arm.value, "Sample Stored");

    session.unmount().await.unwrap();
}

#[tokio::test]
async fn test_jettisoned_package_leaves_graph() {
    let sim = MockSimulator::start().await;
    let store = TelemetryStore::new();
    let session = open_session(&sim, &store).await;

    sim.push(frame_with(|f| f["rov_state"]["science_package"]["status"] = json!("jettisoned")));
    wait_for_snapshot(&store, |s| {
        s.rov_state.science_package.status == PackageStatus::Jettisoned
    })
    .await;

    let view = DashboardView::current(&store);
    assert!(!view.graph.contains(Subsystem::SciencePackage));
    assert!(view.graph.edge("bus-science").is_none());
    assert!(!view.controls.jettison.enabled);

    let mut guard = GuardedAction::default();
    assert_eq!(
        click_jettison(&store, &mut guard, Instant::now()),
        JettisonClick::Disabled
    );

    session.unmount().await.unwrap();
}

#[tokio::test]
async fn test_guarded_jettison_reaches_simulator_once() {
    let mut sim = MockSimulator::start().await;
    let store = TelemetryStore::new();
    let session = open_session(&sim, &store).await;

    let mut guard = GuardedAction::default();
    let start = Instant::now();
    assert_eq!(click_jettison(&store, &mut guard, start), JettisonClick::Armed);
    assert_eq!(
        click_jettison(&store, &mut guard, start + Duration::from_millis(100)),
        JettisonClick::Sent(SendOutcome::Sent)
    );

    assert_eq!(sim.next_command().await, json!({"command": "JETTISON_PACKAGE"}));
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(sim.drain_commands().is_empty());

    session.unmount().await.unwrap();
}

#[tokio::test]
async fn test_inbound_frame_replaces_snapshot() {
    let sim = MockSimulator::start().await;
    let store = TelemetryStore::new();
    let session = open_session(&sim, &store).await;

    let raw = frame_with(|f| f["mission_state"]["status"] = json!("returning"));
    sim.push(raw.clone());
    let snapshot =
        wait_for_snapshot(&store, |s| s.mission_state.status == MissionStatus::Returning).await;

    assert_eq!(*snapshot, wire::decode_snapshot(&raw).unwrap());

    session.unmount().await.unwrap();
}

#[tokio::test]
async fn test_malformed_frame_is_discarded() {
    let sim = MockSimulator::start().await;
    let store = TelemetryStore::new();
    let session = open_session(&sim, &store).await;

    sim.push(frame_with(|f| f["mission_state"]["status"] = json!("searching")));
    wait_for_snapshot(&store, |s| s.mission_state.status == MissionStatus::Searching).await;

    sim.push("not json");
    sim.push(frame_with(|f| {
        f.as_object_mut().unwrap().remove("rov_state");
    }));
    sim.push(frame_with(|f| {
        f["timestamp"] = json!("2025-06-01T12:00:09.000Z");
        f["mission_state"]["status"] = json!("sampling");
    }));
    let snapshot =
        wait_for_snapshot(&store, |s| s.mission_state.status == MissionStatus::Sampling).await;

    // Only the last good frame landed, and the session survived the bad ones
    assert_eq!(snapshot.timestamp, "2025-06-01T12:00:09.000Z");
    assert_eq!(session.state(), SessionState::Open);

    session.unmount().await.unwrap();
}

#[tokio::test]
async fn test_commands_outside_open_never_reach_transport() {
    let mut sim = MockSimulator::start().await;
    let store = TelemetryStore::new();

    // Before any session
    assert_eq!(store.send_command(Command::DeployArm), SendOutcome::Dropped);

    let session = open_session(&sim, &store).await;
    sim.close();
    assert_eq!(session.wait_for(SessionState::Closed).await, SessionState::Closed);

    // After the simulator closed the link
    assert_eq!(store.send_command(Command::CollectSample), SendOutcome::Dropped);
    session.unmount().await.unwrap();

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(sim.drain_commands().is_empty());
}

#[tokio::test]
async fn test_closed_session_keeps_last_snapshot() {
    let sim = MockSimulator::start().await;
    let store = TelemetryStore::new();
    let session = open_session(&sim, &store).await;

    sim.push(frame_with(|f| f["mission_state"]["status"] = json!("searching")));
    wait_for_snapshot(&store, |s| s.mission_state.status == MissionStatus::Searching).await;

    sim.close();
    assert_eq!(session.wait_for(SessionState::Closed).await, SessionState::Closed);
    assert_eq!(store.get().mission_state.status, MissionStatus::Searching);

    session.unmount().await.unwrap();
}

#[tokio::test]
async fn test_connect_failure_closes_session() {
    let store = TelemetryStore::new();
    let config = SimulatorConfig {
        host: unused_addr().await.to_string(),
        connect_timeout_seconds: 2,
        ..SimulatorConfig::default()
    };

    let session = Session::mount(&config, store.clone());
    assert_eq!(session.wait_for(SessionState::Open).await, SessionState::Closed);
    assert_eq!(
        store.send_command(Command::StartSimulation {
            scenario: Scenario::Nominal
        }),
        SendOutcome::Dropped
    );

    let err = session.unmount().await.unwrap_err();
    assert!(matches!(
        err,
        SessionError::Connect { .. } | SessionError::ConnectTimeout { .. }
    ));
}

#[tokio::test]
async fn test_unmount_while_connecting() {
    let sim = MockSimulator::start().await;
    let store = TelemetryStore::new();

    let session = Session::mount(&sim.config(), store.clone());
    assert_eq!(session.state(), SessionState::Connecting);
    let mut state = session.subscribe_state();

    session.unmount().await.unwrap();
    assert_eq!(*state.borrow_and_update(), SessionState::Closed);
}

#[tokio::test]
async fn test_unmount_flushes_queued_commands() {
    let mut sim = MockSimulator::start().await;
    let store = TelemetryStore::new();
    let session = open_session(&sim, &store).await;
    sim.wait_connected().await;

    store.send_command(Command::DeployArm);
    store.send_command(Command::CollectSample);
    session.unmount().await.unwrap();

    assert_eq!(sim.next_command().await, json!({"command": "DEPLOY_ARM"}));
    assert_eq!(sim.next_command().await, json!({"command": "COLLECT_SAMPLE"}));
    assert_eq!(store.send_command(Command::DeployArm), SendOutcome::Dropped);
}

#[tokio::test]
async fn test_second_session_sink_survives_first_unmount() {
    let mut first_sim = MockSimulator::start().await;
    let mut second_sim = MockSimulator::start().await;
    let store = TelemetryStore::new();

    let first = open_session(&first_sim, &store).await;
    let second = open_session(&second_sim, &store).await;

    first.unmount().await.unwrap();
    assert_eq!(store.send_command(Command::DeployArm), SendOutcome::Sent);
    assert_eq!(second_sim.next_command().await, json!({"command": "DEPLOY_ARM"}));

    second.unmount().await.unwrap();
    assert!(first_sim.drain_commands().is_empty());
}
