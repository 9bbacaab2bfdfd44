//! Shared test utilities for Odyssey integration tests.
//!
//! Provides a mock simulator that speaks the telemetry WebSocket protocol,
//! telemetry frame builders, and helpers for waiting on store updates.

#![allow(dead_code)]

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use futures::{SinkExt, StreamExt};
use odyssey::config::SimulatorConfig;
use odyssey::store::TelemetryStore;
use odyssey::wire::TelemetrySnapshot;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex, Notify};

// =============================================================================
// Frame Builders
// =============================================================================

/// A full, valid telemetry frame for an operational ROV.
pub fn base_frame() -> Value {
    json!({
        "timestamp": "2025-06-01T12:00:00.000Z",
        "rov_state": {
            "power": {"charge_percent": 98.5, "status": "discharging"},
            "propulsion": {"power_level_percent": 0.0, "status": "inactive"},
            "hull_integrity": {"hull_pressure_kpa": 101, "status": "nominal"},
            "manipulator_arm": {"status": "stowed", "sample_collected": false},
            "science_package": {"status": "attached"},
            "environment": {"depth_meters": 12.0, "water_temp_celsius": 17.5}
        },
        "mission_state": {"status": "descending", "operator_override": false},
        "alert": {"active": false, "severity": null, "message": null}
    })
}

/// `base_frame` with `edit` applied, serialised.
pub fn frame_with(edit: impl FnOnce(&mut Value)) -> String {
    let mut frame = base_frame();
    edit(&mut frame);
    frame.to_string()
}

// =============================================================================
// Mock Simulator
// =============================================================================

enum Push {
    Frame(String),
    Close,
}

#[derive(Clone)]
struct MockState {
    pushes: Arc<Mutex<Option<mpsc::UnboundedReceiver<Push>>>>,
    received: mpsc::UnboundedSender<String>,
    connected: Arc<Notify>,
}

/// Single-connection simulator bound to an ephemeral port.
///
/// Frames pushed before the dashboard connects are buffered and delivered
/// in order once it does. Text frames the dashboard sends are recorded.
pub struct MockSimulator {
    pub addr: SocketAddr,
    pushes: mpsc::UnboundedSender<Push>,
    received: mpsc::UnboundedReceiver<String>,
    connected: Arc<Notify>,
}

impl MockSimulator {
    pub async fn start() -> Self {
        let (push_tx, push_rx) = mpsc::unbounded_channel();
        let (received_tx, received_rx) = mpsc::unbounded_channel();
        let connected = Arc::new(Notify::new());

        let state = MockState {
            pushes: Arc::new(Mutex::new(Some(push_rx))),
            received: received_tx,
            connected: Arc::clone(&connected),
        };

        let app = Router::new()
            .route("/ws/telemetry", get(ws_handler))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            pushes: push_tx,
            received: received_rx,
            connected,
        }
    }

    /// Simulator config pointing at this mock.
    pub fn config(&self) -> SimulatorConfig {
        SimulatorConfig {
            host: self.addr.to_string(),
            connect_timeout_seconds: 2,
            ..SimulatorConfig::default()
        }
    }

    pub fn push(&self, frame: impl Into<String>) {
        let _ = self.pushes.send(Push::Frame(frame.into()));
    }

    /// Close the connection from the simulator side.
    pub fn close(&self) {
        let _ = self.pushes.send(Push::Close);
    }

    /// Wait until the dashboard has connected.
    pub async fn wait_connected(&self) {
        tokio::time::timeout(Duration::from_secs(2), self.connected.notified())
            .await
            .expect("dashboard never connected");
    }

    /// Next command frame sent by the dashboard, parsed as JSON.
    pub async fn next_command(&mut self) -> Value {
        let raw = tokio::time::timeout(Duration::from_secs(2), self.received.recv())
            .await
            .expect("no command received")
            .expect("mock simulator stopped");
        serde_json::from_str(&raw).unwrap()
    }

    /// Commands received so far without waiting.
    pub fn drain_commands(&mut self) -> Vec<Value> {
        let mut commands = Vec::new();
        while let Ok(raw) = self.received.try_recv() {
            commands.push(serde_json::from_str(&raw).unwrap());
        }
        commands
    }
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<MockState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: MockState) {
    let Some(mut pushes) = state.pushes.lock().await.take() else {
        return;
    };
    state.connected.notify_one();

    let (mut tx, mut rx) = socket.split();
    loop {
        tokio::select! {
            push = pushes.recv() => match push {
                Some(Push::Frame(frame)) => {
                    if tx.send(Message::Text(frame)).await.is_err() {
                        break;
                    }
                }
                Some(Push::Close) | None => {
                    let _ = tx.send(Message::Close(None)).await;
                    break;
                }
            },
            inbound = rx.next() => match inbound {
                Some(Ok(Message::Text(text))) => {
                    let _ = state.received.send(text);
                }
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
        }
    }
}

/// An address nothing listens on.
pub async fn unused_addr() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

// =============================================================================
// Store Helpers
// =============================================================================

/// Wait until `predicate` holds for the store's snapshot.
pub async fn wait_for_snapshot(
    store: &TelemetryStore,
    predicate: impl Fn(&TelemetrySnapshot) -> bool,
) -> Arc<TelemetrySnapshot> {
    tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            let snapshot = store.get();
            if predicate(&snapshot) {
                return snapshot;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("store never reached the expected snapshot")
}
