//! Session task: connect, pump frames, tear down.

use super::error::{is_terminal, SessionError};
use super::sink::SessionSink;
use super::SessionState;
use crate::logging::{frame_preview, FRAME_PREVIEW_LEN};
use crate::store::{CommandSink, TelemetryStore};
use crate::wire::{self, TelemetrySnapshot, WireError};
use chrono::{DateTime, Utc};
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;

pub(super) struct Worker {
    url: String,
    connect_timeout: Duration,
    store: TelemetryStore,
    state: watch::Sender<SessionState>,
    last_timestamp: Option<DateTime<Utc>>,
}

impl Worker {
    pub(super) fn new(
        url: String,
        connect_timeout: Duration,
        store: TelemetryStore,
        state: watch::Sender<SessionState>,
    ) -> Self {
        state.send_replace(SessionState::Connecting);
        Self {
            url,
            connect_timeout,
            store,
            state,
            last_timestamp: None,
        }
    }

    pub(super) async fn run(mut self, cancel: CancellationToken) -> Result<(), SessionError> {
        tracing::debug!("Connecting to simulator");

        let connect = tokio::time::timeout(
            self.connect_timeout,
            tokio_tungstenite::connect_async(self.url.as_str()),
        );

        let stream = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Session unmounted before the connection opened");
                self.state.send_replace(SessionState::Closed);
                return Ok(());
            }
            result = connect => match result {
                Ok(Ok((stream, _response))) => stream,
                Ok(Err(e)) => {
                    tracing::warn!(error = %e, "Failed to connect to simulator");
                    self.state.send_replace(SessionState::Closed);
                    return Err(SessionError::Connect { url: self.url.clone(), source: e });
                }
                Err(_) => {
                    tracing::warn!(
                        timeout_seconds = self.connect_timeout.as_secs(),
                        "Timed out connecting to simulator"
                    );
                    self.state.send_replace(SessionState::Closed);
                    return Err(SessionError::ConnectTimeout {
                        url: self.url.clone(),
                        timeout: self.connect_timeout,
                    });
                }
            }
        };

        let (mut write, mut read) = stream.split();
        let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<String>();
        let sink: Arc<dyn CommandSink> =
            Arc::new(SessionSink::new(self.state.subscribe(), outbound_tx));

        self.store.set_command_sink(Arc::clone(&sink));
        self.state.send_replace(SessionState::Open);
        tracing::info!("Simulator session open");

        let result = loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Session unmounted, closing connection");
                    // Commands accepted while open still go out before the close frame
                    while let Ok(frame) = outbound_rx.try_recv() {
                        if let Err(e) = write.send(Message::Text(frame)).await {
                            tracing::warn!(error = %e, "Failed to flush queued command");
                            break;
                        }
                    }
                    if let Err(e) = write.send(Message::Close(None)).await {
                        tracing::debug!(error = %e, "Close frame not delivered");
                    }
                    break Ok(());
                }
                Some(frame) = outbound_rx.recv() => {
                    if let Err(e) = write.send(Message::Text(frame)).await {
                        if is_terminal(&e) {
                            tracing::warn!(error = %e, "Failed to send command, closing session");
                            break Err(SessionError::Transport(e));
                        }
                        tracing::warn!(error = %e, "Failed to send command");
                    }
                }
                inbound = read.next() => match inbound {
                    Some(Ok(Message::Text(text))) => {
                        self.accept(wire::decode_snapshot(&text), || text.clone());
                    }
                    Some(Ok(Message::Binary(bytes))) => {
                        self.accept(wire::decode_snapshot_bytes(&bytes), || {
                            String::from_utf8_lossy(&bytes).into_owned()
                        });
                    }
                    Some(Ok(Message::Close(frame))) => {
                        tracing::info!(close_frame = ?frame, "Simulator closed the session");
                        break Ok(());
                    }
                    // Pings are answered by the transport
                    Some(Ok(_)) => {}
                    Some(Err(e)) if is_terminal(&e) => {
                        tracing::warn!(error = %e, "Transport error, closing session");
                        break Err(SessionError::Transport(e));
                    }
                    Some(Err(e)) => {
                        tracing::warn!(error = %e, "Recoverable transport error");
                    }
                    None => {
                        tracing::info!("Simulator stream ended");
                        break Ok(());
                    }
                }
            }
        };

        self.teardown(&sink, &mut outbound_rx);
        result
    }

    /// Publish `Closed`, then release the store's sink.
    ///
    /// Commands still queued at this point never reach the simulator; they
    /// are logged and counted. Returns how many were discarded.
    fn teardown(
        &self,
        sink: &Arc<dyn CommandSink>,
        outbound_rx: &mut mpsc::UnboundedReceiver<String>,
    ) -> usize {
        self.state.send_replace(SessionState::Closed);
        self.store.uninstall_command_sink(sink);

        let mut discarded = 0;
        while let Ok(frame) = outbound_rx.try_recv() {
            tracing::warn!(
                frame = %frame_preview(&frame, FRAME_PREVIEW_LEN),
                "Session closed before queued command was sent"
            );
            discarded += 1;
        }
        tracing::info!("Simulator session closed");
        discarded
    }

    /// Apply one decoded frame, or log why it was discarded.
    fn accept(
        &mut self,
        decoded: Result<TelemetrySnapshot, WireError>,
        raw: impl FnOnce() -> String,
    ) {
        let snapshot = match decoded {
            Ok(snapshot) => snapshot,
            Err(e) => {
                metrics::counter!("odyssey_frames_rejected_total", "reason" => e.kind())
                    .increment(1);
                tracing::warn!(
                    error = %e,
                    frame = %frame_preview(&raw(), FRAME_PREVIEW_LEN),
                    "Discarding malformed telemetry frame"
                );
                return;
            }
        };

        if let Some(current) = snapshot.parsed_timestamp() {
            if let Some(previous) = self.last_timestamp {
                if current < previous {
                    tracing::warn!(
                        previous = %previous,
                        current = %current,
                        "Telemetry timestamp went backwards"
                    );
                }
            }
            self.last_timestamp = Some(current);
        }

        metrics::counter!("odyssey_frames_total").increment(1);
        self.store.update_telemetry(snapshot);
    }
}
