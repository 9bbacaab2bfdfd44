//! Monitor command handler
//!
//! Mounts one session and redraws the dashboard whenever the derived view
//! or the session state changes. With `--once` it exits after drawing the
//! first applied frame, even when that frame leaves the view unchanged.

use crate::cli::output::render_dashboard;
use crate::cli::{apply_color_choice, load_config_with_overrides, MonitorArgs};
use crate::logging::init_tracing;
use crate::session::{Session, SessionState};
use crate::store::TelemetryStore;
use crate::view::{DashboardView, GuardedAction};
use crate::wire::TelemetrySnapshot;
use std::io::IsTerminal;
use std::sync::Arc;
use tokio::sync::Notify;
use tokio::time::Instant;

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";

/// Handle `odyssey monitor` command
pub async fn handle_monitor(args: &MonitorArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config_with_overrides(&args.simulator)?;
    init_tracing(&config.logging)?;
    apply_color_choice(&config, args.no_color);

    let store = TelemetryStore::global().clone();

    let changed = Arc::new(Notify::new());
    let listener = Arc::clone(&changed);
    let _subscription = store.subscribe(DashboardView::derive, move |_: &DashboardView| {
        listener.notify_one();
    });

    // Every applied frame carries a fresh timestamp
    let received = Arc::new(Notify::new());
    let listener = Arc::clone(&received);
    let _frames = store.subscribe(
        |snapshot: &TelemetrySnapshot| snapshot.timestamp.clone(),
        move |_: &String| listener.notify_one(),
    );

    let session = Session::mount(&config.simulator, store.clone());
    tracing::info!(session_id = session.id(), "Monitoring simulator");

    // The monitor never clicks, so the guard stays idle
    let guard = GuardedAction::jettison(config.console.jettison_confirm_timeout());
    let clear = std::io::stdout().is_terminal();
    let draw = |link: SessionState| {
        let view = DashboardView::current(&store);
        let jettison = guard.decorate(view.controls.jettison.clone(), Instant::now());
        if clear {
            print!("{}", CLEAR_SCREEN);
        }
        println!("{}", render_dashboard(&view, link, &jettison));
    };

    let mut state = session.subscribe_state();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    draw(session.state());
    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                tracing::info!("Interrupted, closing session");
                break;
            }
            _ = changed.notified() => {
                draw(session.state());
                if args.once {
                    break;
                }
            }
            _ = received.notified(), if args.once => {
                draw(session.state());
                break;
            }
            result = state.changed() => {
                let current = session.state();
                draw(current);
                if result.is_err() || current == SessionState::Closed {
                    break;
                }
            }
        }
    }

    let closed_by_peer = session.state() == SessionState::Closed;
    session.unmount().await?;
    if closed_by_peer && !args.once {
        eprintln!("Simulator session closed");
    }
    Ok(())
}
