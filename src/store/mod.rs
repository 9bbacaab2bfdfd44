//! Telemetry store.
//!
//! Holds the latest [`TelemetrySnapshot`] and the currently installed
//! [`CommandSink`]. Views subscribe with a selector and are notified
//! synchronously, in registration order, whenever the selected value
//! changes.

mod sink;

pub use sink::*;

use crate::wire::{Command, TelemetrySnapshot};
use once_cell::sync::Lazy;
use std::collections::VecDeque;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, Weak};

static GLOBAL: Lazy<TelemetryStore> = Lazy::new(TelemetryStore::new);

/// Observable holder of the latest telemetry snapshot.
///
/// Cloning is cheap and every clone refers to the same store.
///
/// # Examples
///
/// ```
/// use odyssey::store::TelemetryStore;
/// use odyssey::wire::{MissionStatus, TelemetrySnapshot};
/// use std::sync::{Arc, Mutex};
///
/// let store = TelemetryStore::new();
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let log = Arc::clone(&seen);
///
/// let _sub = store.subscribe(
///     |s| s.mission_state.status.clone(),
///     move |status| log.lock().unwrap().push(status.clone()),
/// );
///
/// let mut next = TelemetrySnapshot::standby();
/// next.mission_state.status = MissionStatus::EnRoute;
/// store.update_telemetry(next);
///
/// assert_eq!(*seen.lock().unwrap(), vec![MissionStatus::EnRoute]);
/// ```
#[derive(Clone)]
pub struct TelemetryStore {
    shared: Arc<Shared>,
}

struct Shared {
    snapshot: RwLock<Arc<TelemetrySnapshot>>,
    sink: RwLock<Arc<dyn CommandSink>>,
    subscribers: Mutex<Vec<Entry>>,
    next_id: AtomicU64,
    pending: Mutex<Pending>,
}

#[derive(Default)]
struct Pending {
    queue: VecDeque<TelemetrySnapshot>,
    draining: bool,
}

struct Entry {
    id: u64,
    subscriber: Arc<dyn Notify>,
}

trait Notify: Send + Sync {
    fn notify(&self, snapshot: &TelemetrySnapshot);
    fn deactivate(&self);
}

struct Selected<T, S, L> {
    selector: S,
    listener: L,
    last: Mutex<T>,
    active: AtomicBool,
}

impl<T, S, L> Notify for Selected<T, S, L>
where
    T: PartialEq + Clone + Send,
    S: Fn(&TelemetrySnapshot) -> T + Send + Sync,
    L: Fn(&T) + Send + Sync,
{
    fn notify(&self, snapshot: &TelemetrySnapshot) {
        if !self.active.load(Ordering::Acquire) {
            return;
        }
        let next = (self.selector)(snapshot);
        {
            let mut last = lock(&self.last);
            if *last == next {
                return;
            }
            *last = next.clone();
        }
        (self.listener)(&next);
    }

    fn deactivate(&self) {
        self.active.store(false, Ordering::Release);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl TelemetryStore {
    /// Create an independent store initialised to the standby snapshot.
    pub fn new() -> Self {
        Self::with_snapshot(TelemetrySnapshot::standby())
    }

    /// Create an independent store starting from `snapshot`.
    pub fn with_snapshot(snapshot: TelemetrySnapshot) -> Self {
        Self {
            shared: Arc::new(Shared {
                snapshot: RwLock::new(Arc::new(snapshot)),
                sink: RwLock::new(Arc::new(DisconnectedSink)),
                subscribers: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(1),
                pending: Mutex::new(Pending::default()),
            }),
        }
    }

    /// The process-wide store shared by every view.
    pub fn global() -> &'static TelemetryStore {
        &GLOBAL
    }

    /// Current snapshot.
    pub fn get(&self) -> Arc<TelemetrySnapshot> {
        let snapshot = self
            .shared
            .snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*snapshot)
    }

    /// Register `listener` to run whenever `selector(snapshot)` changes.
    ///
    /// The baseline is the value selected from the snapshot current at
    /// registration time. The listener stays registered until the returned
    /// [`Subscription`] is dropped.
    pub fn subscribe<T, S, L>(&self, selector: S, listener: L) -> Subscription
    where
        T: PartialEq + Clone + Send + 'static,
        S: Fn(&TelemetrySnapshot) -> T + Send + Sync + 'static,
        L: Fn(&T) + Send + Sync + 'static,
    {
        let initial = selector(&self.get());
        let id = self.shared.next_id.fetch_add(1, Ordering::Relaxed);
        let subscriber: Arc<dyn Notify> = Arc::new(Selected {
            selector,
            listener,
            last: Mutex::new(initial),
            active: AtomicBool::new(true),
        });

        lock(&self.shared.subscribers).push(Entry { id, subscriber });

        Subscription {
            id,
            shared: Arc::downgrade(&self.shared),
        }
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        lock(&self.shared.subscribers).len()
    }

    /// Replace the current snapshot and notify subscribers.
    ///
    /// Calls made while a notification round is running (for example from
    /// inside a listener) are queued and applied in call order once the
    /// current round finishes.
    pub fn update_telemetry(&self, snapshot: TelemetrySnapshot) {
        {
            let mut pending = lock(&self.shared.pending);
            pending.queue.push_back(snapshot);
            if pending.draining {
                return;
            }
            pending.draining = true;
        }

        loop {
            let next = {
                let mut pending = lock(&self.shared.pending);
                match pending.queue.pop_front() {
                    Some(next) => next,
                    None => {
                        pending.draining = false;
                        return;
                    }
                }
            };
            self.apply(next);
        }
    }

    fn apply(&self, snapshot: TelemetrySnapshot) {
        let snapshot = Arc::new(snapshot);
        *self
            .shared
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Arc::clone(&snapshot);

        let subscribers: Vec<(u64, Arc<dyn Notify>)> = lock(&self.shared.subscribers)
            .iter()
            .map(|entry| (entry.id, Arc::clone(&entry.subscriber)))
            .collect();

        for (id, subscriber) in subscribers {
            let result = catch_unwind(AssertUnwindSafe(|| subscriber.notify(&snapshot)));
            if result.is_err() {
                tracing::error!(
                    subscriber_id = id,
                    "Telemetry listener panicked, continuing with remaining listeners"
                );
            }
        }
    }

    /// Hand `command` to the installed sink.
    ///
    /// Never fails: with no open session the command is logged and dropped.
    pub fn send_command(&self, command: Command) -> SendOutcome {
        let sink = {
            let slot = self
                .shared
                .sink
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            Arc::clone(&*slot)
        };
        let outcome = sink.send(&command);
        metrics::counter!("odyssey_commands_total",
            "command" => command.name(),
            "outcome" => outcome.as_str()
        )
        .increment(1);
        outcome
    }

    /// Install or replace the command sink.
    pub fn set_command_sink(&self, sink: Arc<dyn CommandSink>) {
        *self
            .shared
            .sink
            .write()
            .unwrap_or_else(PoisonError::into_inner) = sink;
    }

    /// Replace the sink with one that logs and drops every command.
    pub fn clear_command_sink(&self) {
        self.set_command_sink(Arc::new(DisconnectedSink));
    }

    /// Clear the sink only if `sink` is still the installed one.
    ///
    /// Returns `false` when another owner has replaced it in the meantime.
    pub fn uninstall_command_sink(&self, sink: &Arc<dyn CommandSink>) -> bool {
        let mut slot = self
            .shared
            .sink
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if std::ptr::addr_eq(Arc::as_ptr(&*slot), Arc::as_ptr(sink)) {
            *slot = Arc::new(DisconnectedSink);
            true
        } else {
            false
        }
    }
}

impl Default for TelemetryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Shared {
    fn remove(&self, id: u64) {
        let mut subscribers = lock(&self.subscribers);
        if let Some(pos) = subscribers.iter().position(|entry| entry.id == id) {
            let entry = subscribers.remove(pos);
            entry.subscriber.deactivate();
        }
    }
}

/// Registration handle returned by [`TelemetryStore::subscribe`].
///
/// Dropping it unsubscribes; [`Subscription::detach`] keeps the listener
/// for the lifetime of the store.
#[must_use = "dropping a Subscription immediately unsubscribes its listener"]
pub struct Subscription {
    id: u64,
    shared: Weak<Shared>,
}

impl Subscription {
    /// Remove the listener. Equivalent to dropping the handle.
    pub fn unsubscribe(self) {}

    /// Keep the listener registered for as long as the store lives.
    pub fn detach(mut self) {
        self.shared = Weak::new();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(shared) = self.shared.upgrade() {
            shared.remove(self.id);
        }
    }
}
