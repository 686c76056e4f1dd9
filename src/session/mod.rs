//! Session state and the probe controller.
//!
//! The session state is an explicit value owned by one controller - there
//! are no ambient globals. History and stats operations receive it by
//! reference, and every mutation is immediately written through the
//! persistence gateway.

use serde::{Deserialize, Serialize};

use crate::executor::{ExecuteError, RequestExecutor};
use crate::history::{History, HistoryEntry, MAX_HISTORY_ENTRIES};
use crate::models::{HttpMethod, ProbeRequest, RequestOutcome};
use crate::stats::Stats;
use crate::storage::{KeyValueStore, SessionGateway};

/// Everything the probe persists: the bounded history plus the running
/// statistics. This is the single record the gateway reads and writes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Bounded, newest-first request history.
    pub history: History,

    /// Running counters and the latency window.
    pub stats: Stats,
}

impl SessionState {
    /// Checks the structural invariants of both stores.
    ///
    /// The gateway treats a persisted snapshot failing this check as
    /// corruption.
    pub fn is_consistent(&self) -> bool {
        self.stats.is_consistent() && self.history.len() <= MAX_HISTORY_ENTRIES
    }

    /// Bookkeeping for one completed or failed attempt: prepends the entry
    /// and updates the counters, adding a latency sample when one exists.
    pub fn apply_attempt(&mut self, entry: HistoryEntry, elapsed_ms: Option<u64>) {
        let ok = entry.ok;
        self.history.record(entry);
        self.stats.record(ok, elapsed_ms);
    }

    /// Empties the history and zeroes the statistics.
    pub fn reset(&mut self) {
        self.history.clear();
        self.stats.clear();
    }
}

/// The probe controller: owns the session state, the persistence gateway
/// and the executor, and exposes the operations the presentation adapter
/// relays user intents into.
#[derive(Debug)]
pub struct ProbeSession<S: KeyValueStore> {
    state: SessionState,
    gateway: SessionGateway<S>,
    executor: RequestExecutor,
    defaulted_at_startup: bool,
}

impl<S: KeyValueStore> ProbeSession<S> {
    /// Opens a session over the given store.
    ///
    /// Persisted state is loaded once, here; absent or corrupt state
    /// silently becomes the default empty session.
    pub fn open(store: S) -> Self {
        let gateway = SessionGateway::new(store);
        let loaded = gateway.load();
        let defaulted_at_startup = loaded.was_defaulted();
        Self {
            state: loaded.into_state(),
            gateway,
            executor: RequestExecutor::new(),
            defaulted_at_startup,
        }
    }

    /// Submits one request: executes it and applies all side effects.
    ///
    /// See [`RequestExecutor::execute`] for the lifecycle and the rejection
    /// cases.
    pub async fn submit(
        &mut self,
        method: HttpMethod,
        url: &str,
    ) -> Result<RequestOutcome, ExecuteError> {
        let request = ProbeRequest::new(method, url);
        self.executor
            .execute(&request, &mut self.state, &mut self.gateway)
            .await
    }

    /// Returns the history entry at `index` (0 = most recent) for
    /// re-populating the input controls.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range; callers must only pass indices
    /// from a current render of the history.
    pub fn select_history(&self, index: usize) -> &HistoryEntry {
        self.state.history.select(index)
    }

    /// Clears the history, zeroes the statistics, and persists the reset
    /// immediately.
    pub fn clear(&mut self) {
        self.state.reset();
        if let Err(err) = self.gateway.save(&self.state) {
            log::warn!("failed to persist cleared session state: {}", err);
        }
    }

    /// The current history, for rendering.
    pub fn history(&self) -> &History {
        &self.state.history
    }

    /// The current statistics, for rendering.
    pub fn stats(&self) -> &Stats {
        &self.state.stats
    }

    /// Whether startup found nothing usable and substituted the defaults.
    pub fn started_from_defaults(&self) -> bool {
        self.defaulted_at_startup
    }

    /// Whether a submission is currently pending.
    pub fn is_in_flight(&self) -> bool {
        self.executor.is_in_flight()
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &S {
        self.gateway.store()
    }
}
