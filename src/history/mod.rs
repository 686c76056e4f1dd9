//! Bounded request history.
//!
//! Every completed or failed attempt is recorded as a [`HistoryEntry`],
//! newest first. The list is capped: inserting past the cap evicts the
//! oldest entry. Entries are immutable once created.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::models::HttpMethod;

/// Maximum number of history entries to retain.
pub const MAX_HISTORY_ENTRIES: usize = 10;

/// A single entry recording a past request and its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Unique identifier for this entry.
    pub id: String,

    /// When the attempt was made, in UTC.
    pub timestamp: DateTime<Utc>,

    /// HTTP method used.
    pub method: HttpMethod,

    /// Target URL as entered.
    pub url: String,

    /// Outcome classification: `true` only for a 2xx response.
    pub ok: bool,

    /// HTTP status code, or 0 when the network layer produced no response.
    pub status: u16,
}

impl HistoryEntry {
    /// Creates a new entry with a fresh id and the current timestamp.
    ///
    /// # Arguments
    ///
    /// * `method` - HTTP method of the attempt
    /// * `url` - Target URL of the attempt
    /// * `ok` - Outcome classification
    /// * `status` - Recorded status code (0 for network failures)
    pub fn new(method: HttpMethod, url: impl Into<String>, ok: bool, status: u16) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            method,
            url: url.into(),
            ok,
            status,
        }
    }
}

/// The bounded, newest-first request history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
}

impl History {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }

    /// Records an entry at the front, evicting the oldest entry once the
    /// cap is exceeded. O(1) amortized.
    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
        if self.entries.len() > MAX_HISTORY_ENTRIES {
            self.entries.pop_back();
        }
    }

    /// Returns the entry at `index` (0 = most recent) for re-populating the
    /// input controls.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range. Callers must only pass indices
    /// taken from a current render of this history.
    pub fn select(&self, index: usize) -> &HistoryEntry {
        &self.entries[index]
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates entries, most recent first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
