//! Session state persistence.
//!
//! The probe persists its whole session (history + stats) as one serialized
//! record under a single named key in a key-value store. The store itself is
//! abstract: a file-backed implementation ships with the crate and an
//! in-memory one backs tests and embedders with their own storage.
//!
//! Loading is never an error. Absent, unreadable or corrupt state yields the
//! default session, and the next write-through save overwrites whatever was
//! there - corruption silently self-heals.

pub mod file;

pub use file::FileStore;

use crate::session::SessionState;
use std::collections::HashMap;
use std::fmt;

/// The single key under which the session state record is stored.
pub const SESSION_STATE_KEY: &str = "session-state";

/// Errors that can occur during persistence operations.
#[derive(Debug)]
pub enum StorageError {
    /// Error occurred during store I/O.
    Io(std::io::Error),

    /// Error occurred during serialization or deserialization.
    Serialization(serde_json::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(err) => write!(f, "Storage I/O error: {}", err),
            StorageError::Serialization(err) => {
                write!(f, "Storage serialization error: {}", err)
            }
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(err) => Some(err),
            StorageError::Serialization(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err)
    }
}

/// The key-value persistence service the probe writes through to.
pub trait KeyValueStore {
    /// Reads the value stored under `key`, `None` when the key is absent.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, overwriting any previous value.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory key-value store for tests and embedders without durable storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeds a key, e.g. with a hand-crafted (or corrupt) blob.
    pub fn with_record(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut store = Self::new();
        store.records.insert(key.into(), value.into());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.records.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.records.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// The result of loading the session state at startup.
///
/// The two variants make the recovered-vs-defaulted decision explicit so
/// callers (and tests) can assert which branch was taken.
#[derive(Debug, Clone)]
pub enum LoadedSession {
    /// Valid persisted state was found and restored.
    Loaded(SessionState),

    /// Nothing usable was persisted; this is the default state.
    Defaulted(SessionState),
}

impl LoadedSession {
    /// Whether the default state was substituted.
    pub fn was_defaulted(&self) -> bool {
        matches!(self, LoadedSession::Defaulted(_))
    }

    /// Unwraps the session state, whichever branch produced it.
    pub fn into_state(self) -> SessionState {
        match self {
            LoadedSession::Loaded(state) | LoadedSession::Defaulted(state) => state,
        }
    }
}

/// Serializes and deserializes the session state to and from a key-value
/// store, one whole-state record per save.
#[derive(Debug)]
pub struct SessionGateway<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> SessionGateway<S> {
    /// Creates a gateway over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Loads the session state.
    ///
    /// Absence, a read error, a parse error, or a snapshot violating the
    /// session invariants all yield [`LoadedSession::Defaulted`]. This
    /// function never fails and never surfaces corruption to the user.
    pub fn load(&self) -> LoadedSession {
        let blob = match self.store.read(SESSION_STATE_KEY) {
            Ok(Some(blob)) => blob,
            Ok(None) => return LoadedSession::Defaulted(SessionState::default()),
            Err(err) => {
                log::warn!("session state unreadable, starting fresh: {}", err);
                return LoadedSession::Defaulted(SessionState::default());
            }
        };

        match serde_json::from_str::<SessionState>(&blob) {
            Ok(state) if state.is_consistent() => LoadedSession::Loaded(state),
            Ok(_) => {
                log::warn!("persisted session state violates invariants, starting fresh");
                LoadedSession::Defaulted(SessionState::default())
            }
            Err(err) => {
                log::warn!("persisted session state is corrupt, starting fresh: {}", err);
                LoadedSession::Defaulted(SessionState::default())
            }
        }
    }

    /// Saves the full session state, overwriting the previous record.
    ///
    /// Called synchronously after every mutation (write-through). No partial
    /// writes, no versioning.
    pub fn save(&mut self, state: &SessionState) -> Result<(), StorageError> {
        let blob = serde_json::to_string(state)?;
        self.store.write(SESSION_STATE_KEY, &blob)
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}
