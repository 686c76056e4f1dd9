//! HTTP Probe core engine
//!
//! This crate implements the core of an ad-hoc HTTP probe: the user picks a
//! method and a URL, the probe sends the request and renders the response,
//! and a bounded history plus running statistics survive across sessions.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - **models**: HTTP method, request shape, and the per-attempt outcome
//! - **executor**: request lifecycle - validate, send, classify, bookkeep, persist
//! - **formatter**: JSON highlighting with a verbatim plain-text fallback
//! - **history**: bounded, newest-first list of past attempts
//! - **stats**: running ok/err counters and a rolling latency window
//! - **storage**: write-through persistence over an abstract key-value store
//! - **session**: the session state value and the controller owning it
//! - **ui**: the presentation adapter boundary (intents in, render requests out)
//! - **config**: optional settings (transport timeout, storage location)
//!
//! # Request lifecycle
//!
//! One submission flows through the executor exactly once:
//! 1. Reject empty input (nothing is recorded) and concurrent submissions
//! 2. Send the request with the given method, no body, no custom headers
//! 3. Classify: any response is a `Success` (its `ok` flag carries the 2xx
//!    classification); anything else is a `NetworkFailure`
//! 4. Prepend a history entry, update the counters, sample the latency
//! 5. Write the whole session state through the persistence gateway
//!
//! # Usage
//!
//! ```no_run
//! use http_probe::{HttpMethod, ProbeSession, RequestOutcome};
//! use http_probe::storage::FileStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = FileStore::new()?;
//! let mut session = ProbeSession::open(store);
//!
//! match session.submit(HttpMethod::GET, "https://api.example.com/health").await? {
//!     RequestOutcome::Success(success) => {
//!         println!("{} in {}ms", success.status, success.elapsed_ms);
//!     }
//!     RequestOutcome::NetworkFailure { message } => {
//!         println!("failed: {}", message);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod executor;
pub mod formatter;
pub mod history;
pub mod models;
pub mod session;
pub mod stats;
pub mod storage;
pub mod ui;

pub use executor::{ExecuteError, RequestExecutor};
pub use formatter::{format_body, highlight, FormattedBody};
pub use history::{History, HistoryEntry};
pub use models::{HttpMethod, ProbeRequest, RequestOutcome, SuccessOutcome};
pub use session::{ProbeSession, SessionState};
pub use stats::Stats;
pub use storage::{
    FileStore, KeyValueStore, LoadedSession, MemoryStore, SessionGateway, StorageError,
};
pub use ui::{dispatch, ProbeView, UserIntent};
