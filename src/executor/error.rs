//! Request execution rejection types.
//!
//! These are the only ways an invocation can be refused before it runs.
//! Transport-level failures are not errors here: they produce a
//! `NetworkFailure` outcome and are recorded like any other attempt.

use std::fmt;

/// Reasons an invocation is rejected before any network activity.
///
/// A rejection leaves the session state completely untouched: no history
/// entry, no stats change, no persistence write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecuteError {
    /// The URL was empty after trimming whitespace.
    ///
    /// The caller should re-prompt for input.
    EmptyUrl,

    /// Another invocation is still in flight.
    ///
    /// Only one request may be pending at a time; the caller retries after
    /// the pending one completes.
    InFlight,
}

impl fmt::Display for ExecuteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecuteError::EmptyUrl => write!(f, "URL must not be empty"),
            ExecuteError::InFlight => write!(f, "a request is already in flight"),
        }
    }
}

impl std::error::Error for ExecuteError {}
