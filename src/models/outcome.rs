//! Request outcome data models.
//!
//! A single execution produces exactly one [`RequestOutcome`]. The outcome is
//! transient: it is consumed immediately by rendering and by the history and
//! stats updates, and is never persisted.

/// A response received from the server, regardless of status code.
///
/// Non-2xx responses are still successful at the transport level; `ok`
/// carries the conventional 2xx classification used for statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuccessOutcome {
    /// HTTP status code (e.g., 200, 404, 500).
    pub status: u16,

    /// HTTP status text (e.g., "OK", "Not Found").
    ///
    /// Defaults to "OK" when the transport supplies none.
    pub status_text: String,

    /// Whether the status code is in the 2xx range.
    pub ok: bool,

    /// Raw response body as text.
    pub body_text: String,

    /// Wall-clock time spent awaiting the response, in milliseconds.
    pub elapsed_ms: u64,
}

/// The result of one probe execution.
///
/// Either the server produced a response ([`Success`](Self::Success), any
/// status code) or the network layer failed to produce one
/// ([`NetworkFailure`](Self::NetworkFailure): DNS, connection, cross-origin
/// or timeout-class failures).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    /// A response arrived; status classification is carried in `ok`.
    Success(SuccessOutcome),

    /// No response; the message is shown verbatim to the user.
    NetworkFailure {
        /// Human-readable description of the failure.
        message: String,
    },
}

impl RequestOutcome {
    /// Outcome classification for statistics: `true` only for a response
    /// with a 2xx status.
    pub fn is_ok(&self) -> bool {
        match self {
            RequestOutcome::Success(success) => success.ok,
            RequestOutcome::NetworkFailure { .. } => false,
        }
    }

    /// Status code recorded in history: the response status, or 0 when the
    /// network layer produced no response.
    pub fn status(&self) -> u16 {
        match self {
            RequestOutcome::Success(success) => success.status,
            RequestOutcome::NetworkFailure { .. } => 0,
        }
    }

    /// Latency sample for the stats window.
    ///
    /// `Some` for any received response (including non-2xx), `None` for a
    /// network failure - failed attempts contribute no latency sample.
    pub fn elapsed_ms(&self) -> Option<u64> {
        match self {
            RequestOutcome::Success(success) => Some(success.elapsed_ms),
            RequestOutcome::NetworkFailure { .. } => None,
        }
    }
}
