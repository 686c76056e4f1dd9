//! HTTP request executor.
//!
//! This module drives the request lifecycle: validate input, issue the HTTP
//! call, classify the outcome, update history and statistics, and persist
//! the session state. The bookkeeping sequence runs exactly once per
//! invocation whether the attempt succeeded or failed.
//!
//! Anything the network layer does after input validation passes - URL
//! parse failure, unsupported scheme, DNS, connection or read failure - is
//! classified as a `NetworkFailure` outcome and recorded, never raised as
//! an error.

pub mod error;

pub use error::ExecuteError;

use crate::config::get_config;
use crate::history::HistoryEntry;
use crate::models::{HttpMethod, ProbeRequest, RequestOutcome, SuccessOutcome};
use crate::session::SessionState;
use crate::storage::{KeyValueStore, SessionGateway};
use std::time::{Duration, Instant};

/// Executes probe requests and applies their side effects.
///
/// Owns the single-slot in-flight flag: while one invocation is pending no
/// other may start. The flag is the core-side counterpart of the disabled
/// trigger at the UI layer.
#[derive(Debug, Default)]
pub struct RequestExecutor {
    in_flight: bool,
}

/// Clears the in-flight flag when the invocation ends, including when the
/// future is dropped at the suspension point.
struct InFlightGuard<'a> {
    flag: &'a mut bool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        *self.flag = false;
    }
}

impl RequestExecutor {
    /// Creates an executor with no request in flight.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an invocation is currently pending.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Executes one probe request and applies its side effects.
    ///
    /// On accepted input the attempt always runs to an outcome, and the
    /// finalizer sequence runs unconditionally: a history entry is
    /// prepended, the stats counters are updated per the outcome
    /// classification, a latency sample is added for received responses,
    /// and the session state is written through the gateway.
    ///
    /// A failed save is logged and swallowed; persistence degradation never
    /// fails the invocation that produced the outcome.
    ///
    /// # Arguments
    ///
    /// * `request` - Method and URL as collected from the input controls
    /// * `state` - The session state to apply bookkeeping to
    /// * `gateway` - Write-through persistence gateway
    ///
    /// # Errors
    ///
    /// Returns [`ExecuteError::EmptyUrl`] when the URL is empty after
    /// trimming, and [`ExecuteError::InFlight`] while another invocation is
    /// pending. Both rejections happen before any network activity and
    /// leave the session state untouched.
    pub async fn execute<S: KeyValueStore>(
        &mut self,
        request: &ProbeRequest,
        state: &mut SessionState,
        gateway: &mut SessionGateway<S>,
    ) -> Result<RequestOutcome, ExecuteError> {
        if self.in_flight {
            return Err(ExecuteError::InFlight);
        }

        let url = request.url.trim();
        if url.is_empty() {
            return Err(ExecuteError::EmptyUrl);
        }

        self.in_flight = true;
        let _guard = InFlightGuard {
            flag: &mut self.in_flight,
        };
        let outcome = perform(request.method, url).await;

        state.apply_attempt(
            HistoryEntry::new(request.method, url, outcome.is_ok(), outcome.status()),
            outcome.elapsed_ms(),
        );
        if let Err(err) = gateway.save(state) {
            log::warn!("failed to persist session state: {}", err);
        }

        Ok(outcome)
    }
}

/// Issues the HTTP call and classifies what came back.
///
/// Elapsed time is measured around the awaited response; reading the body
/// happens after the measurement, matching the probe's latency display
/// semantics.
async fn perform(method: HttpMethod, url: &str) -> RequestOutcome {
    let target = match url::Url::parse(url) {
        Ok(parsed) => parsed,
        Err(err) => {
            return RequestOutcome::NetworkFailure {
                message: format!("invalid URL: {}", err),
            }
        }
    };

    let scheme = target.scheme();
    if scheme != "http" && scheme != "https" {
        return RequestOutcome::NetworkFailure {
            message: format!("unsupported URL scheme: {}", scheme),
        };
    }

    let client = match build_client() {
        Ok(client) => client,
        Err(err) => {
            return RequestOutcome::NetworkFailure {
                message: format!("could not prepare HTTP client: {}", err),
            }
        }
    };

    log::debug!("{} {}", method, target);
    let started = Instant::now();
    let response = match client.request(method.to_reqwest(), target).send().await {
        Ok(response) => response,
        Err(err) => {
            return RequestOutcome::NetworkFailure {
                message: describe_transport_error(&err),
            }
        }
    };
    let elapsed_ms = started.elapsed().as_millis() as u64;

    let status = response.status();
    let status_text = status.canonical_reason().unwrap_or("OK").to_string();
    let ok = status.is_success();

    let body_text = match response.text().await {
        Ok(text) => text,
        Err(err) => {
            // A response arrived but its body could not be read; the attempt
            // is recorded like any other transport failure.
            return RequestOutcome::NetworkFailure {
                message: format!("failed to read response body: {}", err),
            };
        }
    };

    RequestOutcome::Success(SuccessOutcome {
        status: status.as_u16(),
        status_text,
        ok,
        body_text,
        elapsed_ms,
    })
}

/// Builds the HTTP client, applying the configured timeout when set.
///
/// The core applies no timeout of its own; by default whatever the
/// transport does is what happens.
fn build_client() -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout_ms) = get_config().request_timeout_ms {
        builder = builder.timeout(Duration::from_millis(timeout_ms));
    }
    builder.build()
}

fn describe_transport_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("request timed out: {}", err)
    } else if err.is_connect() {
        format!("connection failed: {}", err)
    } else {
        err.to_string()
    }
}
