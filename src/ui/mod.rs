//! Presentation adapter boundary.
//!
//! The probe core never draws anything. A host embeds it by implementing
//! [`ProbeView`] and relaying user intents through [`dispatch`]; the core
//! calls back with render requests in a fixed order (pending, outcome,
//! history, stats). The display-text helpers in this module keep badge and
//! list formatting consistent across hosts.

use crate::executor::ExecuteError;
use crate::formatter::{format_body, FormattedBody};
use crate::history::{History, HistoryEntry};
use crate::models::{HttpMethod, RequestOutcome, SuccessOutcome};
use crate::session::ProbeSession;
use crate::stats::Stats;
use crate::storage::KeyValueStore;

/// A user intent relayed from the input controls into the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserIntent {
    /// Send a request with the given method and URL.
    Submit {
        /// HTTP method chosen in the method selector.
        method: HttpMethod,
        /// URL as entered, untrimmed.
        url: String,
    },

    /// Re-populate the input controls from the history entry at this index.
    SelectHistory(usize),

    /// Clear the history and statistics.
    ClearHistory,
}

/// Render requests the core issues to the host's view.
///
/// Implementations only draw; they must not reach back into the session
/// from inside a callback.
pub trait ProbeView {
    /// A submission was accepted and is now in flight.
    fn render_pending(&mut self);

    /// A response arrived (any status code); `body` is ready for display.
    fn render_success(&mut self, outcome: &SuccessOutcome, body: &FormattedBody);

    /// The network layer failed; `notice` is the full display text.
    fn render_failure(&mut self, notice: &str);

    /// The submitted URL was empty; give transient feedback and re-prompt.
    fn render_input_error(&mut self);

    /// The history list changed.
    fn render_history(&mut self, history: &History);

    /// The statistics changed.
    fn render_stats(&mut self, stats: &Stats);

    /// Copy a past request back into the input controls.
    fn fill_input(&mut self, method: HttpMethod, url: &str);
}

/// Relays one user intent into the core and drives the view.
///
/// For submissions the callback order matches the probe's visible flow:
/// pending state first, then the outcome, then the refreshed history and
/// stats. A rejected (empty) URL only triggers the input-error indication -
/// nothing was recorded, so nothing else is re-rendered.
pub async fn dispatch<S: KeyValueStore, V: ProbeView>(
    session: &mut ProbeSession<S>,
    view: &mut V,
    intent: UserIntent,
) {
    match intent {
        UserIntent::Submit { method, url } => {
            view.render_pending();
            match session.submit(method, &url).await {
                Ok(RequestOutcome::Success(success)) => {
                    let body = format_body(&success.body_text);
                    view.render_success(&success, &body);
                }
                Ok(RequestOutcome::NetworkFailure { message }) => {
                    view.render_failure(&format_failure_notice(&message));
                }
                Err(ExecuteError::EmptyUrl) => {
                    view.render_input_error();
                    return;
                }
                Err(ExecuteError::InFlight) => {
                    // The trigger is disabled while a request is pending; a
                    // stray submission is dropped without rendering.
                    log::debug!("submission ignored: request already in flight");
                    return;
                }
            }
            view.render_history(session.history());
            view.render_stats(session.stats());
        }
        UserIntent::SelectHistory(index) => {
            let entry = session.select_history(index);
            view.fill_input(entry.method, &entry.url);
        }
        UserIntent::ClearHistory => {
            session.clear();
            view.render_history(session.history());
            view.render_stats(session.stats());
        }
    }
}

/// Display text for a network failure.
///
/// The transport's message is shown verbatim, followed by the cross-origin
/// hint - the most common cause of "unreachable" public APIs when the probe
/// runs inside a browser context.
pub fn format_failure_notice(message: &str) -> String {
    format!(
        "// CONNECTION ERROR\n// {}\n\n// Note: check cross-origin restrictions if you are probing a public API.",
        message
    )
}

/// Status badge text for a received response, e.g. "200 OK".
pub fn format_status_badge(outcome: &SuccessOutcome) -> String {
    format!("{} {}", outcome.status, outcome.status_text)
}

/// One-line stats summary, e.g. "Total: 3 | Ok: 2 | Err: 1 | Avg: 41ms".
///
/// The average renders as an em-dash sentinel while no latency samples
/// exist; zero is a real average and renders as "0ms".
pub fn format_stats_line(stats: &Stats) -> String {
    let average = match stats.average() {
        Some(avg) => format!("{}ms", avg),
        None => "—".to_string(),
    };
    format!(
        "Total: {} | Ok: {} | Err: {} | Avg: {}",
        stats.total(),
        stats.ok(),
        stats.err(),
        average
    )
}

/// One-line history entry, e.g. "GET https://api.example.com - 200".
///
/// Attempts that never got a response show "ERR" instead of a status code.
pub fn format_history_entry(entry: &HistoryEntry) -> String {
    if entry.status == 0 {
        format!("{} {} - ERR", entry.method, entry.url)
    } else {
        format!("{} {} - {}", entry.method, entry.url, entry.status)
    }
}
