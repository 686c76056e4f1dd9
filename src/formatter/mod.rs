//! Response body formatting.
//!
//! This module decides how a response body is rendered: bodies that parse as
//! JSON are highlighted into markup, everything else is displayed verbatim.
//! The fallback is a required behavior, not an error - the probe never
//! refuses to show a body.

pub mod json;

pub use json::{highlight, TokenKind};

use serde_json::Value;

/// A response body prepared for display.
///
/// The two variants make the parse-or-fallback decision explicit so callers
/// (and tests) can tell which branch was taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormattedBody {
    /// Body parsed as JSON; carries the highlighted markup.
    Json {
        /// Markup string with one span per classified token.
        markup: String,
    },

    /// Body did not parse as JSON; shown verbatim with no highlighting.
    Plain {
        /// The raw body text, unmodified.
        text: String,
    },
}

impl FormattedBody {
    /// Whether the JSON branch was taken.
    pub fn is_json(&self) -> bool {
        matches!(self, FormattedBody::Json { .. })
    }

    /// The text handed to the display surface: highlighted markup for JSON
    /// bodies, the raw text otherwise.
    pub fn display_text(&self) -> &str {
        match self {
            FormattedBody::Json { markup } => markup,
            FormattedBody::Plain { text } => text,
        }
    }
}

/// Formats a response body for display.
///
/// Attempts to parse the body as JSON; on success the parsed value is
/// highlighted, otherwise the raw text is used unchanged. Malformed JSON is
/// not surfaced to the user.
///
/// # Arguments
///
/// * `body_text` - The raw response body
///
/// # Examples
///
/// ```
/// use http_probe::formatter::format_body;
///
/// let body = format_body(r#"{"a":1}"#);
/// assert!(body.is_json());
///
/// let body = format_body("plain text, not JSON");
/// assert!(!body.is_json());
/// assert_eq!(body.display_text(), "plain text, not JSON");
/// ```
pub fn format_body(body_text: &str) -> FormattedBody {
    match serde_json::from_str::<Value>(body_text) {
        Ok(value) => FormattedBody::Json {
            markup: highlight(&value),
        },
        Err(_) => FormattedBody::Plain {
            text: body_text.to_string(),
        },
    }
}
