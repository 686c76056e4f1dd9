//! JSON syntax highlighting.
//!
//! This module turns a parsed JSON value into a markup string with one span
//! per semantic token. Tokens are emitted directly while re-serializing the
//! value, so token boundaries are exact by construction - escaped quotes,
//! embedded colons and unicode escapes inside strings can never be
//! misclassified the way text-pattern scanners misclassify them.
//!
//! Output shape: 4-space indentation, object keys in parse order, each
//! classified token wrapped in `<span class="...">`.

use serde_json::Value;

/// Indentation unit for the serialized form.
const INDENT: &str = "    ";

/// Semantic token categories produced by the highlighter.
///
/// The categories are mutually exclusive; an object key is never also a
/// string token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A quoted object key.
    Key,
    /// Any other quoted string.
    Str,
    /// A numeric literal.
    Num,
    /// The literals `true` and `false`.
    Bool,
    /// The literal `null`.
    Null,
}

impl TokenKind {
    /// The markup class carried on the token's span.
    pub fn class(&self) -> &'static str {
        match self {
            TokenKind::Key => "json-key",
            TokenKind::Str => "json-str",
            TokenKind::Num => "json-num",
            TokenKind::Bool => "json-bool",
            TokenKind::Null => "json-null",
        }
    }
}

/// Serializes a JSON value into highlighted markup.
///
/// Pure function: the same value always produces the same markup. Stripping
/// the spans and unescaping `&amp;`/`&lt;`/`&gt;` yields a JSON document
/// that re-parses to a value equal to the input.
///
/// # Arguments
///
/// * `value` - The parsed JSON value to render
///
/// # Examples
///
/// ```
/// use http_probe::formatter::highlight;
/// use serde_json::json;
///
/// let markup = highlight(&json!({"a": 1}));
/// assert!(markup.contains(r#"<span class="json-key">"a"</span>"#));
/// assert!(markup.contains(r#"<span class="json-num">1</span>"#));
/// ```
pub fn highlight(value: &Value) -> String {
    let mut out = String::with_capacity(128);
    write_value(&mut out, value, 0);
    out
}

fn write_value(out: &mut String, value: &Value, depth: usize) {
    match value {
        Value::Null => write_span(out, TokenKind::Null, "null"),
        Value::Bool(true) => write_span(out, TokenKind::Bool, "true"),
        Value::Bool(false) => write_span(out, TokenKind::Bool, "false"),
        Value::Number(number) => write_span(out, TokenKind::Num, &number.to_string()),
        Value::String(text) => {
            open_span(out, TokenKind::Str);
            write_quoted(out, text);
            close_span(out);
        }
        Value::Array(items) => {
            if items.is_empty() {
                out.push_str("[]");
                return;
            }
            out.push_str("[\n");
            for (i, item) in items.iter().enumerate() {
                write_indent(out, depth + 1);
                write_value(out, item, depth + 1);
                if i + 1 < items.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            write_indent(out, depth);
            out.push(']');
        }
        Value::Object(map) => {
            if map.is_empty() {
                out.push_str("{}");
                return;
            }
            out.push_str("{\n");
            for (i, (key, item)) in map.iter().enumerate() {
                write_indent(out, depth + 1);
                open_span(out, TokenKind::Key);
                write_quoted(out, key);
                close_span(out);
                out.push_str(": ");
                write_value(out, item, depth + 1);
                if i + 1 < map.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            write_indent(out, depth);
            out.push('}');
        }
    }
}

fn write_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

fn open_span(out: &mut String, kind: TokenKind) {
    out.push_str("<span class=\"");
    out.push_str(kind.class());
    out.push_str("\">");
}

fn close_span(out: &mut String) {
    out.push_str("</span>");
}

fn write_span(out: &mut String, kind: TokenKind, token: &str) {
    open_span(out, kind);
    out.push_str(token);
    close_span(out);
}

/// Writes a string as a quoted JSON token, applying JSON escaping and
/// markup escaping (`&`, `<`, `>`) in a single pass.
fn write_quoted(out: &mut String, text: &str) {
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}
