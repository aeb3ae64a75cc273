//! JSON text emission.
//!
//! A recursive writer appending to a caller-owned `String`. The layout choice
//! is a `const` generic, so the minimized path is monomorphized with no
//! runtime branches on formatting. String escaping is table-driven and flushes
//! unescaped runs in chunks.

use std::fmt::Write;

use crate::core::tables::{ESCAPE, ESCAPE_UNICODE};
use crate::core::value::Value;

/// Output layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// 4-space indentation, one entry per line, `": "` after object keys.
    Pretty,
    /// No whitespace between tokens.
    #[default]
    Minimized,
}

const INDENT: &str = "    ";

/// Encode a value tree as JSON text.
pub fn to_string(value: &Value, format: Format) -> String {
    let mut out = String::new();
    write_to(value, format, &mut out);
    out
}

/// Encode a value tree, appending to an existing buffer.
pub fn write_to(value: &Value, format: Format, out: &mut String) {
    match format {
        Format::Pretty => write_value::<true>(value, out, 0),
        Format::Minimized => write_value::<false>(value, out, 0),
    }
}

fn write_value<const PRETTY: bool>(value: &Value, out: &mut String, depth: usize) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Number(n) => write_number(*n, out),
        Value::String(s) => write_string(s, out),
        Value::Array(array) => {
            if array.is_empty() {
                out.push_str("[]");
                return;
            }
            out.push('[');
            for (i, element) in array.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                if PRETTY {
                    out.push('\n');
                    push_indent(out, depth + 1);
                }
                write_value::<PRETTY>(element, out, depth + 1);
            }
            if PRETTY {
                out.push('\n');
                push_indent(out, depth);
            }
            out.push(']');
        }
        Value::Object(object) => {
            if object.is_empty() {
                out.push_str("{}");
                return;
            }
            out.push('{');
            for (i, (key, entry)) in object.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                if PRETTY {
                    out.push('\n');
                    push_indent(out, depth + 1);
                }
                write_string(key, out);
                out.push(':');
                if PRETTY {
                    out.push(' ');
                }
                write_value::<PRETTY>(entry, out, depth + 1);
            }
            if PRETTY {
                out.push('\n');
                push_indent(out, depth);
            }
            out.push('}');
        }
    }
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

/// Quote and escape a string payload, flushing unescaped runs in one chunk
/// per escape event. Escapes are all ASCII, so chunk boundaries are always
/// character boundaries.
fn write_string(s: &str, out: &mut String) {
    out.push('"');
    let bytes = s.as_bytes();
    let mut chunk_start = 0;
    for (i, &byte) in bytes.iter().enumerate() {
        let letter = ESCAPE[byte as usize];
        if letter == 0 {
            continue;
        }
        out.push_str(&s[chunk_start..i]);
        out.push('\\');
        if letter == ESCAPE_UNICODE {
            let _ = write!(out, "u{byte:04x}");
        } else {
            out.push(letter as char);
        }
        chunk_start = i + 1;
    }
    out.push_str(&s[chunk_start..]);
    out.push('"');
}

/// Emit a number through the host float formatter, which produces the
/// shortest decimal form that round-trips. Non-finite values become quoted
/// strings, a documented deviation that keeps the output valid JSON.
fn write_number(n: f64, out: &mut String) {
    if n.is_finite() {
        let _ = write!(out, "{n}");
    } else if n.is_nan() {
        out.push_str("\"nan\"");
    } else if n > 0.0 {
        out.push_str("\"inf\"");
    } else {
        out.push_str("\"-inf\"");
    }
}
