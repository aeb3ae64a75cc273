//! Error types for the codec.
//!
//! Every parse failure carries the byte position where the cursor stopped and
//! a pre-rendered window of the surrounding source, so `Display` can show a
//! multi-line diagnostic with a caret under the offending byte without holding
//! on to the whole input. Value-level failures (wrong kind, missing key) and
//! file access failures share the same top-level [`Error`] channel.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::core::hints;
use crate::core::value::Kind;

/// Bytes of source shown on each side of the cursor in a diagnostic.
const EXCERPT_RADIUS: usize = 24;

/// Classification of a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum ErrorKind {
    /// A byte that is not valid for the current grammar production.
    #[error("unexpected byte {}", fmt_byte(.0))]
    UnexpectedByte(u8),
    /// The buffer ended mid-token, mid-string, mid-escape or between elements.
    #[error("unexpected end of input")]
    UnexpectedEnd,
    /// Unknown letter after `\`, or a malformed `\uXXXX` sequence.
    #[error("invalid escape sequence")]
    BadEscape,
    /// An unescaped control character inside a string.
    #[error("unescaped control character {} in string", fmt_byte(.0))]
    BadControlChar(u8),
    /// A numeric token that the float parser rejected.
    #[error("malformed number")]
    NumberFormat,
    /// A numeric token outside the representable double range.
    #[error("number out of range")]
    NumberRange,
    /// Nesting deeper than the configured recursion limit.
    #[error("nesting exceeds the recursion limit of {0}")]
    DepthExceeded(usize),
    /// Non-whitespace bytes after the top-level value.
    #[error("trailing data after the top-level value")]
    TrailingData,
}

impl ErrorKind {
    /// Stable machine-readable name, used by the CLI diagnostic report.
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::UnexpectedByte(_) => "unexpected_byte",
            ErrorKind::UnexpectedEnd => "unexpected_end",
            ErrorKind::BadEscape => "bad_escape",
            ErrorKind::BadControlChar(_) => "bad_control_char",
            ErrorKind::NumberFormat => "number_format",
            ErrorKind::NumberRange => "number_range",
            ErrorKind::DepthExceeded(_) => "depth_exceeded",
            ErrorKind::TrailingData => "trailing_data",
        }
    }
}

fn fmt_byte(b: &u8) -> String {
    if b.is_ascii_graphic() || *b == b' ' {
        format!("`{}`", *b as char)
    } else {
        format!("{b:#04x}")
    }
}

/// A parse failure with position tracking and a rendered source window.
///
/// The window is captured when the error is constructed: up to 24 bytes on
/// each side of the cursor, clipped to the line containing the error and to
/// UTF-8 character boundaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseError {
    /// What went wrong.
    pub kind: ErrorKind,
    /// Byte offset (0-indexed) where the parser stopped.
    pub pos: usize,
    /// 1-indexed line number containing `pos`.
    pub line: usize,
    /// Source excerpt around the error.
    pub excerpt: String,
    /// Character offset of the caret within `excerpt`.
    pub caret: usize,
    /// Optional instructional hint explaining how to fix the input.
    pub hint: Option<String>,
}

impl ParseError {
    /// Build an error at `pos`, rendering the source window and looking up a
    /// hint for the failure.
    pub(crate) fn new(kind: ErrorKind, pos: usize, text: &str) -> Self {
        let pos = pos.min(text.len());
        let line = text[..pos].bytes().filter(|&b| b == b'\n').count() + 1;

        // Window bounds, clipped to the error's line.
        let mut start = pos.saturating_sub(EXCERPT_RADIUS);
        while !text.is_char_boundary(start) {
            start += 1;
        }
        if let Some(nl) = text[start..pos].rfind('\n') {
            start += nl + 1;
        }
        let mut end = (pos + EXCERPT_RADIUS).min(text.len());
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        if let Some(nl) = text[pos..end].find('\n') {
            end = pos + nl;
        }

        let excerpt = text[start..end].to_string();
        let caret = text[start..pos].chars().count();
        let hint = hints::get_hint(kind, text, pos);

        ParseError {
            kind,
            pos,
            line,
            excerpt,
            caret,
            hint,
        }
    }

    /// Render the full multi-line diagnostic (same as `Display`).
    pub fn to_diagnostic_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "JSON parse error: {} at byte {}", self.kind, self.pos)?;
        writeln!(f)?;
        let line_label = self.line.to_string();
        writeln!(f, "> {} | {}", line_label, self.excerpt)?;
        write!(
            f,
            "> {} | {}^",
            " ".repeat(line_label.len()),
            " ".repeat(self.caret)
        )?;
        if let Some(hint) = &self.hint {
            write!(f, "\n\nHint: {hint}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Single failure channel for the whole crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input is not a valid JSON document.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// A typed accessor was called on a value of another kind.
    #[error("expected {expected} value, found {actual}")]
    WrongKind {
        /// Kind the accessor was asked for.
        expected: Kind,
        /// Kind the value actually holds.
        actual: Kind,
    },
    /// Strict lookup of a key that is not present in the object.
    #[error("key `{key}` not found in object")]
    KeyNotFound {
        /// The missing key.
        key: String,
    },
    /// The file could not be opened, read or written.
    #[error("cannot access `{}`: {source}", .path.display())]
    FileAccess {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },
}

impl Error {
    /// The parse-level details, if this is a parse failure.
    pub fn as_parse(&self) -> Option<&ParseError> {
        match self {
            Error::Parse(e) => Some(e),
            _ => None,
        }
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
