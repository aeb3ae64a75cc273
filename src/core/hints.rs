//! Context-aware hints for common JSON mistakes.
//!
//! Maps an error kind plus a look at the surrounding bytes to a one-line
//! instructional message. Hints are attached to [`ParseError`] at
//! construction and rendered after the caret diagnostic.
//!
//! [`ParseError`]: crate::core::errors::ParseError

use crate::core::errors::ErrorKind;
use crate::core::tables::WHITESPACE;

/// Get a hint for a failure at `pos`, if the surrounding input matches a
/// known mistake. Returns `None` when there is nothing useful to say.
pub fn get_hint(kind: ErrorKind, text: &str, pos: usize) -> Option<String> {
    match kind {
        ErrorKind::UnexpectedByte(byte) => byte_hint(byte, text, pos),
        ErrorKind::UnexpectedEnd => Some(
            "The document ends before the value is complete. \
             Check for unclosed brackets, braces or quotes."
                .to_string(),
        ),
        ErrorKind::BadEscape => Some(
            "Valid escapes are \\\" \\\\ \\/ \\b \\f \\n \\r \\t \
             and \\uXXXX with four hex digits."
                .to_string(),
        ),
        ErrorKind::BadControlChar(_) => Some(
            "Control characters must be escaped inside strings; \
             a raw newline, for example, must be written as \\n."
                .to_string(),
        ),
        ErrorKind::DepthExceeded(_) => Some(
            "Deeply nested documents are rejected to protect the stack. \
             Raise the cap with set_recursion_limit if this nesting is intentional."
                .to_string(),
        ),
        ErrorKind::TrailingData => Some(
            "A JSON document holds exactly one top-level value. \
             Remove the extra content or wrap multiple values in an array."
                .to_string(),
        ),
        ErrorKind::NumberFormat | ErrorKind::NumberRange => None,
    }
}

fn byte_hint(byte: u8, text: &str, pos: usize) -> Option<String> {
    if byte == b'\'' {
        return Some(
            "JSON strings use double quotes; single quotes are not valid.".to_string(),
        );
    }

    let rest = &text.as_bytes()[pos..];
    if rest.starts_with(b"NaN") || rest.starts_with(b"Infinity") || rest.starts_with(b"inf") {
        return Some(
            "JSON has no NaN or Infinity literals; \
             non-finite numbers have to be carried some other way, such as quoted strings."
                .to_string(),
        );
    }

    match (previous_token_byte(text, pos), byte) {
        (Some(b','), b'}') | (Some(b','), b']') => Some(
            "Remove the comma before the closing bracket; \
             JSON does not allow trailing commas."
                .to_string(),
        ),
        (Some(b','), b',') => Some(
            "Remove the extra comma; JSON does not allow empty elements.".to_string(),
        ),
        _ => None,
    }
}

/// Last non-whitespace byte before `pos`, if any.
fn previous_token_byte(text: &str, pos: usize) -> Option<u8> {
    text.as_bytes()[..pos]
        .iter()
        .rev()
        .copied()
        .find(|&b| !WHITESPACE[b as usize])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_comma_hint() {
        let text = "[1, 2, ]";
        let hint = get_hint(ErrorKind::UnexpectedByte(b']'), text, 7);
        assert!(hint.is_some());
        assert!(hint.unwrap().contains("trailing commas"));
    }

    #[test]
    fn empty_element_hint() {
        let text = "[1, 2, ,3]";
        let hint = get_hint(ErrorKind::UnexpectedByte(b','), text, 7);
        assert!(hint.is_some());
        assert!(hint.unwrap().contains("extra comma"));
    }

    #[test]
    fn single_quote_hint() {
        let hint = get_hint(ErrorKind::UnexpectedByte(b'\''), "'abc'", 0);
        assert!(hint.unwrap().contains("double quotes"));
    }

    #[test]
    fn nan_literal_hint() {
        let hint = get_hint(ErrorKind::UnexpectedByte(b'N'), "NaN", 0);
        assert!(hint.unwrap().contains("NaN or Infinity"));
    }

    #[test]
    fn no_hint_for_plain_garbage() {
        let hint = get_hint(ErrorKind::UnexpectedByte(b'x'), "[1, x]", 4);
        assert!(hint.is_none());
    }

    #[test]
    fn number_errors_carry_no_hint() {
        assert!(get_hint(ErrorKind::NumberFormat, "-", 0).is_none());
        assert!(get_hint(ErrorKind::NumberRange, "1e999", 0).is_none());
    }
}
