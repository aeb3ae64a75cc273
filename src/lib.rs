//! treeson - a self-contained JSON codec.
//!
//! A parser that turns JSON text (RFC 8259 / ECMA-404) into an in-memory
//! tagged [`Value`] tree, and a serializer that turns the tree back into
//! conforming text, either pretty-printed or minimized. The value API reads,
//! builds and mutates trees, with conversions from native Rust containers and
//! scalars and with serde interop.
//!
//! # Parsing
//!
//! ```
//! use treeson::parse;
//!
//! let root = parse(r#"{"a":1,"b":[true,null]}"#).unwrap();
//! assert_eq!(root["a"].as_number(), Some(1.0));
//! assert!(root["b"][1].is_null());
//! ```
//!
//! # Building and serializing
//!
//! ```
//! use treeson::{Format, Value};
//!
//! let mut root = Value::Null;
//! root["server"]["port"] = Value::from(8080);
//! root["tags"] = Value::from(["a", "b"]);
//! assert_eq!(
//!     root.to_json(Format::Minimized),
//!     r#"{"server":{"port":8080},"tags":["a","b"]}"#
//! );
//! ```
//!
//! # Behavior notes
//!
//! - Object iteration order is sorted by key; duplicate keys on parse are
//!   last-write-wins.
//! - Numbers are `f64`. Non-finite numbers cannot come from parsing and are
//!   serialized as the quoted strings `"nan"`, `"inf"` and `"-inf"`, so
//!   round-tripping them yields strings, not numbers.
//! - Numeric relaxations of the host float parser (leading zeros, `1.`,
//!   `1.e3`) are accepted rather than re-rejected.
//! - Nesting is bounded by a process-wide recursion limit, 1000 by default.

pub mod core;

use std::fs;
use std::path::Path;

pub use crate::core::errors::{Error, ErrorKind, ParseError, Result};
pub use crate::core::parser::{
    recursion_limit, set_recursion_limit, Parser, DEFAULT_RECURSION_LIMIT,
};
pub use crate::core::value::{Array, Kind, Object, Value};
pub use crate::core::writer::Format;

/// Parse a complete JSON document. Non-whitespace trailing bytes fail with
/// [`ErrorKind::TrailingData`].
pub fn parse(text: &str) -> Result<Value> {
    Ok(Parser::new(text).parse()?)
}

/// Read a file into memory and [`parse`] it.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Value> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| Error::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&text)
}

/// Encode a value tree as JSON text in the requested [`Format`].
pub fn serialize(value: &Value, format: Format) -> String {
    core::writer::to_string(value, format)
}

/// Serialize a value tree and write it to `path`, overwriting.
pub fn write_file<P: AsRef<Path>>(value: &Value, path: P, format: Format) -> Result<()> {
    let path = path.as_ref();
    let text = serialize(value, format);
    fs::write(path, text).map_err(|source| Error::FileAccess {
        path: path.to_path_buf(),
        source,
    })
}
