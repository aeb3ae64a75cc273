//! Core module containing the codec itself.
//!
//! This module provides:
//! - The value tree and kind reporting (`value`)
//! - Error types with caret diagnostics (`errors`, `hints`)
//! - The recursive-descent parser (`parser`)
//! - The text emitter (`writer`)
//! - Byte classification tables shared by both loops (`tables`)

pub mod errors;
pub mod hints;
pub mod parser;
pub mod tables;
pub mod value;
pub mod writer;
