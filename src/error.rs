//! Error types for the parsing pipeline
//!
//! Structural malformation is never an error: unknown tags, stray closing
//! tags, and unterminated tags all degrade to literal text inside the
//! dispatch engine. The only failure path out of `parse` is a tag conversion
//! rejecting its own argument, which is a data error worth surfacing to the
//! caller rather than rendering silently.

use std::fmt;

/// Errors that can occur during a parse call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A tag conversion rejected a syntactically valid but semantically
    /// invalid argument (e.g. a non-numeric eicon size).
    Tag { tag: String, message: String },
}

impl std::error::Error for ParseError {}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Tag { tag, message } => {
                write!(f, "Invalid [{}] tag: {}", tag, message)
            }
        }
    }
}
