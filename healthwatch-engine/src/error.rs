//! Error types for payload parsing.

use thiserror::Error;

/// Errors that make a whole payload unusable.
///
/// Anything short of this (missing attributes, unknown codes, odd types
/// inside an entity) degrades to a result message instead of an error.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// The payload contained nothing but whitespace.
    #[error("Payload is empty")]
    Empty,

    /// The payload could not be decoded at all.
    #[error("Malformed payload: {0}")]
    Malformed(String),

    /// The payload decoded, but not to a list or a mapping.
    #[error("Unexpected payload shape: expected a list or an object, found {found}")]
    UnexpectedShape { found: &'static str },
}

impl From<serde_json::Error> for PayloadError {
    fn from(err: serde_json::Error) -> Self {
        PayloadError::Malformed(err.to_string())
    }
}
