//! Error types for point serialization.

use thiserror::Error;

/// Errors that can occur while encoding a point into a sink.
#[derive(Error, Debug)]
pub enum SerializeError {
    /// Writing to the sink failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// BSON document encoding failed.
    #[error("BSON encoding error: {0}")]
    Bson(#[from] bson::ser::Error),
}

/// Unrecognised output format name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid format specifier: {0} (valid choices: {choices})", choices = crate::Format::CHOICES.join(", "))]
pub struct ParseFormatError(pub String);
