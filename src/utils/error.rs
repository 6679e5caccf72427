//! Error types for the entire crate.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Broad classification of a decode failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The byte stream is not well-formed markup
    Syntax,
    /// A raw value could not be coerced to its declared type
    Format,
    /// A structural cardinality rule was violated
    Schema,
}

/// Errors that can occur while decoding a scan report
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("Malformed document at byte {offset}: {message}")]
    Syntax { offset: u64, message: String },

    #[error("Invalid value {value:?} at {path}: {reason}")]
    Format {
        path: String,
        value: String,
        reason: String,
    },

    #[error("Schema violation at {path}: {message}")]
    Schema { path: String, message: String },

    #[error("Document is not in canonical form at byte {offset}: expected {expected:?}, found {found:?}")]
    NonCanonical {
        offset: usize,
        expected: String,
        found: String,
    },
}

impl DecodeError {
    /// Classify the error
    ///
    /// Non-canonical layout is a textual representation problem and is
    /// reported as a format error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Syntax { .. } => ErrorKind::Syntax,
            Self::Format { .. } | Self::NonCanonical { .. } => ErrorKind::Format,
            Self::Schema { .. } => ErrorKind::Schema,
        }
    }

    /// Field path the error refers to, if any
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Format { path, .. } | Self::Schema { path, .. } => Some(path),
            Self::Syntax { .. } | Self::NonCanonical { .. } => None,
        }
    }
}

/// Errors that can occur while encoding a hand-built graph
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EncodeError {
    #[error("Invalid graph at {path}: {message}")]
    Invariant { path: String, message: String },
}

/// Errors produced by the timestamp codec
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    #[error("expected epoch seconds, found {0:?}")]
    NotNumeric(String),

    #[error("negative epoch seconds are not representable: {0}")]
    Negative(String),

    #[error("epoch seconds out of range: {0}")]
    OutOfRange(String),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Failed to encode report: {0}")]
    Encode(#[from] EncodeError),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
