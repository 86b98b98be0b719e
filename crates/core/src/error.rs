//! Core error model.

use thiserror::Error;

/// Result type used across the core layer.
pub type CoreResult<T> = Result<T, CoreError>;

/// Core-level error.
///
/// Keep this focused on parsing and lookup failures of pipeline primitives.
/// HTTP status mapping belongs to the API layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A format name did not match any known representation.
    #[error("unknown format: {0}")]
    UnknownFormat(String),

    /// A message catalog line could not be parsed.
    #[error("malformed message catalog line {line}: {reason}")]
    MalformedCatalog { line: usize, reason: String },
}

impl CoreError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn unknown_format(name: impl Into<String>) -> Self {
        Self::UnknownFormat(name.into())
    }

    pub fn malformed_catalog(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedCatalog {
            line,
            reason: reason.into(),
        }
    }
}
