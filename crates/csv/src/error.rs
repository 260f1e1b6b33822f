//! Error types for delimited-text ingestion and serialization.

use std::time::Duration;
use thiserror::Error;

/// Result type for CSV operations.
pub type IngestResult<T> = Result<T, IngestError>;

/// CSV reader and writer errors.
///
/// Failures raised by the table layer are wrapped, never replaced, so the
/// original cause stays reachable through `source()`.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Invalid field separator '{0}' (cannot be empty)")]
    InvalidSeparator(String),

    #[error("{message} (after line {line})")]
    Malformed { line: usize, message: String },

    #[error("Invalid row {line}")]
    InvalidRow {
        line: usize,
        #[source]
        source: tabula_core::Error,
    },

    #[error("Timeout! Reading one line took more than {} ms", .0.as_millis())]
    Timeout(Duration),

    #[error("I/O error at line {line}")]
    Io {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Table(#[from] tabula_core::Error),
}

impl IngestError {
    /// Returns the 1-based line the error refers to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            IngestError::Malformed { line, .. }
            | IngestError::InvalidRow { line, .. }
            | IngestError::Io { line, .. } => Some(*line),
            _ => None,
        }
    }
}
