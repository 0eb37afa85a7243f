// ⚠️ Error Types - one variant per failure kind
//
// Every user-visible failure carries a message naming the violated rule.
// The HTTP layer maps ErrorKind to a status code, never individual variants.

use std::io;
use thiserror::Error;

/// Result type alias for library operations
pub type Result<T> = std::result::Result<T, SwiftError>;

/// Coarse classification used by callers that only care about the category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed SWIFT or country code
    Format,
    /// Semantically invalid request
    Validation,
    /// Primary key already exists
    Conflict,
    /// Lookup target does not exist
    NotFound,
    /// Import source missing or malformed
    Io,
    /// Store failure (not caused by the caller)
    Internal,
}

#[derive(Debug, Error)]
pub enum SwiftError {
    #[error("{0}")]
    Format(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    /// Broken internal invariant (not caused by the caller)
    #[error("Internal error: {0}")]
    Internal(String),

    /// Import source could not be opened or read
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Import source is structurally wrong (empty, bad header, bad row)
    #[error("Malformed import source at line {line}: {reason}")]
    Malformed { line: u64, reason: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

impl SwiftError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SwiftError::Format(_) => ErrorKind::Format,
            SwiftError::Validation(_) => ErrorKind::Validation,
            SwiftError::Conflict(_) => ErrorKind::Conflict,
            SwiftError::NotFound(_) => ErrorKind::NotFound,
            SwiftError::Io(_) | SwiftError::Malformed { .. } | SwiftError::Csv(_) => ErrorKind::Io,
            SwiftError::Internal(_) | SwiftError::Database(_) => ErrorKind::Internal,
        }
    }

    /// True when the caller sent bad input (400-equivalent)
    pub fn is_client_error(&self) -> bool {
        matches!(self.kind(), ErrorKind::Format | ErrorKind::Validation)
    }
}

/// Unique/foreign-key violation raised by SQLite
pub fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}
