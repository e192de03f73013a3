//! Error types for roombook.

use thiserror::Error;

/// Common error type for roombook.
#[derive(Error, Debug)]
pub enum RoombookError {
    /// Invalid user input (malformed identifier, bad request body).
    #[error("validation error: {0}")]
    Validation(String),

    /// Authentication error (missing or invalid credential).
    #[error("authentication error: {0}")]
    Auth(String),

    /// Permission denied error.
    #[error("permission denied: {0}")]
    Permission(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Conflicting write (already-reserved time slot, duplicate email).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Transient infrastructure failure, safe to retry.
    #[error("transient storage error: {0}")]
    Transient(String),

    /// Database error.
    ///
    /// Unclassified storage failures and corrupted stored data end up here;
    /// they are never retried.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl RoombookError {
    /// Whether retrying the failed operation can succeed.
    ///
    /// Default classifier for [`crate::retry::RetryPolicy`]: only
    /// infrastructure hiccups qualify; constraint violations, missing rows
    /// and bad input are permanent.
    pub fn is_transient(&self) -> bool {
        matches!(self, RoombookError::Transient(_))
    }
}

// Conversion from sqlx errors, classifying the failure for the retry and
// conflict handling layers. The uniqueness-violation branch is what turns a
// lost booking race into a typed conflict instead of a 500.
impl From<sqlx::Error> for RoombookError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::RowNotFound => RoombookError::NotFound("row".to_string()),
            sqlx::Error::Database(db) => match db.kind() {
                sqlx::error::ErrorKind::UniqueViolation => RoombookError::Conflict(db.to_string()),
                sqlx::error::ErrorKind::ForeignKeyViolation => {
                    RoombookError::NotFound("referenced row".to_string())
                }
                sqlx::error::ErrorKind::CheckViolation => RoombookError::Validation(db.to_string()),
                _ if is_locked_message(db.message()) => RoombookError::Transient(db.to_string()),
                _ => RoombookError::Database(db.to_string()),
            },
            sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) | sqlx::Error::Protocol(_) => {
                RoombookError::Transient(e.to_string())
            }
            _ => RoombookError::Database(e.to_string()),
        }
    }
}

// SQLITE_BUSY / SQLITE_LOCKED surface as unclassified database errors, so
// match on the message.
fn is_locked_message(message: &str) -> bool {
    message.contains("database is locked") || message.contains("database table is locked")
}

/// Result type alias for roombook operations.
pub type Result<T> = std::result::Result<T, RoombookError>;
