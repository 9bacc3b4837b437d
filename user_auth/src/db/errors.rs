//! Record store error types.

use thiserror::Error;

/// Record store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Email uniqueness constraint violated
    #[error("A user with that email already exists")]
    DuplicateEmail,

    /// Zero rows matched the lookup
    #[error("No matching user")]
    NotFound,

    /// Unsupported lookup or update field
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

/// Result type for record store operations
pub type StoreResult<T> = Result<T, StoreError>;
