//! Authentication error types.

use thiserror::Error;

use crate::db::StoreError;

/// Authentication errors
#[derive(Debug, Error)]
pub enum AuthError {
    /// Record store error
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Password hashing failed
    #[error("Password hashing failed")]
    HashingFailed,

    /// Email already registered
    #[error("User {0} already exists")]
    EmailTaken(String),

    /// No user with the given email
    #[error("User not found")]
    UserNotFound,

    /// Reset token is unknown or already consumed
    #[error("Invalid or consumed reset token")]
    InvalidResetToken,
}

impl AuthError {
    /// Get a client-safe error message that doesn't leak sensitive information
    ///
    /// Store errors are sanitized so that SQL details never reach a client.
    pub fn client_message(&self) -> String {
        match self {
            AuthError::Store(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;
