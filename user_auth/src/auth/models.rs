//! Authentication data models.

use serde::{Deserialize, Serialize};

/// User ID type
pub type UserId = i64;

/// User model, one record per registered account.
///
/// `session_id` is present while the user has an active session;
/// `reset_token` is present while a password reset is outstanding and is
/// cleared once consumed. Plaintext passwords are never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub hashed_password: String,
    pub session_id: Option<String>,
    pub reset_token: Option<String>,
}
