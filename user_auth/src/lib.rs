//! # User Auth
//!
//! A user authentication service built around three pieces:
//!
//! - [`auth`]: credential hashing, registration/login validation, session
//!   issuance and destruction, and the password-reset token flow
//! - [`db`]: the user record store (trait-based, with PostgreSQL and
//!   in-memory implementations) and connection pool management
//! - [`redact`]: log-line field redaction so credentials never reach the
//!   log stream in the clear
//!
//! The auth service holds no state beyond the duration of a call; the
//! record store is the sole owner of record lifetime. Operations run to
//! completion one at a time with no locking discipline over concurrent
//! writes to the same account; last write wins.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use user_auth::auth::AuthService;
//! use user_auth::db::MemoryUserStore;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let auth = AuthService::new(Arc::new(MemoryUserStore::new()));
//!
//! let user = auth.register("bob@example.com", "b4l0u").await?;
//! assert!(auth.valid_login("bob@example.com", "b4l0u").await?);
//!
//! let session_id = auth.create_session(&user.email).await?;
//! assert!(session_id.is_some());
//! # Ok(())
//! # }
//! ```

/// Authentication: hashing, sessions, password reset.
pub mod auth;
pub use auth::{AuthError, AuthResult, AuthService, User, UserId};

/// User record store and database pool management.
pub mod db;
pub use db::{Database, DatabaseConfig, StoreError, StoreResult, UserStore};

/// Log-line field redaction.
pub mod redact;
