//! Authentication module providing registration, login validation, and
//! session management.
//!
//! This module implements:
//! - Argon2id salted password hashing
//! - Opaque session tokens stored server-side and echoed via cookie
//! - One-time password-reset tokens
//! - Basic-authorization header decoding for credential extraction
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
//! let user = auth.register("guillaume@example.com", "b4l0u").await?;
//! println!("registered {}", user.email);
//!
//! let reset_token = auth.issue_reset_token(&user.email).await?;
//! auth.update_password(&reset_token, "t4rt1fl3tt3").await?;
//! assert!(auth.valid_login(&user.email, "t4rt1fl3tt3").await?);
//! # Ok(())
//! # }
//! ```

pub mod basic;
pub mod errors;
pub mod hasher;
pub mod models;
pub mod service;

pub use errors::{AuthError, AuthResult};
pub use models::{User, UserId};
pub use service::AuthService;
