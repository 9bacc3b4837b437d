//! Authentication service implementation.

use std::sync::Arc;

use uuid::Uuid;

use super::{
    errors::{AuthError, AuthResult},
    hasher,
    models::{User, UserId},
};
use crate::db::{StoreError, UserChanges, UserKey, UserStore};

/// Authentication service.
///
/// Orchestrates registration, login validation, session issuance and
/// destruction, and the password-reset token flow over a [`UserStore`].
/// Holds no state beyond the store handle; every operation runs to
/// completion within a single call.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn UserStore>,
}

impl AuthService {
    /// Create a new authentication service over the given record store.
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Register a new user.
    ///
    /// Hashes the password and inserts a new record.
    ///
    /// # Errors
    ///
    /// * `AuthError::EmailTaken` - a user with this email already exists
    /// * `AuthError::HashingFailed` - the password could not be hashed
    pub async fn register(&self, email: &str, password: &str) -> AuthResult<User> {
        match self.store.find_by(UserKey::email(email)).await {
            Ok(_) => return Err(AuthError::EmailTaken(email.to_string())),
            Err(StoreError::NotFound) => {}
            Err(e) => return Err(e.into()),
        }

        let hashed_password = hasher::hash_password(password)?;

        match self.store.add(email, &hashed_password).await {
            Ok(user) => Ok(user),
            // The lookup above races with concurrent registration; the
            // store's uniqueness constraint is the final arbiter.
            Err(StoreError::DuplicateEmail) => Err(AuthError::EmailTaken(email.to_string())),
            Err(e) => Err(e.into()),
        }
    }

    /// Validate a login attempt.
    ///
    /// Returns `Ok(false)` when the email is unknown or the password does
    /// not verify against the stored digest, `Ok(true)` otherwise. No
    /// lockout, no rate limiting. Store failures other than not-found
    /// propagate.
    pub async fn valid_login(&self, email: &str, password: &str) -> AuthResult<bool> {
        let user = match self.store.find_by(UserKey::email(email)).await {
            Ok(user) => user,
            Err(StoreError::NotFound) => return Ok(false),
            Err(e) => return Err(e.into()),
        };

        Ok(hasher::verify_password(password, &user.hashed_password))
    }

    /// Create a session for the user with the given email.
    ///
    /// Generates a fresh opaque token, stores it as the user's
    /// `session_id`, and returns it. An unknown email yields `Ok(None)`
    /// rather than an error; the caller decides how to surface it.
    pub async fn create_session(&self, email: &str) -> AuthResult<Option<String>> {
        let user = match self.store.find_by(UserKey::email(email)).await {
            Ok(user) => user,
            Err(StoreError::NotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let session_id = Uuid::new_v4().to_string();
        self.store
            .update(user.id, UserChanges::default().session_id(Some(session_id.clone())))
            .await?;

        Ok(Some(session_id))
    }

    /// Resolve a session token back to its user.
    ///
    /// A `None` or empty token always yields `Ok(None)`, as does a token
    /// no user currently holds.
    pub async fn user_from_session(&self, session_id: Option<&str>) -> AuthResult<Option<User>> {
        let Some(session_id) = session_id else {
            return Ok(None);
        };
        if session_id.is_empty() {
            return Ok(None);
        }

        match self.store.find_by(UserKey::SessionId(session_id.to_string())).await {
            Ok(user) => Ok(Some(user)),
            Err(StoreError::NotFound) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Destroy the user's active session.
    ///
    /// Clears `session_id`; a no-op when the user does not exist.
    pub async fn destroy_session(&self, user_id: UserId) -> AuthResult<()> {
        match self
            .store
            .update(user_id, UserChanges::default().session_id(None))
            .await
        {
            Ok(()) | Err(StoreError::NotFound) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Issue a password-reset token for the given email.
    ///
    /// # Errors
    ///
    /// * `AuthError::UserNotFound` - no user with this email
    pub async fn issue_reset_token(&self, email: &str) -> AuthResult<String> {
        let user = match self.store.find_by(UserKey::email(email)).await {
            Ok(user) => user,
            Err(StoreError::NotFound) => return Err(AuthError::UserNotFound),
            Err(e) => return Err(e.into()),
        };

        let reset_token = Uuid::new_v4().to_string();
        self.store
            .update(user.id, UserChanges::default().reset_token(Some(reset_token.clone())))
            .await?;

        Ok(reset_token)
    }

    /// Consume a reset token and replace the user's password.
    ///
    /// Replaces `hashed_password` with the hash of `new_password` and
    /// clears `reset_token`, so a consumed token cannot be consumed again.
    ///
    /// # Errors
    ///
    /// * `AuthError::InvalidResetToken` - no user holds this token
    pub async fn update_password(&self, reset_token: &str, new_password: &str) -> AuthResult<()> {
        let user = match self
            .store
            .find_by(UserKey::ResetToken(reset_token.to_string()))
            .await
        {
            Ok(user) => user,
            Err(StoreError::NotFound) => return Err(AuthError::InvalidResetToken),
            Err(e) => return Err(e.into()),
        };

        let hashed_password = hasher::hash_password(new_password)?;
        self.store
            .update(
                user.id,
                UserChanges::default()
                    .hashed_password(hashed_password)
                    .reset_token(None),
            )
            .await?;

        Ok(())
    }

    /// Check that the backing store is reachable.
    pub async fn health_check(&self) -> AuthResult<()> {
        self.store.ping().await?;
        Ok(())
    }
}
