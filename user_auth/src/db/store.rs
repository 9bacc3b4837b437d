//! User record store implementations.
//!
//! [`UserStore`] abstracts record access behind a trait so the auth service
//! can be wired to PostgreSQL in production and to an in-memory store in
//! tests and single-process deployments. Lookups have exactly-one-match
//! semantics; updates fetch the row, apply the changed fields, and write
//! the full row back; last write wins.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

use super::errors::{StoreError, StoreResult};
use crate::auth::models::{User, UserId};

/// Lookup key for [`UserStore::find_by`].
///
/// One variant per supported lookup field: `id`, `email`, `session_id`,
/// `reset_token`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserKey {
    Id(UserId),
    Email(String),
    SessionId(String),
    ResetToken(String),
}

impl UserKey {
    /// Convenience constructor for the most common lookup.
    pub fn email(email: &str) -> Self {
        Self::Email(email.to_string())
    }

    /// Build a key from a `(field, value)` string pair.
    ///
    /// For callers whose criteria arrive dynamically rather than typed.
    ///
    /// # Errors
    ///
    /// * `StoreError::InvalidQuery` - unsupported field name, or an `id`
    ///   value that is not an integer
    pub fn parse(field: &str, value: &str) -> StoreResult<Self> {
        match field {
            "id" => value
                .parse()
                .map(Self::Id)
                .map_err(|_| StoreError::InvalidQuery(format!("id value {value:?} is not an integer"))),
            "email" => Ok(Self::Email(value.to_string())),
            "session_id" => Ok(Self::SessionId(value.to_string())),
            "reset_token" => Ok(Self::ResetToken(value.to_string())),
            other => Err(StoreError::InvalidQuery(format!(
                "unsupported lookup field {other:?}"
            ))),
        }
    }
}

/// Field changes for [`UserStore::update`].
///
/// `session_id` and `reset_token` are doubly optional: the outer `Option`
/// distinguishes "leave alone" from "set", the inner one allows setting the
/// column back to NULL.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    email: Option<String>,
    hashed_password: Option<String>,
    session_id: Option<Option<String>>,
    reset_token: Option<Option<String>>,
}

impl UserChanges {
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn hashed_password(mut self, hashed_password: impl Into<String>) -> Self {
        self.hashed_password = Some(hashed_password.into());
        self
    }

    pub fn session_id(mut self, session_id: Option<String>) -> Self {
        self.session_id = Some(session_id);
        self
    }

    pub fn reset_token(mut self, reset_token: Option<String>) -> Self {
        self.reset_token = Some(reset_token);
        self
    }

    /// True when no supported field is set.
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.hashed_password.is_none()
            && self.session_id.is_none()
            && self.reset_token.is_none()
    }

    fn apply(&self, user: &mut User) {
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(hashed_password) = &self.hashed_password {
            user.hashed_password = hashed_password.clone();
        }
        if let Some(session_id) = &self.session_id {
            user.session_id = session_id.clone();
        }
        if let Some(reset_token) = &self.reset_token {
            user.reset_token = reset_token.clone();
        }
    }
}

/// Trait for user record store operations
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new record and return it.
    ///
    /// # Errors
    ///
    /// * `StoreError::DuplicateEmail` - the email is already registered
    async fn add(&self, email: &str, hashed_password: &str) -> StoreResult<User>;

    /// Find the single record matching `key`.
    ///
    /// # Errors
    ///
    /// * `StoreError::NotFound` - zero rows matched
    async fn find_by(&self, key: UserKey) -> StoreResult<User>;

    /// Apply `changes` to the record with the given id.
    ///
    /// # Errors
    ///
    /// * `StoreError::InvalidQuery` - no supported field is set
    /// * `StoreError::NotFound` - the id does not exist
    async fn update(&self, user_id: UserId, changes: UserChanges) -> StoreResult<()>;

    /// Check that the store is reachable.
    async fn ping(&self) -> StoreResult<()>;
}

/// PostgreSQL implementation of [`UserStore`]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &PgRow) -> User {
        User {
            id: row.get("id"),
            email: row.get("email"),
            hashed_password: row.get("hashed_password"),
            session_id: row.get("session_id"),
            reset_token: row.get("reset_token"),
        }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn add(&self, email: &str, hashed_password: &str) -> StoreResult<User> {
        let row = sqlx::query(
            "INSERT INTO users (email, hashed_password) VALUES ($1, $2)
             RETURNING id, email, hashed_password, session_id, reset_token",
        )
        .bind(email)
        .bind(hashed_password)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => StoreError::DuplicateEmail,
            other => StoreError::Database(other),
        })?;

        Ok(Self::row_to_user(&row))
    }

    async fn find_by(&self, key: UserKey) -> StoreResult<User> {
        let row = match key {
            UserKey::Id(id) => {
                sqlx::query(
                    "SELECT id, email, hashed_password, session_id, reset_token
                     FROM users WHERE id = $1",
                )
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
            }
            UserKey::Email(email) => {
                sqlx::query(
                    "SELECT id, email, hashed_password, session_id, reset_token
                     FROM users WHERE email = $1",
                )
                .bind(email)
                .fetch_optional(&self.pool)
                .await?
            }
            UserKey::SessionId(session_id) => {
                sqlx::query(
                    "SELECT id, email, hashed_password, session_id, reset_token
                     FROM users WHERE session_id = $1",
                )
                .bind(session_id)
                .fetch_optional(&self.pool)
                .await?
            }
            UserKey::ResetToken(reset_token) => {
                sqlx::query(
                    "SELECT id, email, hashed_password, session_id, reset_token
                     FROM users WHERE reset_token = $1",
                )
                .bind(reset_token)
                .fetch_optional(&self.pool)
                .await?
            }
        };

        row.map(|r| Self::row_to_user(&r)).ok_or(StoreError::NotFound)
    }

    async fn update(&self, user_id: UserId, changes: UserChanges) -> StoreResult<()> {
        if changes.is_empty() {
            return Err(StoreError::InvalidQuery(
                "no supported field set in update".to_string(),
            ));
        }

        let mut user = self.find_by(UserKey::Id(user_id)).await?;
        changes.apply(&mut user);

        sqlx::query(
            "UPDATE users
             SET email = $1, hashed_password = $2, session_id = $3, reset_token = $4
             WHERE id = $5",
        )
        .bind(&user.email)
        .bind(&user.hashed_password)
        .bind(&user.session_id)
        .bind(&user.reset_token)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// In-memory implementation of [`UserStore`].
///
/// Backed by a mutex-guarded map; enforces the same uniqueness and
/// not-found semantics as the PostgreSQL store. Intended for tests and
/// single-process deployments where persistence is not required.
pub struct MemoryUserStore {
    inner: Mutex<MemoryInner>,
}

struct MemoryInner {
    users: HashMap<UserId, User>,
    next_id: UserId,
}

impl Default for MemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MemoryInner {
                users: HashMap::new(),
                next_id: 1,
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryInner> {
        self.inner.lock().expect("user store lock poisoned")
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn add(&self, email: &str, hashed_password: &str) -> StoreResult<User> {
        let mut inner = self.lock();

        if inner.users.values().any(|u| u.email == email) {
            return Err(StoreError::DuplicateEmail);
        }

        let id = inner.next_id;
        inner.next_id += 1;

        let user = User {
            id,
            email: email.to_string(),
            hashed_password: hashed_password.to_string(),
            session_id: None,
            reset_token: None,
        };
        inner.users.insert(id, user.clone());

        Ok(user)
    }

    async fn find_by(&self, key: UserKey) -> StoreResult<User> {
        let inner = self.lock();

        let found = match &key {
            UserKey::Id(id) => inner.users.get(id),
            UserKey::Email(email) => inner.users.values().find(|u| &u.email == email),
            UserKey::SessionId(session_id) => inner
                .users
                .values()
                .find(|u| u.session_id.as_deref() == Some(session_id.as_str())),
            UserKey::ResetToken(reset_token) => inner
                .users
                .values()
                .find(|u| u.reset_token.as_deref() == Some(reset_token.as_str())),
        };

        found.cloned().ok_or(StoreError::NotFound)
    }

    async fn update(&self, user_id: UserId, changes: UserChanges) -> StoreResult<()> {
        if changes.is_empty() {
            return Err(StoreError::InvalidQuery(
                "no supported field set in update".to_string(),
            ));
        }

        let mut inner = self.lock();
        let user = inner.users.get_mut(&user_id).ok_or(StoreError::NotFound)?;
        changes.apply(user);

        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
