//! Database configuration module.

use std::env;
use std::fmt::Debug;
use std::str::FromStr;

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub database_url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,

    /// Connection timeout in seconds
    pub connection_timeout_secs: u64,

    /// Idle connection timeout in seconds
    pub idle_timeout_secs: u64,

    /// Maximum connection lifetime in seconds
    pub max_lifetime_secs: u64,
}

impl DatabaseConfig {
    /// Create configuration from environment variables.
    ///
    /// `DATABASE_URL` is required; pool sizing falls back to the
    /// development defaults: `DB_MAX_CONNECTIONS` (20),
    /// `DB_MIN_CONNECTIONS` (5), `DB_CONNECTION_TIMEOUT` (10),
    /// `DB_IDLE_TIMEOUT` (600), `DB_MAX_LIFETIME` (1800).
    ///
    /// # Panics
    ///
    /// Panics if `DATABASE_URL` is not set or a pool variable does not
    /// parse.
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            max_connections: env_parse_or("DB_MAX_CONNECTIONS", 20),
            min_connections: env_parse_or("DB_MIN_CONNECTIONS", 5),
            connection_timeout_secs: env_parse_or("DB_CONNECTION_TIMEOUT", 10),
            idle_timeout_secs: env_parse_or("DB_IDLE_TIMEOUT", 600),
            max_lifetime_secs: env_parse_or("DB_MAX_LIFETIME", 1800),
        }
    }

    /// Create a default configuration for development
    pub fn development() -> Self {
        Self {
            database_url: "postgres://postgres@localhost/user_auth".to_string(),
            max_connections: 20,
            min_connections: 5,
            connection_timeout_secs: 10,
            idle_timeout_secs: 600,
            max_lifetime_secs: 1800,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::development()
    }
}

fn env_parse_or<T>(var: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Debug,
{
    match env::var(var) {
        Ok(value) => value
            .parse()
            .unwrap_or_else(|e| panic!("{var} must be a valid number: {e:?}")),
        Err(_) => default,
    }
}
