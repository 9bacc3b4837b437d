//! Server configuration management.
//!
//! Consolidates all environment variable reads and provides validated
//! configuration.

use std::net::SocketAddr;
use std::str::FromStr;

use thiserror::Error;
use user_auth::db::DatabaseConfig;

/// Complete server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind address
    pub bind: SocketAddr,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Optional Prometheus exporter bind address
    pub metrics_bind: Option<SocketAddr>,
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable holds a value that does not parse
    #[error("invalid value {value:?} for {var}")]
    Invalid { var: String, value: String },
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// CLI overrides take precedence over the environment; everything has
    /// a development default.
    ///
    /// Recognized variables: `SERVER_BIND`, `DATABASE_URL`,
    /// `METRICS_BIND`, `DB_MAX_CONNECTIONS`, `DB_MIN_CONNECTIONS`,
    /// `DB_CONNECTION_TIMEOUT_SECS`, `DB_IDLE_TIMEOUT_SECS`,
    /// `DB_MAX_LIFETIME_SECS`.
    pub fn from_env(
        bind_override: Option<SocketAddr>,
        database_url_override: Option<String>,
    ) -> Result<Self, ConfigError> {
        let bind = match bind_override {
            Some(addr) => addr,
            None => parse_env_or("SERVER_BIND", default_bind())?,
        };

        let database_url = database_url_override
            .or_else(|| std::env::var("DATABASE_URL").ok())
            .unwrap_or_else(|| "postgres://postgres@localhost/user_auth".to_string());

        let database = DatabaseConfig {
            database_url,
            max_connections: parse_env_or("DB_MAX_CONNECTIONS", 20)?,
            min_connections: parse_env_or("DB_MIN_CONNECTIONS", 5)?,
            connection_timeout_secs: parse_env_or("DB_CONNECTION_TIMEOUT_SECS", 5)?,
            idle_timeout_secs: parse_env_or("DB_IDLE_TIMEOUT_SECS", 300)?,
            max_lifetime_secs: parse_env_or("DB_MAX_LIFETIME_SECS", 1800)?,
        };

        let metrics_bind = match std::env::var("METRICS_BIND") {
            Ok(value) => Some(value.parse().map_err(|_| ConfigError::Invalid {
                var: "METRICS_BIND".to_string(),
                value,
            })?),
            Err(_) => None,
        };

        Ok(Self {
            bind,
            database,
            metrics_bind,
        })
    }
}

fn default_bind() -> SocketAddr {
    "127.0.0.1:5000"
        .parse()
        .expect("default bind address is valid")
}

fn parse_env_or<T: FromStr>(var: &str, default: T) -> Result<T, ConfigError> {
    match std::env::var(var) {
        Ok(value) => value.parse().map_err(|_| ConfigError::Invalid {
            var: var.to_string(),
            value,
        }),
        Err(_) => Ok(default),
    }
}
