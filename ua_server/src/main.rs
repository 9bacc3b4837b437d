//! User authentication HTTP server.
//!
//! Wires the PostgreSQL-backed record store and auth service from
//! `user_auth` into the axum router and runs it until interrupted.

use std::sync::Arc;

use anyhow::Context;
use pico_args::Arguments;
use tracing::info;

use ua_server::{api, config::ServerConfig, logging, metrics};
use user_auth::{
    auth::AuthService,
    db::{Database, PgUserStore},
};

const HELP: &str = "\
Run the user authentication server

USAGE:
  ua_server [OPTIONS]

OPTIONS:
  --bind       IP:PORT     Server socket bind address  [default: env SERVER_BIND or 127.0.0.1:5000]
  --db-url     URL         Database connection string  [default: env DATABASE_URL or postgres://postgres@localhost/user_auth]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  SERVER_BIND              Server bind address (e.g., 0.0.0.0:5000)
  DATABASE_URL             PostgreSQL connection string
  METRICS_BIND             Optional Prometheus exporter bind address
  RUST_LOG                 Log filter (e.g., debug, ua_server=trace)
  (See config.rs for the DB pool variables)
";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let bind_override = pargs.opt_value_from_str("--bind")?;
    let database_url_override = pargs.opt_value_from_str("--db-url")?;

    logging::init();

    let config = ServerConfig::from_env(bind_override, database_url_override)?;

    if let Some(addr) = config.metrics_bind {
        metrics::init_metrics(addr).map_err(|e| anyhow::anyhow!(e))?;
        info!("Prometheus exporter listening on {addr}");
    }

    info!("Connecting to database");
    let db = Database::new(&config.database)
        .await
        .context("failed to connect to database")?;
    db.init_schema()
        .await
        .context("failed to bootstrap database schema")?;
    info!("Database connected");

    let store = Arc::new(PgUserStore::new(db.pool().clone()));
    let auth = Arc::new(AuthService::new(store));

    let app = api::create_router(api::AppState { auth });

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind))?;
    info!("Server running at http://{}. Press Ctrl+C to stop.", config.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Shutting down server");

    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install CTRL+C signal handler");
}
