//! Structured logging configuration.
//!
//! Initializes the tracing subscriber and provides the auth-event helper.
//! Event details are `field=value` lines separated by `;`, and every line
//! passes through a redactor so credentials and reset tokens never reach
//! the log stream in the clear.

use std::sync::LazyLock;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use user_auth::redact::Redactor;

/// Fields whose values are obfuscated in auth-event log lines.
const SENSITIVE_FIELDS: [&str; 3] = ["password", "new_password", "reset_token"];

/// Replacement marker for redacted values.
const REDACTION: &str = "***";

static REDACTOR: LazyLock<Redactor> =
    LazyLock::new(|| Redactor::new(&SENSITIVE_FIELDS, REDACTION, ';'));

/// Initialize structured logging.
///
/// Log levels are configurable via the `RUST_LOG` environment variable.
///
/// # Example
///
/// ```no_run
/// use ua_server::logging;
///
/// #[tokio::main]
/// async fn main() {
///     logging::init();
///     tracing::info!("server starting");
/// }
/// ```
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn,hyper=warn"));

    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

/// Log an authentication event with sensitive fields obfuscated.
///
/// # Example
///
/// ```
/// use ua_server::logging::log_auth_event;
///
/// log_auth_event("failed_login", "email=bob@example.com;password=b4l0u");
/// // logs: email=bob@example.com;password=***
/// ```
pub fn log_auth_event(event_type: &str, detail: &str) {
    tracing::warn!(event_type = event_type, "{}", sanitize(detail));
}

fn sanitize(detail: &str) -> String {
    REDACTOR.redact(detail)
}
