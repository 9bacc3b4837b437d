//! Prometheus metrics for monitoring the authentication server.
//!
//! Counters are recorded by the request-id middleware and the auth
//! handlers and exposed in Prometheus text format by the exporter
//! installed in [`init_metrics`].

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Initialize the Prometheus metrics exporter.
///
/// Sets up a scrape endpoint on the specified address; metrics are served
/// at `http://<addr>/metrics`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), String> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| format!("Failed to install Prometheus exporter: {e}"))
}

/// Record a completed HTTP request.
pub fn http_requests_total(method: &str, path: &str, status: u16) {
    metrics::counter!("http_requests_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record a successful registration.
pub fn auth_registrations_total() {
    metrics::counter!("auth_registrations_total").increment(1);
}

/// Record a login attempt outcome.
pub fn auth_logins_total(success: bool) {
    let outcome = if success { "success" } else { "failure" };
    metrics::counter!("auth_logins_total", "outcome" => outcome.to_string()).increment(1);
}

/// Record a completed password reset.
pub fn password_resets_total() {
    metrics::counter!("password_resets_total").increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_are_noops_without_recorder() {
        http_requests_total("POST", "/sessions", 200);
        auth_registrations_total();
        auth_logins_total(true);
        auth_logins_total(false);
        password_resets_total();
    }
}
