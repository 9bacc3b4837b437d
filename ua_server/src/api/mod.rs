//! HTTP API for the user authentication server.
//!
//! # Modules
//!
//! - [`auth`]: registration, login/logout, profile, password reset
//! - [`middleware`]: session-cookie authentication for protected endpoints
//! - [`request_id`]: request ID correlation and per-request metrics
//!
//! # Endpoints Overview
//!
//! ```text
//! GET    /                 - Welcome message (public)
//! GET    /health           - Server health status (public)
//! POST   /users            - Register user (public)
//! POST   /sessions         - Login, sets session_id cookie (public)
//! DELETE /sessions         - Logout, clears session_id cookie
//! GET    /profile          - Profile of the session's user
//! POST   /reset_password   - Issue a password-reset token (public)
//! PUT    /reset_password   - Consume a reset token, set a new password
//! ```
//!
//! Authenticated endpoints read the `session_id` cookie; there are no
//! bearer tokens. CORS is configured permissively for development.

pub mod auth;
pub mod middleware;
pub mod request_id;

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
};
use serde_json::json;
use tower_http::cors::CorsLayer;
use user_auth::auth::AuthService;

/// Application state shared across all HTTP handlers.
///
/// Cloned per request (cheap due to the Arc wrapper).
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
}

/// Create the complete API router with all endpoints and middleware.
pub fn create_router(state: AppState) -> Router {
    // Protected routes resolve the session cookie up front and inject the
    // current user into request extensions.
    let protected_routes = Router::new()
        .route("/profile", get(auth::profile))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::session_auth,
        ));

    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/users", post(auth::register))
        .route("/sessions", post(auth::login).delete(auth::logout))
        .route(
            "/reset_password",
            post(auth::reset_password).put(auth::update_password),
        )
        .merge(protected_routes)
        .layer(axum::middleware::from_fn(request_id::request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Welcome endpoint.
async fn index() -> Json<serde_json::Value> {
    Json(json!({ "message": "Bienvenue" }))
}

/// Health check endpoint for monitoring and load balancers.
///
/// Returns `200 OK` when the record store is reachable, `503 Service
/// Unavailable` otherwise.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let store_healthy = state.auth.health_check().await.is_ok();

    let status_code = if store_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = json!({
        "status": if store_healthy { "healthy" } else { "unhealthy" },
        "version": env!("CARGO_PKG_VERSION"),
        "database": store_healthy,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (status_code, Json(response))
}
