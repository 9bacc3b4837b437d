//! Session-cookie authentication middleware.
//!
//! Resolves the `session_id` cookie to a user and injects it into request
//! extensions for downstream handlers. Requests without a resolvable
//! session are rejected with `403 Forbidden`.
//!
//! # Extracting the user
//!
//! ```rust,no_run
//! use axum::{Extension, Json};
//! use ua_server::api::middleware::CurrentUser;
//!
//! async fn handler(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Json<String> {
//!     Json(user.email)
//! }
//! # let _ = handler;
//! ```

use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode, header::COOKIE},
    middleware::Next,
    response::Response,
};
use user_auth::auth::User;

use super::AppState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "session_id";

/// The authenticated user, injected into request extensions.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

/// Extract the session token from the `Cookie` header, if any.
pub fn session_cookie(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(COOKIE)?.to_str().ok()?;

    raw.split(';')
        .map(str::trim)
        .find_map(|pair| {
            pair.strip_prefix(SESSION_COOKIE)
                .and_then(|rest| rest.strip_prefix('='))
        })
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

/// Middleware guarding session-authenticated endpoints.
pub async fn session_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let session_id = session_cookie(request.headers());

    let user = state
        .auth
        .user_from_session(session_id.as_deref())
        .await
        .map_err(|_| StatusCode::FORBIDDEN)?;

    match user {
        Some(user) => {
            request.extensions_mut().insert(CurrentUser(user));
            Ok(next.run(request).await)
        }
        None => Err(StatusCode::FORBIDDEN),
    }
}
