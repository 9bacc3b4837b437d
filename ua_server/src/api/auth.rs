//! Authentication API handlers.
//!
//! Form-based endpoints for registration, login/logout, profile access,
//! and the password-reset flow. Sessions are carried by the `session_id`
//! cookie set at login and cleared at logout.
//!
//! # Examples
//!
//! Register a new user:
//! ```bash
//! curl -X POST http://localhost:5000/users \
//!   -d 'email=bob@example.com&password=b4l0u'
//! ```
//!
//! Login (form fields or a Basic authorization header):
//! ```bash
//! curl -X POST http://localhost:5000/sessions \
//!   -d 'email=bob@example.com&password=b4l0u'
//! ```

use axum::{
    Extension, Form, Json,
    extract::State,
    http::{
        HeaderMap, HeaderValue, StatusCode,
        header::{AUTHORIZATION, LOCATION, SET_COOKIE},
    },
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use user_auth::auth::{AuthError, basic};

use super::{
    AppState,
    middleware::{CurrentUser, SESSION_COOKIE, session_cookie},
};
use crate::logging;

#[derive(Debug, Deserialize)]
pub struct RegisterPayload {
    pub email: String,
    pub password: String,
}

/// Login credentials; both fields optional so that a Basic authorization
/// header can stand in for the form.
#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResetRequestPayload {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePasswordPayload {
    pub email: String,
    pub reset_token: String,
    pub new_password: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub email: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct ResetTokenResponse {
    pub email: String,
    pub reset_token: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

/// Register a new user account.
///
/// # Response
///
/// On success, returns `200 OK`:
/// ```json
/// {"email": "bob@example.com", "message": "user created"}
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: email already registered
/// - `500 Internal Server Error`: store failure during registration
pub async fn register(
    State(state): State<AppState>,
    Form(payload): Form<RegisterPayload>,
) -> Result<Json<UserResponse>, (StatusCode, Json<ErrorResponse>)> {
    match state.auth.register(&payload.email, &payload.password).await {
        Ok(user) => {
            crate::metrics::auth_registrations_total();
            Ok(Json(UserResponse {
                email: user.email,
                message: "user created".to_string(),
            }))
        }
        Err(AuthError::EmailTaken(_)) => Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                message: "email already registered".to_string(),
            }),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                message: e.client_message(),
            }),
        )),
    }
}

/// Authenticate a user and open a session.
///
/// Credentials come from the form fields, or from an
/// `Authorization: Basic` header when the form is empty. On success the
/// fresh session token is set as the `session_id` cookie.
///
/// # Errors
///
/// - `401 Unauthorized`: missing or invalid credentials
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(payload): Form<LoginPayload>,
) -> Response {
    let credentials = match (payload.email, payload.password) {
        (Some(email), Some(password)) => Some((email, password)),
        _ => headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(basic::decode_credentials),
    };

    let Some((email, password)) = credentials else {
        return unauthorized();
    };

    match state.auth.valid_login(&email, &password).await {
        Ok(true) => {}
        Ok(false) => {
            crate::metrics::auth_logins_total(false);
            logging::log_auth_event("failed_login", &format!("email={email};password={password}"));
            return unauthorized();
        }
        Err(_) => return unauthorized(),
    }

    match state.auth.create_session(&email).await {
        Ok(Some(session_id)) => {
            crate::metrics::auth_logins_total(true);
            let mut response = Json(UserResponse {
                email,
                message: "logged in".to_string(),
            })
            .into_response();
            if let Ok(cookie) =
                HeaderValue::from_str(&format!("{SESSION_COOKIE}={session_id}; Path=/; HttpOnly"))
            {
                response.headers_mut().insert(SET_COOKIE, cookie);
            }
            response
        }
        // The account vanished between verification and session issuance,
        // or the store failed; both surface as 401.
        Ok(None) | Err(_) => unauthorized(),
    }
}

/// Close the current session.
///
/// Reads the `session_id` cookie, destroys the matching session, clears
/// the cookie, and redirects home.
///
/// # Errors
///
/// - `403 Forbidden`: no matching session
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let session_id = session_cookie(&headers);

    let user = match state.auth.user_from_session(session_id.as_deref()).await {
        Ok(Some(user)) => user,
        _ => return forbidden(),
    };

    if state.auth.destroy_session(user.id).await.is_err() {
        return forbidden();
    }

    logging::log_auth_event("logout", &format!("email={}", user.email));

    let mut response = StatusCode::FOUND.into_response();
    response
        .headers_mut()
        .insert(LOCATION, HeaderValue::from_static("/"));
    response.headers_mut().insert(
        SET_COOKIE,
        HeaderValue::from_static("session_id=; Path=/; Max-Age=0"),
    );
    response
}

/// Profile of the session's user.
///
/// The session middleware has already resolved the cookie; unauthenticated
/// requests never reach this handler.
pub async fn profile(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Json<ProfileResponse> {
    Json(ProfileResponse { email: user.email })
}

/// Issue a password-reset token.
///
/// # Response
///
/// On success, returns `200 OK`:
/// ```json
/// {"email": "bob@example.com", "reset_token": "..."}
/// ```
///
/// # Errors
///
/// - `403 Forbidden`: unknown email
pub async fn reset_password(
    State(state): State<AppState>,
    Form(payload): Form<ResetRequestPayload>,
) -> Result<Json<ResetTokenResponse>, StatusCode> {
    match state.auth.issue_reset_token(&payload.email).await {
        Ok(reset_token) => Ok(Json(ResetTokenResponse {
            email: payload.email,
            reset_token,
        })),
        Err(_) => Err(StatusCode::FORBIDDEN),
    }
}

/// Consume a reset token and set a new password.
///
/// # Errors
///
/// - `403 Forbidden`: unknown or already-consumed token
pub async fn update_password(
    State(state): State<AppState>,
    Form(payload): Form<UpdatePasswordPayload>,
) -> Result<Json<UserResponse>, StatusCode> {
    match state
        .auth
        .update_password(&payload.reset_token, &payload.new_password)
        .await
    {
        Ok(()) => {
            crate::metrics::password_resets_total();
            Ok(Json(UserResponse {
                email: payload.email,
                message: "Password updated".to_string(),
            }))
        }
        Err(_) => {
            logging::log_auth_event(
                "failed_password_reset",
                &format!(
                    "email={};reset_token={};new_password={}",
                    payload.email, payload.reset_token, payload.new_password
                ),
            );
            Err(StatusCode::FORBIDDEN)
        }
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse {
            message: "invalid credentials".to_string(),
        }),
    )
        .into_response()
}

fn forbidden() -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(ErrorResponse {
            message: "no active session".to_string(),
        }),
    )
        .into_response()
}
