//! Integration tests for the HTTP server.
//!
//! Drives the full router over the in-memory store: registration, login,
//! profile access, logout, and the password-reset flow.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{
    Request, Response, StatusCode,
    header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, SET_COOKIE},
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use http_body_util::BodyExt;
use tower::ServiceExt; // For `oneshot` method
use ua_server::api::{AppState, create_router};
use user_auth::{auth::AuthService, db::MemoryUserStore};

/// Helper to create a test server over a fresh in-memory store
fn create_test_app() -> Router {
    let auth = Arc::new(AuthService::new(Arc::new(MemoryUserStore::new())));
    create_router(AppState { auth })
}

/// Build a form-encoded request
fn form_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Parse a JSON response body
async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}

/// Extract the session token from a login response's Set-Cookie header
fn session_cookie_from(response: &Response<Body>) -> String {
    let header = response
        .headers()
        .get(SET_COOKIE)
        .expect("login response should set a cookie")
        .to_str()
        .unwrap();

    header
        .split(';')
        .next()
        .and_then(|pair| pair.strip_prefix("session_id="))
        .expect("cookie should be the session id")
        .to_string()
}

async fn register(app: &Router, email: &str, password: &str) -> Response<Body> {
    app.clone()
        .oneshot(form_request(
            "POST",
            "/users",
            &format!("email={email}&password={password}"),
        ))
        .await
        .unwrap()
}

async fn login(app: &Router, email: &str, password: &str) -> Response<Body> {
    app.clone()
        .oneshot(form_request(
            "POST",
            "/sessions",
            &format!("email={email}&password={password}"),
        ))
        .await
        .unwrap()
}

// ============================================================================
// Public endpoints
// ============================================================================

#[tokio::test]
async fn test_index_welcome_message() {
    let app = create_test_app();

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Bienvenue");
}

#[tokio::test]
async fn test_health_check_endpoint() {
    let app = create_test_app();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], true);
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let app = create_test_app();

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}

// ============================================================================
// Registration
// ============================================================================

#[tokio::test]
async fn test_register_and_duplicate() {
    let app = create_test_app();

    let response = register(&app, "a@x.com", "pw1").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["email"], "a@x.com");
    assert_eq!(body["message"], "user created");

    let response = register(&app, "a@x.com", "pw1").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["message"], "email already registered");
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_login_wrong_password() {
    let app = create_test_app();
    register(&app, "a@x.com", "pw1").await;

    let response = login(&app, "a@x.com", "wrong").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_login_unknown_email() {
    let app = create_test_app();

    let response = login(&app, "ghost@x.com", "pw1").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_missing_credentials() {
    let app = create_test_app();

    let response = app
        .oneshot(form_request("POST", "/sessions", ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_sets_session_cookie() {
    let app = create_test_app();
    register(&app, "a@x.com", "pw1").await;

    let response = login(&app, "a@x.com", "pw1").await;
    assert_eq!(response.status(), StatusCode::OK);

    let session_id = session_cookie_from(&response);
    assert!(!session_id.is_empty());

    let body = json_body(response).await;
    assert_eq!(body["email"], "a@x.com");
    assert_eq!(body["message"], "logged in");
}

#[tokio::test]
async fn test_login_with_basic_authorization_header() {
    let app = create_test_app();
    register(&app, "a@x.com", "pw1").await;

    let credentials = STANDARD.encode("a@x.com:pw1");
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/sessions")
                .header(AUTHORIZATION, format!("Basic {credentials}"))
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let session_id = session_cookie_from(&response);
    assert!(!session_id.is_empty());
}

// ============================================================================
// Profile and logout
// ============================================================================

#[tokio::test]
async fn test_profile_requires_session() {
    let app = create_test_app();

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/profile").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/profile")
                .header(COOKIE, "session_id=not-a-real-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_logout_without_session_is_forbidden() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/sessions")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ============================================================================
// Full account lifecycle, as a client would drive it
// ============================================================================

#[tokio::test]
async fn test_full_account_lifecycle() {
    let app = create_test_app();
    let email = "guillaume@example.com";
    let password = "b4l0u";
    let new_password = "t4rt1fl3tt3";

    // Register, then attempt to log in with the wrong password.
    assert_eq!(register(&app, email, password).await.status(), StatusCode::OK);
    assert_eq!(
        login(&app, email, new_password).await.status(),
        StatusCode::UNAUTHORIZED
    );

    // Profile is forbidden while unlogged.
    let response = app
        .clone()
        .oneshot(Request::builder().uri("/profile").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Log in and fetch the profile with the session cookie.
    let response = login(&app, email, password).await;
    assert_eq!(response.status(), StatusCode::OK);
    let session_id = session_cookie_from(&response);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/profile")
                .header(COOKIE, format!("session_id={session_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["email"], email);

    // Log out: redirect home, cookie cleared, session gone.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/sessions")
                .header(COOKIE, format!("session_id={session_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers().get("location").unwrap(), "/");
    let cleared = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
    assert!(cleared.starts_with("session_id=;"));

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/profile")
                .header(COOKIE, format!("session_id={session_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Reset the password and log in with the new one.
    let response = app
        .clone()
        .oneshot(form_request(
            "POST",
            "/reset_password",
            &format!("email={email}"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["email"], email);
    let reset_token = body["reset_token"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(form_request(
            "PUT",
            "/reset_password",
            &format!("email={email}&reset_token={reset_token}&new_password={new_password}"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Password updated");

    assert_eq!(
        login(&app, email, password).await.status(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(login(&app, email, new_password).await.status(), StatusCode::OK);
}

// ============================================================================
// Password reset edge cases
// ============================================================================

#[tokio::test]
async fn test_reset_password_unknown_email() {
    let app = create_test_app();

    let response = app
        .oneshot(form_request("POST", "/reset_password", "email=ghost@x.com"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_reset_token_is_single_use_over_http() {
    let app = create_test_app();
    register(&app, "a@x.com", "pw1").await;

    let response = app
        .clone()
        .oneshot(form_request("POST", "/reset_password", "email=a@x.com"))
        .await
        .unwrap();
    let body = json_body(response).await;
    let reset_token = body["reset_token"].as_str().unwrap().to_string();

    let consume = |new_password: &str| {
        form_request(
            "PUT",
            "/reset_password",
            &format!("email=a@x.com&reset_token={reset_token}&new_password={new_password}"),
        )
    };

    let response = app.clone().oneshot(consume("pw2")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(consume("pw3")).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // The first consumption stuck; the second changed nothing.
    assert_eq!(login(&app, "a@x.com", "pw2").await.status(), StatusCode::OK);
    assert_eq!(
        login(&app, "a@x.com", "pw3").await.status(),
        StatusCode::UNAUTHORIZED
    );
}

#[tokio::test]
async fn test_update_password_with_bogus_token() {
    let app = create_test_app();
    register(&app, "a@x.com", "pw1").await;

    let response = app
        .oneshot(form_request(
            "PUT",
            "/reset_password",
            "email=a@x.com&reset_token=never-issued&new_password=pw2",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
