//! Web API authentication tests.
//!
//! Integration tests for registration, login, logout and the session
//! cookie gate.

mod common;

use axum::http::header::{COOKIE, LOCATION, SET_COOKIE};
use axum::http::{HeaderValue, StatusCode};
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::{json, Value};
use uuid::Uuid;

use common::{
    create_test_server, login_user, register_user, TEST_ORIGIN, TEST_SECRET,
};

// ============================================================================
// Registration
// ============================================================================

#[tokio::test]
async fn test_register_success() {
    let (server, _db) = create_test_server().await;

    let response = server
        .post("/auth/register")
        .json(&json!({
            "name": "John",
            "email": "john@example.com",
            "password": "password123"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let location = response
        .headers()
        .get(LOCATION)
        .expect("Location header")
        .to_str()
        .unwrap()
        .to_string();
    assert_eq!(location, format!("{TEST_ORIGIN}/users/me"));

    let body: Value = response.json();
    assert!(Uuid::parse_str(body["id"].as_str().unwrap()).is_ok());
    assert_eq!(body["email"], "john@example.com");
    assert_eq!(body["name"], "John");
    assert_eq!(body["role"], "user");
    assert!(body["created_at"].is_string());
    // The password hash never leaves the server
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let (server, _db) = create_test_server().await;

    register_user(&server, "John", "john@example.com", "password123").await;

    let response = server
        .post("/auth/register")
        .json(&json!({
            "name": "Johnny",
            "email": "john@example.com",
            "password": "password456"
        }))
        .await;

    response.assert_status(StatusCode::CONFLICT);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn test_register_invalid_email() {
    let (server, _db) = create_test_server().await;

    let response = server
        .post("/auth/register")
        .json(&json!({
            "name": "John",
            "email": "not-an-email",
            "password": "password123"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert!(body["error"]["details"]["email"].is_array());
}

#[tokio::test]
async fn test_register_short_password() {
    let (server, _db) = create_test_server().await;

    let response = server
        .post("/auth/register")
        .json(&json!({
            "name": "John",
            "email": "john@example.com",
            "password": "short"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_malformed_body() {
    let (server, _db) = create_test_server().await;

    let response = server
        .post("/auth/register")
        .json(&json!({ "name": "John" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

// ============================================================================
// Login / logout
// ============================================================================

#[tokio::test]
async fn test_login_success_sets_cookie() {
    let (server, _db) = create_test_server().await;

    register_user(&server, "John", "john@example.com", "password123").await;

    let response = server
        .post("/auth/login")
        .json(&json!({
            "email": "john@example.com",
            "password": "password123"
        }))
        .await;

    response.assert_status_ok();

    let set_cookie = response
        .headers()
        .get(SET_COOKIE)
        .expect("Set-Cookie header")
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("access_token="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("Secure"));
    assert!(set_cookie.contains("SameSite=None"));
    assert!(set_cookie.contains("Path=/"));

    let body: Value = response.json();
    assert_eq!(body["email"], "john@example.com");
    assert_eq!(body["role"], "user");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let (server, _db) = create_test_server().await;

    register_user(&server, "John", "john@example.com", "password123").await;

    let response = server
        .post("/auth/login")
        .json(&json!({
            "email": "john@example.com",
            "password": "wrong-password"
        }))
        .await;

    // Folded into not-found: no account enumeration
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_login_unknown_email() {
    let (server, _db) = create_test_server().await;

    let response = server
        .post("/auth/login")
        .json(&json!({
            "email": "nobody@example.com",
            "password": "password123"
        }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_logout_clears_session() {
    let (server, _db) = create_test_server().await;

    register_user(&server, "John", "john@example.com", "password123").await;
    login_user(&server, "john@example.com", "password123").await;

    server.get("/users/me").await.assert_status_ok();

    let response = server.post("/auth/logout").await;
    response.assert_status(StatusCode::NO_CONTENT);

    // The cleared cookie no longer authenticates
    let response = server.get("/users/me").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Session gate
// ============================================================================

#[tokio::test]
async fn test_me_requires_cookie() {
    let (server, _db) = create_test_server().await;

    let response = server.get("/users/me").await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_me_rejects_garbage_token() {
    let (server, _db) = create_test_server().await;

    let response = server
        .get("/users/me")
        .add_header(COOKIE, HeaderValue::from_static("access_token=garbage"))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_returns_profile() {
    let (server, _db) = create_test_server().await;

    register_user(&server, "John", "john@example.com", "password123").await;
    login_user(&server, "john@example.com", "password123").await;

    let response = server.get("/users/me").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["email"], "john@example.com");
    assert_eq!(body["name"], "John");
    assert_eq!(body["role"], "user");
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let (server, _db) = create_test_server().await;

    let now = Utc::now().timestamp();
    let token = encode(
        &Header::new(Algorithm::HS256),
        &json!({
            "sub": Uuid::new_v4().to_string(),
            "role": "user",
            "iat": now - 7200,
            "exp": now - 3600,
            "iss": TEST_ORIGIN,
        }),
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap();

    let response = server
        .get("/users/me")
        .add_header(
            COOKIE,
            HeaderValue::from_str(&format!("access_token={token}")).unwrap(),
        )
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_with_wrong_secret_rejected() {
    let (server, _db) = create_test_server().await;

    let now = Utc::now().timestamp();
    let token = encode(
        &Header::new(Algorithm::HS256),
        &json!({
            "sub": Uuid::new_v4().to_string(),
            "role": "user",
            "iat": now,
            "exp": now + 3600,
            "iss": TEST_ORIGIN,
        }),
        &EncodingKey::from_secret(b"some-other-secret"),
    )
    .unwrap();

    let response = server
        .get("/users/me")
        .add_header(
            COOKIE,
            HeaderValue::from_str(&format!("access_token={token}")).unwrap(),
        )
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let (server, _db) = create_test_server().await;

    let response = server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.text(), "OK");
}
