//! Test helpers for Web API tests.
//!
//! Provides a TestServer bootstrap over an in-memory (or caller-supplied)
//! database plus helpers for seeding reference data and driving the auth
//! flow.

use std::sync::Arc;

use axum_test::{TestServer, TestServerConfig};
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use uuid::Uuid;

use roombook::config::AuthConfig;
use roombook::web::handlers::AppState;
use roombook::web::middleware::RateLimitState;
use roombook::web::router::{create_health_router, create_router};
use roombook::{
    Database, MeetingRoomRepository, NewMeetingRoom, NewTimeSlot, NewUser, Role, UserRepository,
};

/// Secret used to sign tokens in tests.
pub const TEST_SECRET: &str = "test-secret-key-for-testing-only";

/// Issuer pinned into test tokens.
pub const TEST_ORIGIN: &str = "http://localhost:8080";

/// Create the auth configuration used by test servers.
pub fn test_auth_config() -> AuthConfig {
    AuthConfig {
        secret_key: TEST_SECRET.to_string(),
        origin_url: TEST_ORIGIN.to_string(),
        cookie_domain: String::new(),
        token_ttl_days: 30,
    }
}

/// Create a test server with an in-memory database.
pub async fn create_test_server() -> (TestServer, Arc<Database>) {
    let db = Arc::new(
        Database::open_in_memory()
            .await
            .expect("Failed to create test database"),
    );
    let server = create_test_server_with_db(db.clone());
    (server, db)
}

/// Create a test server over an existing database.
///
/// Rate limiting is disabled: every request in the harness shares one
/// client address bucket.
pub fn create_test_server_with_db(db: Arc<Database>) -> TestServer {
    let app_state = Arc::new(AppState::new(db, &test_auth_config()));
    let router =
        create_router(app_state, RateLimitState::new(0), &[]).merge(create_health_router());

    let config = TestServerConfig {
        save_cookies: true,
        ..TestServerConfig::default()
    };

    TestServer::new_with_config(router, config).expect("Failed to create test server")
}

/// Seed one meeting room with a single 9:00-9:30 slot.
pub async fn seed_room_with_slot(db: &Database) -> (Uuid, Uuid) {
    let repo = MeetingRoomRepository::new(db.pool());
    let room = repo
        .insert(&NewMeetingRoom::new("Meeting Room A"))
        .await
        .expect("Failed to seed room");
    let slot = repo
        .insert_slot(&NewTimeSlot::new(
            room.id,
            Utc.with_ymd_and_hms(2025, 6, 2, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 6, 2, 9, 30, 0).unwrap(),
        ))
        .await
        .expect("Failed to seed slot");

    (room.id, slot.id)
}

/// Create an admin account directly in the database.
///
/// Registration always produces regular users, so admin accounts are
/// provisioned out of band.
pub async fn seed_admin(db: &Database, email: &str, password: &str) -> Uuid {
    let hashed = roombook::hash_password(password).expect("Failed to hash password");
    let admin = UserRepository::new(db.pool())
        .create(&NewUser::new(email, "Admin", hashed).with_role(Role::Admin))
        .await
        .expect("Failed to seed admin");

    admin.id
}

/// Register a user through the API and return the response body.
pub async fn register_user(server: &TestServer, name: &str, email: &str, password: &str) -> Value {
    let response = server
        .post("/auth/register")
        .json(&json!({
            "name": name,
            "email": email,
            "password": password,
        }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}

/// Log in through the API; the session cookie is saved on the server client.
pub async fn login_user(server: &TestServer, email: &str, password: &str) -> Value {
    let response = server
        .post("/auth/login")
        .json(&json!({
            "email": email,
            "password": password,
        }))
        .await;

    response.assert_status_ok();
    response.json::<Value>()
}

/// Register and log in a fresh user, returning its id.
pub async fn register_and_login(
    server: &TestServer,
    name: &str,
    email: &str,
    password: &str,
) -> Uuid {
    let body = register_user(server, name, email, password).await;
    login_user(server, email, password).await;

    Uuid::parse_str(body["id"].as_str().expect("user id in response")).expect("valid user id")
}
