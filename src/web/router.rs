//! Router configuration for the Web API.

use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{
    cancel_my_reservation, cancel_reservation, create_reservation, list_available_rooms,
    list_meeting_rooms, list_my_reservations, list_reservations, login, logout, me, register,
    AppState,
};
use super::middleware::{create_cors_layer, rate_limit, token_auth, RateLimitState};

/// Create the main API router.
///
/// Authentication is enforced per-route by the `AuthSession` extractor; the
/// `/auth` routes are the only public ones. The route table mirrors the
/// external contract: user-scope reservation actions under `/users/me`,
/// admin-scope listing and cancellation at the top level.
pub fn create_router(
    app_state: Arc<AppState>,
    rate_limit_state: RateLimitState,
    cors_origins: &[String],
) -> Router {
    let auth_routes = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout));

    let tokens = app_state.tokens.clone();

    Router::new()
        .nest("/auth", auth_routes)
        .route("/users/me", get(me))
        .route(
            "/users/me/reservations",
            get(list_my_reservations).post(create_reservation),
        )
        .route(
            "/users/me/reservations/:reservation_id",
            patch(cancel_my_reservation),
        )
        .route("/meeting-rooms", get(list_meeting_rooms))
        .route("/meeting-rooms/available", get(list_available_rooms))
        .route("/reservations", get(list_reservations))
        .route("/reservations/:reservation_id", patch(cancel_reservation))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(middleware::from_fn(move |req, next| {
                    let state = rate_limit_state.clone();
                    rate_limit(state, req, next)
                }))
                .layer(middleware::from_fn(move |req, next| {
                    let tokens = tokens.clone();
                    token_auth(tokens, req, next)
                })),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
