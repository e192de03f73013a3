//! Authentication handlers.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use crate::auth::AuthService;
use crate::web::dto::{LoginRequest, RegisterRequest, UserResponse, ValidatedJson};
use crate::web::error::ApiError;

use super::AppState;

/// POST /auth/register - Create a new account.
///
/// Duplicate emails surface as 409; a lost race between two concurrent
/// registrations of the same email is resolved by the storage constraint.
pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let service = AuthService::new(&state.db, &state.retry);
    let user = service.register(&req.name, &req.email, &req.password).await?;

    tracing::info!(user_id = %user.id, "user registered");

    let location = format!("{}/users/me", state.origin_url);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(UserResponse::from(user)),
    ))
}

/// POST /auth/login - Verify credentials and start a session.
///
/// On success the signed access token is set as an HTTP-only cookie. An
/// unknown email and a wrong password are both reported as not-found.
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<UserResponse>), ApiError> {
    let service = AuthService::new(&state.db, &state.retry);
    let user = service.authenticate(&req.email, &req.password).await?;

    let token = state.tokens.issue(user.id, user.role)?;
    let jar = jar.add(state.access_cookie(token));

    tracing::info!(user_id = %user.id, "user authenticated");

    Ok((jar, Json(UserResponse::from(user))))
}

/// POST /auth/logout - End the session.
///
/// Purely a transport-level instruction to discard the client-held token;
/// the token itself stays valid until its natural expiry.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> (CookieJar, StatusCode) {
    let jar = jar.remove(state.removal_cookie());
    (jar, StatusCode::NO_CONTENT)
}
