//! Handlers for the authenticated user's own resources.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::booking::ReservationService;
use crate::db::UserRepository;
use crate::web::dto::{
    CreateReservationRequest, ReservationResponse, UserReservationResponse, UserResponse,
    ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::middleware::AuthSession;

use super::AppState;

/// GET /users/me - Current user profile.
pub async fn me(
    State(state): State<Arc<AppState>>,
    session: AuthSession,
) -> Result<Json<UserResponse>, ApiError> {
    let pool = state.db.pool();
    let user = state
        .retry
        .run(|| async move { UserRepository::new(pool).get_by_id(session.user_id).await })
        .await?
        .ok_or_else(|| ApiError::not_found("user not found"))?;

    Ok(Json(UserResponse::from(user)))
}

/// GET /users/me/reservations - The caller's reservations.
pub async fn list_my_reservations(
    State(state): State<Arc<AppState>>,
    session: AuthSession,
) -> Result<Json<Vec<UserReservationResponse>>, ApiError> {
    let service = ReservationService::new(&state.db, &state.retry);
    let reservations = service.list_own(session.user_id).await?;

    Ok(Json(
        reservations
            .into_iter()
            .map(UserReservationResponse::from)
            .collect(),
    ))
}

/// POST /users/me/reservations - Book a room/time slot for the caller.
///
/// 201 on success, 409 when the slot is already reserved, 404 when the room
/// or slot does not exist.
pub async fn create_reservation(
    State(state): State<Arc<AppState>>,
    session: AuthSession,
    ValidatedJson(req): ValidatedJson<CreateReservationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let meeting_room_id = parse_id(&req.meeting_room_id, "meeting_room_id")?;
    let time_slot_id = parse_id(&req.time_slot_id, "time_slot_id")?;

    let service = ReservationService::new(&state.db, &state.retry);
    let reservation = service
        .create(session.user_id, meeting_room_id, time_slot_id)
        .await?;

    tracing::info!(
        reservation_id = %reservation.id,
        user_id = %session.user_id,
        "reservation created"
    );

    Ok((
        StatusCode::CREATED,
        Json(ReservationResponse::from(reservation)),
    ))
}

/// PATCH /users/me/reservations/:reservation_id - Cancel an own reservation.
///
/// A reservation that is absent, already canceled, or owned by another user
/// is uniformly reported as not-found.
pub async fn cancel_my_reservation(
    State(state): State<Arc<AppState>>,
    session: AuthSession,
    Path(reservation_id): Path<String>,
) -> Result<Json<ReservationResponse>, ApiError> {
    let reservation_id = parse_id(&reservation_id, "reservation_id")?;

    let service = ReservationService::new(&state.db, &state.retry);
    let reservation = service.cancel_own(reservation_id, session.user_id).await?;

    tracing::info!(
        reservation_id = %reservation.id,
        user_id = %session.user_id,
        "reservation canceled"
    );

    Ok(Json(ReservationResponse::from(reservation)))
}

/// Parse a path or body identifier into a UUID, rejecting malformed input
/// before any storage call.
pub(super) fn parse_id(raw: &str, field: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::bad_request(format!("Invalid {field}")))
}
