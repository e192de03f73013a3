//! Meeting room handlers.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::booking::ReservationService;
use crate::db::MeetingRoomRepository;
use crate::web::dto::{MeetingRoomResponse, MeetingRoomWithTimeSlotsResponse};
use crate::web::error::ApiError;
use crate::web::middleware::AuthSession;

use super::AppState;

/// GET /meeting-rooms - All rooms (admin only).
pub async fn list_meeting_rooms(
    State(state): State<Arc<AppState>>,
    session: AuthSession,
) -> Result<Json<Vec<MeetingRoomResponse>>, ApiError> {
    session.require_admin()?;

    let pool = state.db.pool();
    let rooms = state
        .retry
        .run(|| async move { MeetingRoomRepository::new(pool).list().await })
        .await?;

    Ok(Json(rooms.into_iter().map(MeetingRoomResponse::from).collect()))
}

/// GET /meeting-rooms/available - Rooms with their still-unreserved slots.
pub async fn list_available_rooms(
    State(state): State<Arc<AppState>>,
    _session: AuthSession,
) -> Result<Json<Vec<MeetingRoomWithTimeSlotsResponse>>, ApiError> {
    let service = ReservationService::new(&state.db, &state.retry);
    let available = service.list_available_rooms().await?;

    Ok(Json(
        available
            .into_iter()
            .map(MeetingRoomWithTimeSlotsResponse::from)
            .collect(),
    ))
}
