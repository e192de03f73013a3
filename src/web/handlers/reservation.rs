//! Admin-scope reservation handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::booking::ReservationService;
use crate::web::dto::{ReservationDetailResponse, ReservationResponse};
use crate::web::error::ApiError;
use crate::web::middleware::AuthSession;

use super::user::parse_id;
use super::AppState;

/// GET /reservations - All reservations with user, room and slot (admin only).
pub async fn list_reservations(
    State(state): State<Arc<AppState>>,
    session: AuthSession,
) -> Result<Json<Vec<ReservationDetailResponse>>, ApiError> {
    session.require_admin()?;

    let service = ReservationService::new(&state.db, &state.retry);
    let reservations = service.list_all().await?;

    Ok(Json(
        reservations
            .into_iter()
            .map(ReservationDetailResponse::from)
            .collect(),
    ))
}

/// PATCH /reservations/:reservation_id - Cancel any reservation (admin only).
pub async fn cancel_reservation(
    State(state): State<Arc<AppState>>,
    session: AuthSession,
    Path(reservation_id): Path<String>,
) -> Result<Json<ReservationResponse>, ApiError> {
    session.require_admin()?;

    let reservation_id = parse_id(&reservation_id, "reservation_id")?;

    let service = ReservationService::new(&state.db, &state.retry);
    let reservation = service.cancel_any(reservation_id).await?;

    tracing::info!(
        reservation_id = %reservation.id,
        admin_id = %session.user_id,
        "reservation canceled by admin"
    );

    Ok(Json(ReservationResponse::from(reservation)))
}
