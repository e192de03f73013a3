//! Reservation workflows.
//!
//! Thin orchestration over the reservation repository: no booking invariant
//! lives here beyond argument resolution, since the storage-level uniqueness
//! constraint is what serializes concurrent bookings. Reads and the guarded
//! insert run under the retry policy; a conflict is a permanent error and is
//! never retried.

use uuid::Uuid;

use crate::db::{
    Database, MeetingRoomRepository, NewReservation, Reservation, ReservationDetail,
    ReservationRepository, RoomAvailability, UserReservation,
};
use crate::retry::RetryPolicy;
use crate::{Result, RoombookError};

/// Orchestrates reservation creation, cancellation and listing.
pub struct ReservationService<'a> {
    db: &'a Database,
    retry: &'a RetryPolicy,
}

impl<'a> ReservationService<'a> {
    /// Create a reservation service over the shared database and retry policy.
    pub fn new(db: &'a Database, retry: &'a RetryPolicy) -> Self {
        Self { db, retry }
    }

    /// Book a slot for a user.
    ///
    /// Safe to re-invoke on transient failures: the reservation id is fixed
    /// up front and the active-slot constraint turns a duplicate attempt
    /// into a conflict rather than a duplicate row.
    pub async fn create(
        &self,
        user_id: Uuid,
        meeting_room_id: Uuid,
        time_slot_id: Uuid,
    ) -> Result<Reservation> {
        let new = NewReservation::new(user_id, meeting_room_id, time_slot_id);
        let pool = self.db.pool();

        self.retry
            .run(|| {
                let new = new.clone();
                async move { ReservationRepository::new(pool).insert(&new).await }
            })
            .await
    }

    /// Cancel a reservation owned by the acting user.
    ///
    /// An absent reservation and one owned by somebody else are both
    /// reported as not-found.
    pub async fn cancel_own(&self, reservation_id: Uuid, user_id: Uuid) -> Result<Reservation> {
        let pool = self.db.pool();

        self.retry
            .run(|| async move {
                ReservationRepository::new(pool)
                    .cancel_for_user(reservation_id, user_id)
                    .await
            })
            .await?
            .ok_or_else(|| RoombookError::NotFound("reservation".to_string()))
    }

    /// Cancel any reservation (admin scope).
    pub async fn cancel_any(&self, reservation_id: Uuid) -> Result<Reservation> {
        let pool = self.db.pool();

        self.retry
            .run(|| async move { ReservationRepository::new(pool).cancel(reservation_id).await })
            .await?
            .ok_or_else(|| RoombookError::NotFound("reservation".to_string()))
    }

    /// List the acting user's reservations.
    pub async fn list_own(&self, user_id: Uuid) -> Result<Vec<UserReservation>> {
        let pool = self.db.pool();

        self.retry
            .run(|| async move { ReservationRepository::new(pool).list_for_user(user_id).await })
            .await
    }

    /// List all reservations (admin scope).
    pub async fn list_all(&self) -> Result<Vec<ReservationDetail>> {
        let pool = self.db.pool();

        self.retry
            .run(|| async move { ReservationRepository::new(pool).list_all().await })
            .await
    }

    /// List rooms with their still-unreserved time slots.
    pub async fn list_available_rooms(&self) -> Result<Vec<RoomAvailability>> {
        let pool = self.db.pool();

        self.retry
            .run(|| async move { MeetingRoomRepository::new(pool).list_available().await })
            .await
    }
}
