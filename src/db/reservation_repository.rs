//! Reservation repository.
//!
//! There is no in-memory lock or check-then-insert sequence here: the
//! partial unique index over active (meeting_room_id, time_slot_id) pairs is
//! the single serialization point for bookings. Two concurrent inserts for
//! the same slot race at the storage layer and exactly one wins; the loser
//! gets a uniqueness violation which this module translates into a typed
//! conflict.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::reservation::{
    NewReservation, Reservation, ReservationDetail, ReservationUser, UserReservation,
};
use super::room::{MeetingRoom, TimeSlot};
use super::user::Role;
use crate::{Result, RoombookError};

/// Repository for reservation rows.
pub struct ReservationRepository<'a> {
    pool: &'a SqlitePool,
}

const RESERVATION_COLUMNS: &str =
    "id, user_id, meeting_room_id, time_slot_id, canceled, canceled_at, reserved_at";

/// One row of the user reservation join, flattened.
#[derive(sqlx::FromRow)]
struct UserReservationRow {
    id: Uuid,
    canceled: bool,
    canceled_at: Option<DateTime<Utc>>,
    reserved_at: DateTime<Utc>,
    room_id: Uuid,
    room_name: String,
    room_created_at: DateTime<Utc>,
    slot_id: Uuid,
    slot_room_id: Uuid,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    slot_created_at: DateTime<Utc>,
}

/// One row of the admin reservation join, flattened.
#[derive(sqlx::FromRow)]
struct ReservationDetailRow {
    id: Uuid,
    canceled: bool,
    canceled_at: Option<DateTime<Utc>>,
    reserved_at: DateTime<Utc>,
    user_id: Uuid,
    user_email: String,
    user_name: String,
    user_role: Role,
    user_created_at: DateTime<Utc>,
    room_id: Uuid,
    room_name: String,
    room_created_at: DateTime<Utc>,
    slot_id: Uuid,
    slot_room_id: Uuid,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    slot_created_at: DateTime<Utc>,
}

impl<'a> ReservationRepository<'a> {
    /// Create a new ReservationRepository with the given pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Attempt to book a slot with a single guarded insert.
    ///
    /// A uniqueness violation on the active-slot index means the slot is
    /// already booked; a foreign key violation means the room or slot does
    /// not exist.
    pub async fn insert(&self, new: &NewReservation) -> Result<Reservation> {
        sqlx::query_as::<_, Reservation>(&format!(
            "INSERT INTO reservations (id, user_id, meeting_room_id, time_slot_id, canceled, reserved_at)
             VALUES (?, ?, ?, ?, 0, ?)
             RETURNING {RESERVATION_COLUMNS}"
        ))
        .bind(new.id)
        .bind(new.user_id)
        .bind(new.meeting_room_id)
        .bind(new.time_slot_id)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await
        .map_err(|e| match RoombookError::from(e) {
            RoombookError::Conflict(_) => {
                RoombookError::Conflict("time slot already reserved".to_string())
            }
            RoombookError::NotFound(_) => {
                RoombookError::NotFound("meeting room or time slot".to_string())
            }
            other => other,
        })
    }

    /// Cancel a reservation owned by `user_id`.
    ///
    /// Returns `None` when no active reservation matches both the id and the
    /// owner; the caller reports that as not-found so that other users'
    /// reservations are indistinguishable from absent ones.
    pub async fn cancel_for_user(&self, id: Uuid, user_id: Uuid) -> Result<Option<Reservation>> {
        let reservation = sqlx::query_as::<_, Reservation>(&format!(
            "UPDATE reservations
             SET canceled = 1, canceled_at = ?
             WHERE id = ? AND user_id = ? AND canceled = 0
             RETURNING {RESERVATION_COLUMNS}"
        ))
        .bind(Utc::now())
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(reservation)
    }

    /// Cancel any active reservation (admin scope).
    pub async fn cancel(&self, id: Uuid) -> Result<Option<Reservation>> {
        let reservation = sqlx::query_as::<_, Reservation>(&format!(
            "UPDATE reservations
             SET canceled = 1, canceled_at = ?
             WHERE id = ? AND canceled = 0
             RETURNING {RESERVATION_COLUMNS}"
        ))
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(reservation)
    }

    /// List a user's reservations with their room and slot, newest first.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<UserReservation>> {
        let rows = sqlx::query_as::<_, UserReservationRow>(
            "SELECT v.id, v.canceled, v.canceled_at, v.reserved_at,
                    r.id AS room_id, r.name AS room_name, r.created_at AS room_created_at,
                    t.id AS slot_id, t.meeting_room_id AS slot_room_id,
                    t.start_date, t.end_date, t.created_at AS slot_created_at
             FROM reservations v
             JOIN meeting_rooms r ON r.id = v.meeting_room_id
             JOIN time_slots t ON t.id = v.time_slot_id
             WHERE v.user_id = ?
             ORDER BY v.reserved_at DESC",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(UserReservation::from).collect())
    }

    /// List all reservations with their user, room and slot, newest first.
    pub async fn list_all(&self) -> Result<Vec<ReservationDetail>> {
        let rows = sqlx::query_as::<_, ReservationDetailRow>(
            "SELECT v.id, v.canceled, v.canceled_at, v.reserved_at,
                    u.id AS user_id, u.email AS user_email, u.name AS user_name,
                    u.role AS user_role, u.created_at AS user_created_at,
                    r.id AS room_id, r.name AS room_name, r.created_at AS room_created_at,
                    t.id AS slot_id, t.meeting_room_id AS slot_room_id,
                    t.start_date, t.end_date, t.created_at AS slot_created_at
             FROM reservations v
             JOIN users u ON u.id = v.user_id
             JOIN meeting_rooms r ON r.id = v.meeting_room_id
             JOIN time_slots t ON t.id = v.time_slot_id
             ORDER BY v.reserved_at DESC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(ReservationDetail::from).collect())
    }
}

impl From<UserReservationRow> for UserReservation {
    fn from(row: UserReservationRow) -> Self {
        Self {
            id: row.id,
            canceled: row.canceled,
            canceled_at: row.canceled_at,
            reserved_at: row.reserved_at,
            meeting_room: MeetingRoom {
                id: row.room_id,
                name: row.room_name,
                created_at: row.room_created_at,
            },
            time_slot: TimeSlot {
                id: row.slot_id,
                meeting_room_id: row.slot_room_id,
                start_date: row.start_date,
                end_date: row.end_date,
                created_at: row.slot_created_at,
            },
        }
    }
}

impl From<ReservationDetailRow> for ReservationDetail {
    fn from(row: ReservationDetailRow) -> Self {
        Self {
            id: row.id,
            canceled: row.canceled,
            canceled_at: row.canceled_at,
            reserved_at: row.reserved_at,
            user: ReservationUser {
                id: row.user_id,
                email: row.user_email,
                name: row.user_name,
                role: row.user_role,
                created_at: row.user_created_at,
            },
            meeting_room: MeetingRoom {
                id: row.room_id,
                name: row.room_name,
                created_at: row.room_created_at,
            },
            time_slot: TimeSlot {
                id: row.slot_id,
                meeting_room_id: row.slot_room_id,
                start_date: row.start_date,
                end_date: row.end_date,
                created_at: row.slot_created_at,
            },
        }
    }
}
