//! Reservation model.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::room::{MeetingRoom, TimeSlot};
use super::user::{Role, User};

/// A reservation row.
///
/// Reservations are never hard-deleted; cancellation flips `canceled` and
/// stamps `canceled_at`. At most one non-canceled row may exist per
/// (meeting_room_id, time_slot_id) pair, enforced by a partial unique index.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Reservation {
    /// Unique reservation ID.
    pub id: Uuid,
    /// Booking user.
    pub user_id: Uuid,
    /// Reserved room.
    pub meeting_room_id: Uuid,
    /// Reserved slot.
    pub time_slot_id: Uuid,
    /// Whether the reservation has been canceled.
    pub canceled: bool,
    /// Cancellation timestamp, if canceled.
    pub canceled_at: Option<DateTime<Utc>>,
    /// Booking timestamp.
    pub reserved_at: DateTime<Utc>,
}

/// Data for creating a new reservation.
#[derive(Debug, Clone)]
pub struct NewReservation {
    /// Unique reservation ID.
    pub id: Uuid,
    /// Booking user.
    pub user_id: Uuid,
    /// Room to reserve.
    pub meeting_room_id: Uuid,
    /// Slot to reserve.
    pub time_slot_id: Uuid,
}

impl NewReservation {
    /// Create a reservation request with a fresh ID.
    pub fn new(user_id: Uuid, meeting_room_id: Uuid, time_slot_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            meeting_room_id,
            time_slot_id,
        }
    }
}

/// A user's reservation joined with its room and slot.
#[derive(Debug, Clone)]
pub struct UserReservation {
    /// Reservation ID.
    pub id: Uuid,
    /// Whether the reservation has been canceled.
    pub canceled: bool,
    /// Cancellation timestamp, if canceled.
    pub canceled_at: Option<DateTime<Utc>>,
    /// Booking timestamp.
    pub reserved_at: DateTime<Utc>,
    /// Reserved room.
    pub meeting_room: MeetingRoom,
    /// Reserved slot.
    pub time_slot: TimeSlot,
}

/// A reservation joined with its user, room and slot (admin view).
#[derive(Debug, Clone)]
pub struct ReservationDetail {
    /// Reservation ID.
    pub id: Uuid,
    /// Whether the reservation has been canceled.
    pub canceled: bool,
    /// Cancellation timestamp, if canceled.
    pub canceled_at: Option<DateTime<Utc>>,
    /// Booking timestamp.
    pub reserved_at: DateTime<Utc>,
    /// Booking user.
    pub user: ReservationUser,
    /// Reserved room.
    pub meeting_room: MeetingRoom,
    /// Reserved slot.
    pub time_slot: TimeSlot,
}

/// The user fields exposed in the admin reservation view.
#[derive(Debug, Clone)]
pub struct ReservationUser {
    /// User ID.
    pub id: Uuid,
    /// Email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// User role.
    pub role: Role,
    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<User> for ReservationUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
            created_at: user.created_at,
        }
    }
}
