//! Response DTOs for the Web API.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::db::{
    MeetingRoom, Reservation, ReservationDetail, ReservationUser, Role, RoomAvailability,
    TimeSlot, User, UserReservation,
};

/// User information in responses. Never carries the password hash.
#[derive(Debug, Serialize)]
pub struct UserResponse {
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

impl From<User> for UserResponse {
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

impl From<ReservationUser> for UserResponse {
    fn from(user: ReservationUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Meeting room information.
#[derive(Debug, Serialize)]
pub struct MeetingRoomResponse {
    /// Room ID.
    pub id: Uuid,
    /// Room name.
    pub name: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<MeetingRoom> for MeetingRoomResponse {
    fn from(room: MeetingRoom) -> Self {
        Self {
            id: room.id,
            name: room.name,
            created_at: room.created_at,
        }
    }
}

/// Time slot information.
#[derive(Debug, Serialize)]
pub struct TimeSlotResponse {
    /// Slot ID.
    pub id: Uuid,
    /// Slot start.
    pub start_date: DateTime<Utc>,
    /// Slot end.
    pub end_date: DateTime<Utc>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<TimeSlot> for TimeSlotResponse {
    fn from(slot: TimeSlot) -> Self {
        Self {
            id: slot.id,
            start_date: slot.start_date,
            end_date: slot.end_date,
            created_at: slot.created_at,
        }
    }
}

/// A room with its still-unreserved time slots.
#[derive(Debug, Serialize)]
pub struct MeetingRoomWithTimeSlotsResponse {
    /// Room ID.
    pub id: Uuid,
    /// Room name.
    pub name: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Unreserved slots, ordered by start.
    pub time_slots: Vec<TimeSlotResponse>,
}

impl From<RoomAvailability> for MeetingRoomWithTimeSlotsResponse {
    fn from(availability: RoomAvailability) -> Self {
        Self {
            id: availability.room.id,
            name: availability.room.name,
            created_at: availability.room.created_at,
            time_slots: availability
                .time_slots
                .into_iter()
                .map(TimeSlotResponse::from)
                .collect(),
        }
    }
}

/// A reservation as stored, with foreign keys.
#[derive(Debug, Serialize)]
pub struct ReservationResponse {
    /// Reservation ID.
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

impl From<Reservation> for ReservationResponse {
    fn from(reservation: Reservation) -> Self {
        Self {
            id: reservation.id,
            user_id: reservation.user_id,
            meeting_room_id: reservation.meeting_room_id,
            time_slot_id: reservation.time_slot_id,
            canceled: reservation.canceled,
            canceled_at: reservation.canceled_at,
            reserved_at: reservation.reserved_at,
        }
    }
}

/// A user's reservation with its room and slot.
#[derive(Debug, Serialize)]
pub struct UserReservationResponse {
    /// Reservation ID.
    pub id: Uuid,
    /// Whether the reservation has been canceled.
    pub canceled: bool,
    /// Cancellation timestamp, if canceled.
    pub canceled_at: Option<DateTime<Utc>>,
    /// Booking timestamp.
    pub reserved_at: DateTime<Utc>,
    /// Reserved room.
    pub meeting_room: MeetingRoomResponse,
    /// Reserved slot.
    pub time_slot: TimeSlotResponse,
}

impl From<UserReservation> for UserReservationResponse {
    fn from(reservation: UserReservation) -> Self {
        Self {
            id: reservation.id,
            canceled: reservation.canceled,
            canceled_at: reservation.canceled_at,
            reserved_at: reservation.reserved_at,
            meeting_room: reservation.meeting_room.into(),
            time_slot: reservation.time_slot.into(),
        }
    }
}

/// A reservation with its user, room and slot (admin view).
#[derive(Debug, Serialize)]
pub struct ReservationDetailResponse {
    /// Reservation ID.
    pub id: Uuid,
    /// Whether the reservation has been canceled.
    pub canceled: bool,
    /// Cancellation timestamp, if canceled.
    pub canceled_at: Option<DateTime<Utc>>,
    /// Booking timestamp.
    pub reserved_at: DateTime<Utc>,
    /// Booking user.
    pub user: UserResponse,
    /// Reserved room.
    pub meeting_room: MeetingRoomResponse,
    /// Reserved slot.
    pub time_slot: TimeSlotResponse,
}

impl From<ReservationDetail> for ReservationDetailResponse {
    fn from(detail: ReservationDetail) -> Self {
        Self {
            id: detail.id,
            canceled: detail.canceled,
            canceled_at: detail.canceled_at,
            reserved_at: detail.reserved_at,
            user: detail.user.into(),
            meeting_room: detail.meeting_room.into(),
            time_slot: detail.time_slot.into(),
        }
    }
}
