//! Meeting room and time slot models.
//!
//! Rooms and their slots are static reference data: created by an external
//! provisioning step and only read by the booking path.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A bookable meeting room.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MeetingRoom {
    /// Unique room ID.
    pub id: Uuid,
    /// Room name.
    pub name: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A bookable time slot belonging to one room.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TimeSlot {
    /// Unique slot ID.
    pub id: Uuid,
    /// Owning room.
    pub meeting_room_id: Uuid,
    /// Slot start, strictly before `end_date`.
    pub start_date: DateTime<Utc>,
    /// Slot end.
    pub end_date: DateTime<Utc>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A room together with its still-unreserved time slots.
#[derive(Debug, Clone)]
pub struct RoomAvailability {
    /// The room.
    pub room: MeetingRoom,
    /// Slots with no active reservation, ordered by start.
    pub time_slots: Vec<TimeSlot>,
}

/// Data for creating a new meeting room.
#[derive(Debug, Clone)]
pub struct NewMeetingRoom {
    /// Unique room ID.
    pub id: Uuid,
    /// Room name.
    pub name: String,
}

impl NewMeetingRoom {
    /// Create a room definition with a fresh ID.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

/// Data for creating a new time slot.
#[derive(Debug, Clone)]
pub struct NewTimeSlot {
    /// Unique slot ID.
    pub id: Uuid,
    /// Owning room.
    pub meeting_room_id: Uuid,
    /// Slot start.
    pub start_date: DateTime<Utc>,
    /// Slot end.
    pub end_date: DateTime<Utc>,
}

impl NewTimeSlot {
    /// Create a slot definition with a fresh ID.
    pub fn new(meeting_room_id: Uuid, start_date: DateTime<Utc>, end_date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            meeting_room_id,
            start_date,
            end_date,
        }
    }
}
