//! Meeting room repository.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::room::{MeetingRoom, NewMeetingRoom, NewTimeSlot, RoomAvailability, TimeSlot};
use crate::Result;

/// Repository for meeting rooms and their time slots.
///
/// Rooms and slots are reference data owned by an external provisioning
/// step; the write methods exist for that step and for tests.
pub struct MeetingRoomRepository<'a> {
    pool: &'a SqlitePool,
}

/// One row of the availability join, flattened.
#[derive(sqlx::FromRow)]
struct AvailabilityRow {
    room_id: Uuid,
    room_name: String,
    room_created_at: DateTime<Utc>,
    slot_id: Uuid,
    slot_room_id: Uuid,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    slot_created_at: DateTime<Utc>,
}

impl<'a> MeetingRoomRepository<'a> {
    /// Create a new MeetingRoomRepository with the given pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a meeting room.
    pub async fn insert(&self, new_room: &NewMeetingRoom) -> Result<MeetingRoom> {
        let room = sqlx::query_as::<_, MeetingRoom>(
            "INSERT INTO meeting_rooms (id, name, created_at)
             VALUES (?, ?, ?)
             RETURNING id, name, created_at",
        )
        .bind(new_room.id)
        .bind(&new_room.name)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await?;

        Ok(room)
    }

    /// Create a time slot for a room.
    pub async fn insert_slot(&self, new_slot: &NewTimeSlot) -> Result<TimeSlot> {
        let slot = sqlx::query_as::<_, TimeSlot>(
            "INSERT INTO time_slots (id, meeting_room_id, start_date, end_date, created_at)
             VALUES (?, ?, ?, ?, ?)
             RETURNING id, meeting_room_id, start_date, end_date, created_at",
        )
        .bind(new_slot.id)
        .bind(new_slot.meeting_room_id)
        .bind(new_slot.start_date)
        .bind(new_slot.end_date)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await?;

        Ok(slot)
    }

    /// List all meeting rooms.
    pub async fn list(&self) -> Result<Vec<MeetingRoom>> {
        let rooms = sqlx::query_as::<_, MeetingRoom>(
            "SELECT id, name, created_at FROM meeting_rooms ORDER BY name",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rooms)
    }

    /// List rooms with their still-unreserved time slots.
    ///
    /// A slot counts as available when no active reservation exists for its
    /// (room, slot) pair; rooms with no free slot are omitted.
    pub async fn list_available(&self) -> Result<Vec<RoomAvailability>> {
        let rows = sqlx::query_as::<_, AvailabilityRow>(
            "SELECT r.id AS room_id, r.name AS room_name, r.created_at AS room_created_at,
                    t.id AS slot_id, t.meeting_room_id AS slot_room_id,
                    t.start_date, t.end_date, t.created_at AS slot_created_at
             FROM meeting_rooms r
             JOIN time_slots t ON t.meeting_room_id = r.id
             WHERE NOT EXISTS (
                 SELECT 1 FROM reservations v
                 WHERE v.meeting_room_id = r.id
                   AND v.time_slot_id = t.id
                   AND v.canceled = 0
             )
             ORDER BY r.name, t.start_date",
        )
        .fetch_all(self.pool)
        .await?;

        // Rows arrive grouped by room; fold them into nested availability.
        let mut result: Vec<RoomAvailability> = Vec::new();
        for row in rows {
            let slot = TimeSlot {
                id: row.slot_id,
                meeting_room_id: row.slot_room_id,
                start_date: row.start_date,
                end_date: row.end_date,
                created_at: row.slot_created_at,
            };

            match result.last_mut() {
                Some(current) if current.room.id == row.room_id => {
                    current.time_slots.push(slot);
                }
                _ => result.push(RoomAvailability {
                    room: MeetingRoom {
                        id: row.room_id,
                        name: row.room_name,
                        created_at: row.room_created_at,
                    },
                    time_slots: vec![slot],
                }),
            }
        }

        Ok(result)
    }
}
