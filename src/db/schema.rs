//! Database schema and migrations for roombook.
//!
//! This module contains all database migrations that will be applied
//! sequentially when the database is first opened or upgraded.

/// Database migrations.
///
/// Each migration is a SQL script that will be executed in order.
/// The schema_version table tracks which migrations have been applied.
///
/// Timestamps carry no SQL defaults: every row is stamped from the
/// application so the stored encoding stays uniform.
pub const MIGRATIONS: &[&str] = &[
    // v1: users
    r#"
-- Users table for authentication and account management
CREATE TABLE users (
    id          BLOB PRIMARY KEY,
    email       TEXT NOT NULL UNIQUE,
    name        TEXT NOT NULL,
    password    TEXT NOT NULL,           -- Argon2 hash
    role        TEXT NOT NULL DEFAULT 'user',  -- 'user', 'admin'
    created_at  TEXT NOT NULL
);

CREATE INDEX idx_users_role ON users(role);
"#,
    // v2: meeting rooms and their time slots (static reference data)
    r#"
CREATE TABLE meeting_rooms (
    id          BLOB PRIMARY KEY,
    name        TEXT NOT NULL,
    created_at  TEXT NOT NULL
);

CREATE TABLE time_slots (
    id               BLOB PRIMARY KEY,
    meeting_room_id  BLOB NOT NULL REFERENCES meeting_rooms(id) ON DELETE CASCADE,
    start_date       TEXT NOT NULL,
    end_date         TEXT NOT NULL,
    created_at       TEXT NOT NULL,
    CHECK (start_date < end_date)
);

CREATE INDEX idx_time_slots_meeting_room_id ON time_slots(meeting_room_id);
"#,
    // v3: reservations
    r#"
CREATE TABLE reservations (
    id               BLOB PRIMARY KEY,
    user_id          BLOB NOT NULL REFERENCES users(id),
    meeting_room_id  BLOB NOT NULL REFERENCES meeting_rooms(id),
    time_slot_id     BLOB NOT NULL REFERENCES time_slots(id),
    canceled         INTEGER NOT NULL DEFAULT 0,
    canceled_at      TEXT,
    reserved_at      TEXT NOT NULL
);

-- The booking invariant: at most one active reservation per room/slot pair.
-- Canceled rows fall outside the index, so a canceled slot can be re-booked.
CREATE UNIQUE INDEX idx_reservations_active_slot
    ON reservations(meeting_room_id, time_slot_id)
    WHERE canceled = 0;

CREATE INDEX idx_reservations_user_id ON reservations(user_id);
"#,
];
