//! Request DTOs for the Web API.

use serde::Deserialize;
use validator::Validate;

/// User registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name.
    #[validate(length(min = 1, max = 64, message = "Name must be 1-64 characters"))]
    pub name: String,
    /// Email address.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Password. Bounds match the hashing layer's length policy.
    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
}

/// Login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Reservation creation request.
///
/// Identifiers arrive as strings and are parsed into UUIDs before any
/// storage call; a malformed id is a bad request, not a storage error.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateReservationRequest {
    /// Room to reserve.
    #[validate(length(min = 1, message = "meeting_room_id is required"))]
    pub meeting_room_id: String,
    /// Slot to reserve.
    #[validate(length(min = 1, message = "time_slot_id is required"))]
    pub time_slot_id: String,
}
