//! roombook - Meeting room reservation backend.
//!
//! Users authenticate, browse rooms and time slots, and create or cancel
//! reservations; administrators view and cancel any reservation. Double
//! bookings are prevented by a storage-level uniqueness constraint over
//! active reservations rather than any in-process lock.

pub mod auth;
pub mod booking;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod retry;
pub mod web;

pub use auth::{
    hash_password, validate_password, verify_password, AccessClaims, AuthService, PasswordError,
    TokenService,
};
pub use booking::ReservationService;
pub use config::Config;
pub use db::{
    Database, MeetingRoom, MeetingRoomRepository, NewMeetingRoom, NewReservation, NewTimeSlot,
    NewUser, Reservation, ReservationRepository, Role, TimeSlot, User, UserRepository,
};
pub use error::{Result, RoombookError};
pub use retry::RetryPolicy;
