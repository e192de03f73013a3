//! Request/response DTOs for the Web API.

mod request;
mod response;
mod validation;

pub use request::{CreateReservationRequest, LoginRequest, RegisterRequest};
pub use response::{
    MeetingRoomResponse, MeetingRoomWithTimeSlotsResponse, ReservationDetailResponse,
    ReservationResponse, TimeSlotResponse, UserReservationResponse, UserResponse,
};
pub use validation::ValidatedJson;
