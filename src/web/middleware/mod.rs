//! Middleware for the Web API.

pub mod auth;
pub mod cors;
pub mod rate_limit;

pub use auth::{token_auth, AuthSession, ACCESS_TOKEN_COOKIE};
pub use cors::create_cors_layer;
pub use rate_limit::{rate_limit, RateLimitState};
