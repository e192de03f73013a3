//! API handlers for the Web API.

pub mod auth;
pub mod reservation;
pub mod room;
pub mod user;

pub use auth::*;
pub use reservation::*;
pub use room::*;
pub use user::*;

use std::sync::Arc;

use axum_extra::extract::cookie::{Cookie, SameSite};

use crate::auth::TokenService;
use crate::config::AuthConfig;
use crate::db::Database;
use crate::retry::RetryPolicy;
use crate::web::middleware::ACCESS_TOKEN_COOKIE;

/// Application state shared across handlers.
pub struct AppState {
    /// Database handle.
    pub db: Arc<Database>,
    /// Access token service.
    pub tokens: Arc<TokenService>,
    /// Retry policy for storage calls.
    pub retry: RetryPolicy,
    /// Origin URL, used for the registration Location header.
    pub origin_url: String,
    /// Domain attribute for the session cookie (empty = host-only).
    pub cookie_domain: String,
}

impl AppState {
    /// Create a new application state.
    pub fn new(db: Arc<Database>, auth: &AuthConfig) -> Self {
        Self {
            db,
            tokens: Arc::new(TokenService::new(
                &auth.secret_key,
                &auth.origin_url,
                auth.token_ttl_days,
            )),
            retry: RetryPolicy::default(),
            origin_url: auth.origin_url.clone(),
            cookie_domain: auth.cookie_domain.clone(),
        }
    }

    /// Build the session cookie carrying a freshly issued token.
    ///
    /// HTTP-only and Secure with SameSite=None so the browser sends it on
    /// cross-site requests from the frontend origin; the token's own expiry
    /// bounds the session lifetime.
    pub fn access_cookie(&self, token: String) -> Cookie<'static> {
        let mut builder = Cookie::build((ACCESS_TOKEN_COOKIE, token))
            .path("/")
            .http_only(true)
            .secure(true)
            .same_site(SameSite::None);
        if !self.cookie_domain.is_empty() {
            builder = builder.domain(self.cookie_domain.clone());
        }
        builder.build()
    }

    /// Build the cookie used to clear the session on logout.
    ///
    /// Must carry the same path/domain as the session cookie so the removal
    /// (max-age 0) actually matches it in the browser.
    pub fn removal_cookie(&self) -> Cookie<'static> {
        let mut cookie = Cookie::from(ACCESS_TOKEN_COOKIE);
        cookie.set_path("/");
        if !self.cookie_domain.is_empty() {
            cookie.set_domain(self.cookie_domain.clone());
        }
        cookie
    }
}
