//! Rate limiting middleware.

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use std::{
    collections::HashMap,
    net::SocketAddr,
    num::NonZeroU32,
    sync::{Arc, RwLock},
};

/// Per-IP rate limiter using Governor.
pub type IpRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// State for per-IP rate limiting.
#[derive(Clone)]
pub struct RateLimitState {
    /// Per-IP rate limiters.
    limiters: Arc<RwLock<HashMap<String, Arc<IpRateLimiter>>>>,
    /// Requests per minute per IP (0 disables limiting).
    requests_per_minute: u32,
}

impl RateLimitState {
    /// Create a new rate limit state.
    pub fn new(requests_per_minute: u32) -> Self {
        Self {
            limiters: Arc::new(RwLock::new(HashMap::new())),
            requests_per_minute,
        }
    }

    /// Whether limiting is enabled.
    pub fn enabled(&self) -> bool {
        self.requests_per_minute > 0
    }

    /// Get or create the limiter for the given IP.
    fn limiter_for(&self, ip: &str) -> Arc<IpRateLimiter> {
        {
            let read_guard = self.limiters.read().unwrap();
            if let Some(limiter) = read_guard.get(ip) {
                return limiter.clone();
            }
        }

        let mut write_guard = self.limiters.write().unwrap();
        write_guard
            .entry(ip.to_string())
            .or_insert_with(|| {
                let quota = Quota::per_minute(
                    NonZeroU32::new(self.requests_per_minute).expect("non-zero rate limit"),
                );
                Arc::new(RateLimiter::direct(quota))
            })
            .clone()
    }
}

/// Middleware function enforcing the per-IP limit.
pub async fn rate_limit(state: RateLimitState, request: Request<Body>, next: Next) -> Response {
    if !state.enabled() {
        return next.run(request).await;
    }

    // ConnectInfo is absent under some test harnesses; those requests share
    // one bucket.
    let ip = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let limiter = state.limiter_for(&ip);
    if limiter.check().is_err() {
        tracing::warn!(ip = %ip, "rate limit exceeded");
        return (StatusCode::TOO_MANY_REQUESTS, "Too many requests").into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_state() {
        let state = RateLimitState::new(0);
        assert!(!state.enabled());
    }

    #[test]
    fn test_limiter_allows_within_quota() {
        let state = RateLimitState::new(10);
        let limiter = state.limiter_for("127.0.0.1");

        for _ in 0..10 {
            assert!(limiter.check().is_ok());
        }
        assert!(limiter.check().is_err());
    }

    #[test]
    fn test_limiters_are_per_ip() {
        let state = RateLimitState::new(1);

        assert!(state.limiter_for("10.0.0.1").check().is_ok());
        assert!(state.limiter_for("10.0.0.1").check().is_err());
        // A different IP has its own bucket
        assert!(state.limiter_for("10.0.0.2").check().is_ok());
    }
}
