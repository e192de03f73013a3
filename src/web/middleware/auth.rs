//! Access token authentication middleware.
//!
//! The session token travels in the `access_token` cookie. The extractor
//! either produces a fully populated, strongly typed session or rejects the
//! request before it reaches business logic; there is no partial success.

use axum::{
    async_trait,
    body::Body,
    extract::FromRequestParts,
    http::{request::Parts, Request},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::TokenService;
use crate::db::Role;
use crate::web::error::ApiError;

/// Name of the session cookie.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// The authenticated caller: identity and role resolved from the token.
///
/// Handlers take this extractor to require authentication; admin-only
/// handlers additionally call [`AuthSession::require_admin`].
#[derive(Debug, Clone, Copy)]
pub struct AuthSession {
    /// Authenticated user ID.
    pub user_id: Uuid,
    /// Role carried by the token.
    pub role: Role,
}

impl AuthSession {
    /// Per-endpoint admin gate.
    pub fn require_admin(&self) -> Result<(), ApiError> {
        if self.role != Role::Admin {
            return Err(ApiError::forbidden("Insufficient permissions"));
        }
        Ok(())
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthSession
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let cookie = jar
            .get(ACCESS_TOKEN_COOKIE)
            .ok_or_else(|| ApiError::unauthorized("Missing credential"))?;

        // Token service is injected into extensions by the middleware below
        let tokens = parts
            .extensions
            .get::<Arc<TokenService>>()
            .ok_or_else(|| ApiError::internal("Token service not configured"))?;

        let claims = tokens.validate(cookie.value()).map_err(|e| {
            tracing::debug!(error = %e, "access token validation failed");
            ApiError::unauthorized("Invalid credential")
        })?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| ApiError::unauthorized("Invalid credential"))?;

        Ok(AuthSession {
            user_id,
            role: claims.role,
        })
    }
}

/// Middleware function to inject the token service into request extensions.
pub async fn token_auth(
    tokens: Arc<TokenService>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    request.extensions_mut().insert(tokens);
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::COOKIE;

    fn service() -> Arc<TokenService> {
        Arc::new(TokenService::new("test-secret", "http://localhost:8080", 30))
    }

    fn parts_with(cookie: Option<String>, tokens: Option<Arc<TokenService>>) -> Parts {
        let mut builder = Request::builder().uri("/users/me");
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, format!("{ACCESS_TOKEN_COOKIE}={cookie}"));
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        if let Some(tokens) = tokens {
            parts.extensions.insert(tokens);
        }
        parts
    }

    #[tokio::test]
    async fn test_valid_token_yields_session() {
        let tokens = service();
        let user_id = Uuid::new_v4();
        let token = tokens.issue(user_id, Role::Admin).unwrap();

        let mut parts = parts_with(Some(token), Some(tokens));
        let session = AuthSession::from_request_parts(&mut parts, &())
            .await
            .unwrap();

        assert_eq!(session.user_id, user_id);
        assert_eq!(session.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_missing_cookie_rejected() {
        let mut parts = parts_with(None, Some(service()));
        let result = AuthSession::from_request_parts(&mut parts, &()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_garbage_token_rejected() {
        let mut parts = parts_with(Some("garbage".to_string()), Some(service()));
        let result = AuthSession::from_request_parts(&mut parts, &()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_token_from_other_secret_rejected() {
        let other = TokenService::new("other-secret", "http://localhost:8080", 30);
        let token = other.issue(Uuid::new_v4(), Role::User).unwrap();

        let mut parts = parts_with(Some(token), Some(service()));
        let result = AuthSession::from_request_parts(&mut parts, &()).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_require_admin() {
        let admin = AuthSession {
            user_id: Uuid::new_v4(),
            role: Role::Admin,
        };
        assert!(admin.require_admin().is_ok());

        let user = AuthSession {
            user_id: Uuid::new_v4(),
            role: Role::User,
        };
        assert!(user.require_admin().is_err());
    }
}
