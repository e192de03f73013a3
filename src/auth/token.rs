//! Stateless access token issuance and validation.
//!
//! Tokens are HS256-signed JWTs carrying the user id and role. There is no
//! server-side revocation list: logout only clears the client-held cookie,
//! and a token stays valid until its natural expiry.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::Role;
use crate::{Result, RoombookError};

/// Claims carried by an access token.
///
/// Every field is mandatory; a token missing any of them fails validation
/// rather than being defaulted. `role` is a closed enumeration, so a token
/// carrying an unknown role string is rejected during decoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (user ID).
    pub sub: String,
    /// User role.
    pub role: Role,
    /// Issued at (unix timestamp).
    pub iat: i64,
    /// Expiration (unix timestamp).
    pub exp: i64,
    /// Issuer, pinned to the deployment's own origin.
    pub iss: String,
}

/// Issues and validates access tokens with a shared symmetric secret.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    ttl: Duration,
}

impl TokenService {
    /// Create a token service from the signing secret, pinned issuer and
    /// token lifetime in days.
    pub fn new(secret: &str, issuer: &str, ttl_days: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[issuer]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            issuer: issuer.to_string(),
            ttl: Duration::days(ttl_days),
        }
    }

    /// Token lifetime in seconds, for the cookie max-age.
    pub fn ttl_secs(&self) -> i64 {
        self.ttl.num_seconds()
    }

    /// Issue a signed token for the given user.
    pub fn issue(&self, user_id: Uuid, role: Role) -> Result<String> {
        let now = Utc::now();
        let claims = AccessClaims {
            sub: user_id.to_string(),
            role,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
            iss: self.issuer.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "failed to sign access token");
            RoombookError::Auth("failed to create access token".to_string())
        })
    }

    /// Validate a token and return its claims.
    ///
    /// Rejects tokens with a bad signature, an unexpected algorithm, a
    /// mismatched issuer, a missing or past expiry, or any missing claim
    /// (including `iat`, which decoding requires to be present).
    pub fn validate(&self, token: &str) -> Result<AccessClaims> {
        decode::<AccessClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| RoombookError::Auth(format!("invalid access token: {e}")))
    }
}
