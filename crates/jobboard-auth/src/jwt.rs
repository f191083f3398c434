//! Session token issuing and verification

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use jobboard_db::{UserRole, UserType};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AuthError;

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    pub user_type: UserType,
    pub role: UserRole,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// A freshly signed token and the instant it stops being valid
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// JWT manager for token generation and validation.
///
/// Holds the signing secret; build one from configuration at startup and
/// share it behind an `Arc`.
#[derive(Clone)]
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiry_hours: i64,
}

impl JwtManager {
    /// Create a new JWT manager
    pub fn new(secret: &str, token_expiry_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_expiry_hours,
        }
    }

    /// Lifetime of issued tokens, in seconds
    pub fn token_lifetime_secs(&self) -> i64 {
        self.token_expiry_hours.saturating_mul(3600)
    }

    /// Issue a token for a verified identity
    pub fn issue(
        &self,
        user_id: i64,
        user_type: UserType,
        role: UserRole,
    ) -> Result<IssuedToken, AuthError> {
        self.issue_at(user_id, user_type, role, Utc::now())
    }

    /// Issue a token as if the current time were `now`
    pub fn issue_at(
        &self,
        user_id: i64,
        user_type: UserType,
        role: UserRole,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, AuthError> {
        let exp = TimeDelta::try_hours(self.token_expiry_hours)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or(AuthError::TokenLifetime(self.token_expiry_hours))?;

        let claims = Claims {
            sub: user_id.to_string(),
            user_type,
            role,
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        debug!("Issuing token for user {} ({})", user_id, user_type.as_str());

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        let expires_at = Utc.timestamp_opt(claims.exp, 0).single().unwrap_or(exp);

        Ok(IssuedToken { token, expires_at })
    }

    /// Validate a token and return its claims
    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        self.validate_token_at(token, Utc::now())
    }

    /// Validate a token against the supplied current time.
    ///
    /// A claim is valid iff the signature verifies and `now < exp`.
    pub fn validate_token_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked below against `now`, with no leeway
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            debug!("Rejected token: {}", e);
            AuthError::InvalidToken
        })?;

        if now.timestamp() >= token_data.claims.exp {
            debug!("Rejected token: expired at {}", token_data.claims.exp);
            return Err(AuthError::InvalidToken);
        }

        Ok(token_data.claims)
    }
}
