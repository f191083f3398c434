//! Request authentication and ownership checks

use axum::http::{HeaderMap, header::AUTHORIZATION};
use jobboard_db::{UserRole, UserType};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AuthError;
use crate::jwt::{Claims, JwtManager};

/// Authenticated caller, decoded from a verified claim.
///
/// Lives only as long as the request that carried the token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i64,
    pub user_type: UserType,
    pub role: UserRole,
}

impl AuthUser {
    /// Create from JWT claims
    pub fn from_claims(claims: &Claims) -> Result<Self, AuthError> {
        let id = claims.sub.parse().map_err(|_| AuthError::InvalidToken)?;
        Ok(Self {
            id,
            user_type: claims.user_type,
            role: claims.role,
        })
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Whether this caller may change or delete a resource owned by
    /// `owner_user_id`
    pub fn can_modify(&self, owner_user_id: i64) -> bool {
        self.id == owner_user_id || self.is_admin()
    }

    /// Fail with `Forbidden` unless [`AuthUser::can_modify`] holds
    pub fn ensure_can_modify(&self, owner_user_id: i64) -> Result<(), AuthError> {
        if self.can_modify(owner_user_id) {
            Ok(())
        } else {
            debug!(
                "User {} denied access to resource owned by {}",
                self.id, owner_user_id
            );
            Err(AuthError::Forbidden)
        }
    }
}

/// Extract the bearer token from the Authorization header.
///
/// A missing header, a non-`Bearer` scheme and an empty token all count as
/// no credential at all.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AuthError::Unauthenticated)?;

    let (scheme, token) = header
        .trim()
        .split_once(' ')
        .ok_or(AuthError::Unauthenticated)?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::Unauthenticated);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::Unauthenticated);
    }
    Ok(token)
}

/// Require a valid token and return the caller's identity
pub fn authenticate(headers: &HeaderMap, jwt: &JwtManager) -> Result<AuthUser, AuthError> {
    let token = bearer_token(headers)?;
    let claims = jwt.validate_token(token)?;
    let user = AuthUser::from_claims(&claims)?;

    debug!(
        "Authenticated user: {} ({}, {})",
        user.id,
        user.user_type.as_str(),
        user.role.as_str()
    );
    Ok(user)
}

/// Like [`authenticate`], but a request without an Authorization header
/// yields `None`. A header that is present must still be valid.
pub fn authenticate_optional(
    headers: &HeaderMap,
    jwt: &JwtManager,
) -> Result<Option<AuthUser>, AuthError> {
    if !headers.contains_key(AUTHORIZATION) {
        return Ok(None);
    }
    authenticate(headers, jwt).map(Some)
}
