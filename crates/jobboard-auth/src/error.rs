//! Authentication error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No bearer token on a request that needs one
    #[error("Access denied")]
    Unauthenticated,

    /// Malformed, badly signed or expired token
    #[error("Invalid token")]
    InvalidToken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Identity is valid but neither owns the resource nor is an admin
    #[error("Forbidden")]
    Forbidden,

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Token lifetime out of range: {0} hours")]
    TokenLifetime(i64),

    #[error("Token signing error: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Unauthenticated | AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::InvalidToken | AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::PasswordHash(_) | AuthError::TokenLifetime(_) | AuthError::Signing(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = axum::Json(json!({
            "error": self.to_string()
        }));

        (self.status_code(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AuthError::Unauthenticated.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::InvalidToken.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AuthError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            AuthError::PasswordHash("boom".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AuthError::TokenLifetime(i64::MAX).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
