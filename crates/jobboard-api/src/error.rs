//! API error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    /// Missing or malformed request field
    #[error("{0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    Database(#[from] jobboard_db::DbError),

    #[error("{0}")]
    Auth(#[from] jobboard_auth::AuthError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Database(e) => match e {
                jobboard_db::DbError::NotFound(_) => StatusCode::NOT_FOUND,
                jobboard_db::DbError::Duplicate(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Auth(e) => e.status_code(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }

        let body = axum::Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobboard_auth::AuthError;
    use jobboard_db::DbError;

    #[test]
    fn test_error_taxonomy() {
        assert_eq!(
            ApiError::from(AuthError::Unauthenticated).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(AuthError::InvalidToken).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::from(AuthError::Forbidden).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::NotFound("Job not found".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Validation("title is required".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(DbError::Migration("boom".to_string())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_error_keeps_message() {
        let err = ApiError::from(DbError::Migration("disk full".to_string()));
        assert!(err.to_string().contains("disk full"));
    }
}
