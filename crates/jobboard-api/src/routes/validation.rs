//! Request body parsing and field validation
//!
//! Bodies are parsed into typed request structs whose required fields are
//! spelled out; anything that fails to parse, or breaks one of the rules
//! below, becomes a `400` validation error.

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Maximum allowed email length
const MAX_EMAIL_LENGTH: usize = 254;
/// Minimum allowed password length
const MIN_PASSWORD_LENGTH: usize = 6;
/// Maximum allowed password length (prevent DoS with very large passwords)
const MAX_PASSWORD_LENGTH: usize = 256;
/// Maximum allowed URL length for resume links
const MAX_URL_LENGTH: usize = 2048;

/// JSON body extractor that reports every failure as a validation error
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::Validation(e.body_text()))?;
        parse_body(&body).map(ValidJson)
    }
}

/// Path parameter extractor that reports a malformed segment as a
/// validation error
pub struct ValidPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::Validation(e.body_text()))?;
        Ok(ValidPath(value))
    }
}

/// Parse a raw JSON body into `T`
pub fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::Validation("Request body is required".to_string()));
    }
    serde_json::from_slice(body)
        .map_err(|e| ApiError::Validation(format!("Invalid request body: {}", e)))
}

/// Trim a required field, rejecting blank values and values over `max_len`
pub fn required(field: &str, value: &str, max_len: usize) -> Result<String, ApiError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ApiError::Validation(format!("{} is required", field)));
    }
    check_length(field, value, max_len)?;
    Ok(value.to_string())
}

/// Trim an optional field; blank counts as absent
pub fn optional(field: &str, value: Option<String>, max_len: usize) -> Result<Option<String>, ApiError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => {
            check_length(field, v, max_len)?;
            Ok(Some(v.to_string()))
        }
        _ => Ok(None),
    }
}

fn check_length(field: &str, value: &str, max_len: usize) -> Result<(), ApiError> {
    if value.chars().count() > max_len {
        return Err(ApiError::Validation(format!(
            "{} exceeds maximum length of {} characters",
            field, max_len
        )));
    }
    Ok(())
}

/// Validate email format and length, returning the trimmed address
pub fn validate_email(email: &str) -> Result<String, ApiError> {
    let email = required("email", email, MAX_EMAIL_LENGTH)?;

    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(ApiError::Validation(format!("Invalid email address: {}", email)));
    }
    Ok(email)
}

/// Validate password length
pub fn validate_password(password: &str) -> Result<(), ApiError> {
    let len = password.chars().count();
    if len < MIN_PASSWORD_LENGTH {
        return Err(ApiError::Validation(format!(
            "Password must be at least {} characters long",
            MIN_PASSWORD_LENGTH
        )));
    }
    if len > MAX_PASSWORD_LENGTH {
        return Err(ApiError::Validation(format!(
            "Password exceeds maximum length of {} characters",
            MAX_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

/// Validate an optional http(s) link
pub fn validate_link(field: &str, link: Option<String>) -> Result<Option<String>, ApiError> {
    let link = optional(field, link, MAX_URL_LENGTH)?;
    if let Some(url) = &link
        && !(url.starts_with("http://") || url.starts_with("https://"))
    {
        return Err(ApiError::Validation(format!(
            "{} must be an http or https URL",
            field
        )));
    }
    Ok(link)
}
