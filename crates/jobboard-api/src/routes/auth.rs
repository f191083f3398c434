//! Authentication extractors and routes

use axum::{
    Json, Router,
    extract::{FromRef, FromRequestParts, State},
    http::{StatusCode, request::Parts},
    routing::post,
};
use jobboard_auth::{
    AuthError, AuthUser, IssuedToken, authenticate, authenticate_optional, hash_password,
    verify_password,
};
use jobboard_db::{DbError, NewUser, UserRole};
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::state::AppState;

use super::types::{AuthResponse, LoginRequest, RegisterRequest};
use super::validation::{ValidJson, validate_email, validate_password};

// ==================== Auth Extractors ====================

/// Extractor for authenticated user (required)
pub struct RequireAuth(pub AuthUser);

impl<S> FromRequestParts<S> for RequireAuth
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let user = authenticate(&parts.headers, &app_state.jwt).inspect_err(|e| {
            warn!("Rejected {} {}: {}", parts.method, parts.uri.path(), e);
        })?;
        Ok(RequireAuth(user))
    }
}

/// Extractor for admin user (required)
pub struct RequireAdmin(pub AuthUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let RequireAuth(user) = RequireAuth::from_request_parts(parts, state).await?;

        if !user.is_admin() {
            return Err(AuthError::Forbidden.into());
        }

        Ok(RequireAdmin(user))
    }
}

/// Extractor for an optional caller: no Authorization header yields `None`,
/// while a header that is present must carry a valid token.
pub struct MaybeAuth(pub Option<AuthUser>);

impl<S> FromRequestParts<S> for MaybeAuth
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let user = authenticate_optional(&parts.headers, &app_state.jwt)?;
        Ok(MaybeAuth(user))
    }
}

// ==================== Auth Routes ====================

/// Valid Argon2 hash that never matches; verified against when the email is
/// unknown so both failure paths cost the same.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$dGltaW5nX2F0dGFja19wcmV2ZW50aW9u$K8rI5T7VdQ8xkO0GqK5K2w";

fn auth_response(issued: IssuedToken, user_type: jobboard_db::UserType) -> AuthResponse {
    AuthResponse {
        token: issued.token,
        user_type,
        expires_at: issued.expires_at.to_rfc3339(),
    }
}

/// POST /auth/register
async fn register(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let email = validate_email(&request.email)?;
    validate_password(&request.password)?;
    let user_type = request.user_type.unwrap_or_default();

    debug!("Registering {} as {}", email, user_type.as_str());

    let password_hash = hash_password(&request.password)?;

    let user = state
        .db
        .insert_user(NewUser {
            email,
            password_hash,
            role: UserRole::User,
            user_type,
        })
        .await
        .map_err(|e| match e {
            DbError::Duplicate(_) => ApiError::Validation("Email already registered".to_string()),
            other => other.into(),
        })?;

    let issued = state.jwt.issue(user.id, user.user_type, user.role)?;

    metrics::counter!("jobboard_registrations_total", "user_type" => user.user_type.as_str())
        .increment(1);
    info!("Registered user {} ({})", user.id, user.user_type.as_str());

    Ok((StatusCode::CREATED, Json(auth_response(issued, user.user_type))))
}

/// POST /auth/login
async fn login(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let email = validate_email(&request.email)?;
    if request.password.is_empty() {
        return Err(ApiError::Validation("password is required".to_string()));
    }
    validate_password(&request.password).map_err(|_| AuthError::InvalidCredentials)?;

    debug!("Login attempt for {}", email);

    // Always run a password verification so unknown emails are not
    // distinguishable by timing
    let user = match state.db.get_user_by_email(&email).await? {
        Some(user) if verify_password(&request.password, &user.password_hash)? => Some(user),
        Some(_) => None,
        None => {
            let _ = verify_password(&request.password, DUMMY_HASH);
            None
        }
    };

    let Some(user) = user else {
        metrics::counter!("jobboard_logins_total", "outcome" => "failure").increment(1);
        warn!("Failed login for {}", email);
        return Err(AuthError::InvalidCredentials.into());
    };

    let issued = state.jwt.issue(user.id, user.user_type, user.role)?;

    metrics::counter!("jobboard_logins_total", "outcome" => "success").increment(1);
    info!("User {} logged in", user.id);

    Ok(Json(auth_response(issued, user.user_type)))
}

/// Create auth routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}
