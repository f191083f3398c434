//! Profile routes

use axum::{
    Json, Router,
    extract::State,
    routing::get,
};
use jobboard_db::{DbError, UpdateProfile};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::AppState;

use super::auth::{RequireAdmin, RequireAuth};
use super::types::{ProfileResponse, UpdateProfileRequest, UserSummary};
use super::validation::{ValidJson, optional, validate_email};

const MAX_NAME_LENGTH: usize = 100;
const MAX_PHONE_LENGTH: usize = 32;
const MAX_LOCATION_LENGTH: usize = 100;
const MAX_BIO_LENGTH: usize = 2000;

/// GET /users/me
async fn get_me(
    RequireAuth(caller): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let user = state
        .db
        .get_user_by_id(caller.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(user.into()))
}

/// PUT /users/me
async fn update_me(
    RequireAuth(caller): RequireAuth,
    State(state): State<AppState>,
    ValidJson(request): ValidJson<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    debug!("Updating profile of user {}", caller.id);

    let update = UpdateProfile {
        email: request.email.as_deref().map(validate_email).transpose()?,
        name: optional("name", request.name, MAX_NAME_LENGTH)?,
        phone: optional("phone", request.phone, MAX_PHONE_LENGTH)?,
        location: optional("location", request.location, MAX_LOCATION_LENGTH)?,
        bio: optional("bio", request.bio, MAX_BIO_LENGTH)?,
    };

    let user = state
        .db
        .update_user_profile(caller.id, update)
        .await
        .map_err(|e| match e {
            DbError::Duplicate(_) => ApiError::Validation("Email already registered".to_string()),
            other => other.into(),
        })?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    info!("Updated profile of user {}", user.id);
    Ok(Json(user.into()))
}

/// GET /users (Admin only)
async fn list_users(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<UserSummary>>, ApiError> {
    let users = state.db.list_users().await?;
    Ok(Json(users.into_iter().map(UserSummary::from).collect()))
}

/// Create user routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/me", get(get_me).put(update_me))
}
