//! Job application routes

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use jobboard_db::NewApplication;
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

use super::auth::{MaybeAuth, RequireAuth};
use super::jobs::find_job;
use super::types::{ApplicationResponse, ApplyRequest};
use super::validation::{ValidJson, ValidPath, required, validate_email, validate_link};

const MAX_NAME_LENGTH: usize = 100;

/// POST /jobs/{id}/apply
///
/// Open to anonymous visitors; a signed-in applicant is linked to the
/// application.
async fn apply(
    MaybeAuth(caller): MaybeAuth,
    State(state): State<AppState>,
    ValidPath(job_id): ValidPath<i64>,
    ValidJson(request): ValidJson<ApplyRequest>,
) -> Result<(StatusCode, Json<ApplicationResponse>), ApiError> {
    let application = NewApplication {
        job_id,
        applicant_name: required("applicantName", &request.applicant_name, MAX_NAME_LENGTH)?,
        applicant_email: validate_email(&request.applicant_email)?,
        resume_link: validate_link("resumeLink", request.resume_link)?,
        user_id: caller.map(|c| c.id),
    };

    let application = state.db.insert_application(application).await?;

    metrics::counter!("jobboard_applications_total").increment(1);
    info!("Application {} received for job {}", application.id, job_id);

    Ok((StatusCode::CREATED, Json(application.into())))
}

/// GET /jobs/{id}/applications (owner or admin)
async fn list_applications(
    RequireAuth(caller): RequireAuth,
    State(state): State<AppState>,
    ValidPath(job_id): ValidPath<i64>,
) -> Result<Json<Vec<ApplicationResponse>>, ApiError> {
    let job = find_job(&state, job_id).await?;
    caller.ensure_can_modify(job.owner_user_id)?;

    let applications = state.db.list_applications_for_job(job_id).await?;
    Ok(Json(
        applications
            .into_iter()
            .map(ApplicationResponse::from)
            .collect(),
    ))
}

/// Create application routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/jobs/{id}/apply", post(apply))
        .route("/jobs/{id}/applications", get(list_applications))
}
