//! Job posting routes
//!
//! Reads are public. Creating a job needs a valid token; updating or
//! deleting one additionally needs the caller to own it or be an admin.

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    routing::get,
};
use jobboard_db::{Job, JobQuery, NewJob, UpdateJob};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::AppState;

use super::auth::RequireAuth;
use super::types::{CreateJobRequest, JobResponse, JobsQuery, UpdateJobRequest};
use super::validation::{ValidJson, ValidPath, optional, parse_body, required};

const MAX_TITLE_LENGTH: usize = 200;
const MAX_DESCRIPTION_LENGTH: usize = 10_000;
const MAX_LOCATION_LENGTH: usize = 100;
const MAX_COMPANY_LENGTH: usize = 100;
const MAX_SEARCH_LENGTH: usize = 100;

pub(crate) async fn find_job(state: &AppState, id: i64) -> Result<Job, ApiError> {
    state
        .db
        .get_job(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Job not found: {}", id)))
}

/// GET /jobs
async fn list_jobs(
    State(state): State<AppState>,
    query: Result<Query<JobsQuery>, QueryRejection>,
) -> Result<Json<Vec<JobResponse>>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::Validation(e.body_text()))?;
    let search = optional("q", query.q, MAX_SEARCH_LENGTH)?;

    let jobs = state
        .db
        .list_jobs(JobQuery {
            search,
            owner_user_id: query.user_id,
        })
        .await?;

    Ok(Json(jobs.into_iter().map(JobResponse::from).collect()))
}

/// GET /jobs/{id}
async fn get_job(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i64>,
) -> Result<Json<JobResponse>, ApiError> {
    let job = find_job(&state, id).await?;
    Ok(Json(job.into()))
}

/// POST /jobs
async fn create_job(
    RequireAuth(caller): RequireAuth,
    State(state): State<AppState>,
    ValidJson(request): ValidJson<CreateJobRequest>,
) -> Result<(StatusCode, Json<JobResponse>), ApiError> {
    let new_job = NewJob {
        title: required("title", &request.title, MAX_TITLE_LENGTH)?,
        description: required("description", &request.description, MAX_DESCRIPTION_LENGTH)?,
        location: optional("location", request.location, MAX_LOCATION_LENGTH)?,
        company: optional("company", request.company, MAX_COMPANY_LENGTH)?,
        owner_user_id: caller.id,
    };

    let job = state.db.insert_job(new_job).await?;

    metrics::counter!("jobboard_jobs_created_total").increment(1);
    info!("User {} created job {}", caller.id, job.id);

    Ok((StatusCode::CREATED, Json(job.into())))
}

/// PUT /jobs/{id}
///
/// The body is only parsed once the caller is known to be allowed to touch
/// the job, so a non-owner is refused whatever they send.
async fn update_job(
    RequireAuth(caller): RequireAuth,
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i64>,
    body: Bytes,
) -> Result<Json<JobResponse>, ApiError> {
    let job = find_job(&state, id).await?;
    caller.ensure_can_modify(job.owner_user_id)?;

    let request: UpdateJobRequest = parse_body(&body)?;
    let update = UpdateJob {
        title: request
            .title
            .map(|t| required("title", &t, MAX_TITLE_LENGTH))
            .transpose()?,
        description: request
            .description
            .map(|d| required("description", &d, MAX_DESCRIPTION_LENGTH))
            .transpose()?,
        location: optional("location", request.location, MAX_LOCATION_LENGTH)?,
        company: optional("company", request.company, MAX_COMPANY_LENGTH)?,
    };

    if update.is_empty() {
        debug!("Empty update for job {}", id);
        return Ok(Json(job.into()));
    }

    let job = state
        .db
        .update_job(id, update)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Job not found: {}", id)))?;

    info!("User {} updated job {}", caller.id, id);
    Ok(Json(job.into()))
}

/// DELETE /jobs/{id}
async fn delete_job(
    RequireAuth(caller): RequireAuth,
    State(state): State<AppState>,
    ValidPath(id): ValidPath<i64>,
) -> Result<StatusCode, ApiError> {
    let job = find_job(&state, id).await?;
    caller.ensure_can_modify(job.owner_user_id)?;

    if !state.db.delete_job(id).await? {
        return Err(ApiError::NotFound(format!("Job not found: {}", id)));
    }

    metrics::counter!("jobboard_jobs_deleted_total").increment(1);
    info!("User {} deleted job {}", caller.id, id);

    Ok(StatusCode::NO_CONTENT)
}

/// Create job routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/jobs", get(list_jobs).post(create_job))
        .route("/jobs/{id}", get(get_job).put(update_job).delete(delete_job))
}
