//! Request/Response DTOs
//!
//! All bodies use camelCase keys, which is what the single-page UI sends.

use jobboard_db::{Application, Job, User, UserRole, UserType};
use serde::{Deserialize, Serialize};

// ==================== Auth Types ====================

/// Signup request
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    /// Defaults to `jobseeker`, the signup form's initial choice
    #[serde(default)]
    pub user_type: Option<UserType>,
}

/// Login request
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Token returned by signup and login
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub user_type: UserType,
    pub expires_at: String,
}

// ==================== User Types ====================

/// Profile of the calling user
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub user_type: UserType,
    pub role: UserRole,
    pub created_at: String,
}

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            phone: user.phone,
            location: user.location,
            bio: user.bio,
            user_type: user.user_type,
            role: user.role,
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

/// Profile update; absent fields are left as they are
#[derive(Deserialize, Default)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

/// Entry of the admin user listing
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: i64,
    pub email: String,
    pub role: UserRole,
    pub user_type: UserType,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            role: user.role,
            user_type: user.user_type,
        }
    }
}

// ==================== Job Types ====================

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub company: Option<String>,
    /// Owner of the posting
    pub user_id: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Job> for JobResponse {
    fn from(job: Job) -> Self {
        Self {
            id: job.id,
            title: job.title,
            description: job.description,
            location: job.location,
            company: job.company,
            user_id: job.owner_user_id,
            created_at: job.created_at.to_rfc3339(),
            updated_at: job.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Deserialize)]
pub struct CreateJobRequest {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct UpdateJobRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
}

/// Job listing query parameters
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct JobsQuery {
    /// Free-text search over title, location, company and description
    #[serde(default)]
    pub q: Option<String>,
    /// Only jobs posted by this user
    #[serde(default)]
    pub user_id: Option<i64>,
}

// ==================== Application Types ====================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    pub applicant_name: String,
    pub applicant_email: String,
    #[serde(default)]
    pub resume_link: Option<String>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse {
    pub id: i64,
    pub job_id: i64,
    pub applicant_name: String,
    pub applicant_email: String,
    pub resume_link: Option<String>,
    pub user_id: Option<i64>,
    pub created_at: String,
}

impl From<Application> for ApplicationResponse {
    fn from(application: Application) -> Self {
        Self {
            id: application.id,
            job_id: application.job_id,
            applicant_name: application.applicant_name,
            applicant_email: application.applicant_email,
            resume_link: application.resume_link,
            user_id: application.user_id,
            created_at: application.created_at.to_rfc3339(),
        }
    }
}
