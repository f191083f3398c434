//! Database models

use crate::utils::parse_datetime_or_now;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Row;
use std::fmt;
use std::str::FromStr;

/// Error type for parsing models from strings
#[derive(Debug, Clone)]
pub enum ParseError {
    InvalidUserRole(String),
    InvalidUserType(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::InvalidUserRole(s) => write!(f, "Invalid user role: {}", s),
            ParseError::InvalidUserType(s) => write!(f, "Invalid user type: {}", s),
        }
    }
}

impl std::error::Error for ParseError {}

/// User role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    User,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::User => "user",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

impl FromStr for UserRole {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(UserRole::Admin),
            "user" => Ok(UserRole::User),
            _ => Err(ParseError::InvalidUserRole(s.to_string())),
        }
    }
}

/// Which side of the board a user is on
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    #[default]
    Jobseeker,
    Recruiter,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Jobseeker => "jobseeker",
            UserType::Recruiter => "recruiter",
        }
    }
}

impl FromStr for UserType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "jobseeker" => Ok(UserType::Jobseeker),
            "recruiter" => Ok(UserType::Recruiter),
            _ => Err(ParseError::InvalidUserType(s.to_string())),
        }
    }
}

/// User model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    /// Always stored lower-cased
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    pub user_type: UserType,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New user (for insertion)
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub user_type: UserType,
}

/// Profile update; `None` leaves the column untouched
#[derive(Debug, Clone, Default)]
pub struct UpdateProfile {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
}

/// Job posting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub company: Option<String>,
    /// The recruiter who posted the job
    pub owner_user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New job (for insertion)
#[derive(Debug, Clone)]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub company: Option<String>,
    pub owner_user_id: i64,
}

/// Partial job update
#[derive(Debug, Clone, Default)]
pub struct UpdateJob {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
}

impl UpdateJob {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.location.is_none()
            && self.company.is_none()
    }
}

/// Application submitted by a job seeker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub id: i64,
    pub job_id: i64,
    pub applicant_name: String,
    pub applicant_email: String,
    pub resume_link: Option<String>,
    /// Set when the applicant was signed in
    pub user_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// New application (for insertion)
#[derive(Debug, Clone)]
pub struct NewApplication {
    pub job_id: i64,
    pub applicant_name: String,
    pub applicant_email: String,
    pub resume_link: Option<String>,
    pub user_id: Option<i64>,
}

// ==================== TryFrom Implementations ====================

impl TryFrom<&sqlx::sqlite::SqliteRow> for User {
    type Error = sqlx::Error;

    fn try_from(row: &sqlx::sqlite::SqliteRow) -> Result<Self, Self::Error> {
        let role_str: String = row.try_get("role")?;
        let user_type_str: String = row.try_get("user_type")?;
        Ok(User {
            id: row.try_get("id")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            role: UserRole::from_str(&role_str).unwrap_or(UserRole::User),
            user_type: UserType::from_str(&user_type_str).unwrap_or_default(),
            name: row.try_get("name")?,
            phone: row.try_get("phone")?,
            location: row.try_get("location")?,
            bio: row.try_get("bio")?,
            created_at: parse_datetime_or_now(&row.try_get::<String, _>("created_at")?),
            updated_at: parse_datetime_or_now(&row.try_get::<String, _>("updated_at")?),
        })
    }
}

impl TryFrom<&sqlx::sqlite::SqliteRow> for Job {
    type Error = sqlx::Error;

    fn try_from(row: &sqlx::sqlite::SqliteRow) -> Result<Self, Self::Error> {
        Ok(Job {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            location: row.try_get("location")?,
            company: row.try_get("company")?,
            owner_user_id: row.try_get("owner_user_id")?,
            created_at: parse_datetime_or_now(&row.try_get::<String, _>("created_at")?),
            updated_at: parse_datetime_or_now(&row.try_get::<String, _>("updated_at")?),
        })
    }
}

impl TryFrom<&sqlx::sqlite::SqliteRow> for Application {
    type Error = sqlx::Error;

    fn try_from(row: &sqlx::sqlite::SqliteRow) -> Result<Self, Self::Error> {
        Ok(Application {
            id: row.try_get("id")?,
            job_id: row.try_get("job_id")?,
            applicant_name: row.try_get("applicant_name")?,
            applicant_email: row.try_get("applicant_email")?,
            resume_link: row.try_get("resume_link")?,
            user_id: row.try_get("user_id")?,
            created_at: parse_datetime_or_now(&row.try_get::<String, _>("created_at")?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_parse() {
        assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!("user".parse::<UserRole>().unwrap(), UserRole::User);
        assert!("root".parse::<UserRole>().is_err());
        assert!(UserRole::Admin.is_admin());
        assert!(!UserRole::User.is_admin());
    }

    #[test]
    fn test_user_type_parse() {
        assert_eq!(
            "recruiter".parse::<UserType>().unwrap(),
            UserType::Recruiter
        );
        assert_eq!(
            "jobseeker".parse::<UserType>().unwrap(),
            UserType::Jobseeker
        );
        assert!("Recruiter".parse::<UserType>().is_err());
        assert_eq!(UserType::default(), UserType::Jobseeker);
    }

    #[test]
    fn test_update_job_is_empty() {
        assert!(UpdateJob::default().is_empty());
        let update = UpdateJob {
            company: Some("Acme".to_string()),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
