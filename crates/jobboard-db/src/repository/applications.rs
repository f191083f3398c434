//! Job application operations

use chrono::Utc;
use sqlx::Row;

use crate::error::DbError;
use crate::models::{Application, NewApplication};
use crate::repository::Database;

impl Database {
    /// Record an application against a job.
    ///
    /// Fails with `NotFound` if the job does not exist.
    pub async fn insert_application(
        &self,
        application: NewApplication,
    ) -> Result<Application, DbError> {
        if self.get_job(application.job_id).await?.is_none() {
            return Err(DbError::NotFound(format!("Job: {}", application.job_id)));
        }

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO applications (job_id, applicant_name, applicant_email, resume_link, user_id, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(application.job_id)
        .bind(&application.applicant_name)
        .bind(&application.applicant_email)
        .bind(&application.resume_link)
        .bind(application.user_id)
        .bind(now.to_rfc3339())
        .fetch_one(&self.pool)
        .await?;

        let id: i64 = result.get("id");

        Ok(Application {
            id,
            job_id: application.job_id,
            applicant_name: application.applicant_name,
            applicant_email: application.applicant_email,
            resume_link: application.resume_link,
            user_id: application.user_id,
            created_at: now,
        })
    }

    /// List the applications for a job, oldest first
    pub async fn list_applications_for_job(&self, job_id: i64) -> Result<Vec<Application>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT id, job_id, applicant_name, applicant_email, resume_link, user_id, created_at
            FROM applications
            WHERE job_id = ?
            ORDER BY created_at, id
            "#,
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| Application::try_from(row).map_err(DbError::from))
            .collect()
    }
}
