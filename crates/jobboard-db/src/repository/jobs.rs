//! Job operations

use chrono::Utc;
use sqlx::Row;

use crate::error::DbError;
use crate::models::{Job, NewJob, UpdateJob};
use crate::repository::Database;
use crate::utils::escape_like;

const JOB_COLUMNS: &str =
    "id, title, description, location, company, owner_user_id, created_at, updated_at";

/// Query parameters for listing jobs
#[derive(Debug, Clone, Default)]
pub struct JobQuery {
    /// Case-insensitive substring matched against title, location,
    /// company and description
    pub search: Option<String>,
    /// Only jobs posted by this user
    pub owner_user_id: Option<i64>,
}

impl Database {
    // ==================== Job Operations ====================

    /// Insert a new job
    pub async fn insert_job(&self, job: NewJob) -> Result<Job, DbError> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO jobs (title, description, location, company, owner_user_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&job.title)
        .bind(&job.description)
        .bind(&job.location)
        .bind(&job.company)
        .bind(job.owner_user_id)
        .bind(now.to_rfc3339())
        .bind(now.to_rfc3339())
        .fetch_one(&self.pool)
        .await?;

        let id: i64 = result.get("id");

        Ok(Job {
            id,
            title: job.title,
            description: job.description,
            location: job.location,
            company: job.company,
            owner_user_id: job.owner_user_id,
            created_at: now,
            updated_at: now,
        })
    }

    /// Get a job by ID
    pub async fn get_job(&self, id: i64) -> Result<Option<Job>, DbError> {
        let sql = format!("SELECT {} FROM jobs WHERE id = ?", JOB_COLUMNS);
        let result = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        result.map(|row| Job::try_from(&row).map_err(DbError::from)).transpose()
    }

    /// List jobs, newest first
    pub async fn list_jobs(&self, query: JobQuery) -> Result<Vec<Job>, DbError> {
        let mut conditions = Vec::new();

        let pattern = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", escape_like(s)));

        if pattern.is_some() {
            conditions.push(
                "(title LIKE ? ESCAPE '\\' OR location LIKE ? ESCAPE '\\' \
                 OR company LIKE ? ESCAPE '\\' OR description LIKE ? ESCAPE '\\')",
            );
        }
        if query.owner_user_id.is_some() {
            conditions.push("owner_user_id = ?");
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!(
            "SELECT {} FROM jobs {} ORDER BY created_at DESC, id DESC",
            JOB_COLUMNS, where_clause
        );

        let mut db_query = sqlx::query(&sql);
        if let Some(pattern) = &pattern {
            // One bind per LIKE placeholder
            for _ in 0..4 {
                db_query = db_query.bind(pattern.clone());
            }
        }
        if let Some(owner_user_id) = query.owner_user_id {
            db_query = db_query.bind(owner_user_id);
        }

        let rows = db_query.fetch_all(&self.pool).await?;

        rows.iter()
            .map(|row| Job::try_from(row).map_err(DbError::from))
            .collect()
    }

    /// Apply a partial update to a job. Returns `None` if the job is gone.
    ///
    /// Unset fields keep their stored value; the merge happens inside a
    /// single statement so concurrent updates to different fields both land.
    pub async fn update_job(&self, id: i64, update: UpdateJob) -> Result<Option<Job>, DbError> {
        let sql = format!(
            r#"
            UPDATE jobs
            SET title = COALESCE(?, title),
                description = COALESCE(?, description),
                location = COALESCE(?, location),
                company = COALESCE(?, company),
                updated_at = ?
            WHERE id = ?
            RETURNING {}
            "#,
            JOB_COLUMNS
        );

        let result = sqlx::query(&sql)
            .bind(update.title)
            .bind(update.description)
            .bind(update.location)
            .bind(update.company)
            .bind(Utc::now().to_rfc3339())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        result.map(|row| Job::try_from(&row).map_err(DbError::from)).transpose()
    }

    /// Delete a job together with its applications
    pub async fn delete_job(&self, id: i64) -> Result<bool, DbError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM applications WHERE job_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM jobs WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
