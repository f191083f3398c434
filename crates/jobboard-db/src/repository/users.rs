//! User operations

use chrono::Utc;
use sqlx::Row;

use crate::error::DbError;
use crate::models::{NewUser, UpdateProfile, User};
use crate::repository::Database;
use crate::utils::normalize_email;

const USER_COLUMNS: &str = "id, email, password_hash, role, user_type, name, phone, location, bio, created_at, updated_at";

impl Database {
    // ==================== User Operations ====================

    /// Insert a new user
    pub async fn insert_user(&self, user: NewUser) -> Result<User, DbError> {
        let now = Utc::now();
        let email = normalize_email(&user.email);

        // Check if user already exists
        let existing = self.get_user_by_email(&email).await?;
        if existing.is_some() {
            return Err(DbError::Duplicate(format!("User '{}' already exists", email)));
        }

        let result = sqlx::query(
            r#"
            INSERT INTO users (email, password_hash, role, user_type, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(user.user_type.as_str())
        .bind(now.to_rfc3339())
        .bind(now.to_rfc3339())
        .fetch_one(&self.pool)
        .await
        // Two concurrent signups can both pass the lookup above
        .map_err(|e| DbError::from_unique_violation(e, format!("User '{}' already exists", email)))?;

        let id: i64 = result.get("id");

        Ok(User {
            id,
            email,
            password_hash: user.password_hash,
            role: user.role,
            user_type: user.user_type,
            name: None,
            phone: None,
            location: None,
            bio: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Get a user by email (case-insensitive)
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, DbError> {
        let sql = format!("SELECT {} FROM users WHERE email = ?", USER_COLUMNS);
        let result = sqlx::query(&sql)
            .bind(normalize_email(email))
            .fetch_optional(&self.pool)
            .await?;

        result.map(|row| User::try_from(&row).map_err(DbError::from)).transpose()
    }

    /// Get a user by ID
    pub async fn get_user_by_id(&self, id: i64) -> Result<Option<User>, DbError> {
        let sql = format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS);
        let result = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        result.map(|row| User::try_from(&row).map_err(DbError::from)).transpose()
    }

    /// List all users
    pub async fn list_users(&self) -> Result<Vec<User>, DbError> {
        let sql = format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS);
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        rows.iter()
            .map(|row| User::try_from(row).map_err(DbError::from))
            .collect()
    }

    /// Apply a profile update to a user.
    ///
    /// Only the fields set in `update` change. Returns the updated user, or
    /// `None` if no user has this id.
    pub async fn update_user_profile(
        &self,
        id: i64,
        update: UpdateProfile,
    ) -> Result<Option<User>, DbError> {
        let email = update.email.as_deref().map(normalize_email);

        if let Some(email) = &email
            && let Some(existing) = self.get_user_by_email(email).await?
            && existing.id != id
        {
            return Err(DbError::Duplicate(format!("User '{}' already exists", email)));
        }

        let sql = format!(
            r#"
            UPDATE users
            SET email = COALESCE(?, email),
                name = COALESCE(?, name),
                phone = COALESCE(?, phone),
                location = COALESCE(?, location),
                bio = COALESCE(?, bio),
                updated_at = ?
            WHERE id = ?
            RETURNING {}
            "#,
            USER_COLUMNS
        );

        let result = sqlx::query(&sql)
            .bind(&email)
            .bind(update.name)
            .bind(update.phone)
            .bind(update.location)
            .bind(update.bio)
            .bind(Utc::now().to_rfc3339())
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DbError::from_unique_violation(
                    e,
                    format!("User '{}' already exists", email.as_deref().unwrap_or_default()),
                )
            })?;

        result.map(|row| User::try_from(&row).map_err(DbError::from)).transpose()
    }

    /// Check if any users exist
    pub async fn has_users(&self) -> Result<bool, DbError> {
        let result = sqlx::query("SELECT COUNT(*) as count FROM users")
            .fetch_one(&self.pool)
            .await?;
        let count: i64 = result.get("count");
        Ok(count > 0)
    }
}
