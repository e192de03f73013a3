//! User repository for roombook.

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::user::{NewUser, User};
use crate::{Result, RoombookError};

/// Repository for user rows.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user.
    ///
    /// The email uniqueness constraint is the only duplicate check; a lost
    /// race surfaces as a conflict.
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, email, name, password, role, created_at)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING id, email, name, password, role, created_at",
        )
        .bind(new_user.id)
        .bind(&new_user.email)
        .bind(&new_user.name)
        .bind(&new_user.password)
        .bind(new_user.role)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await
        .map_err(|e| match RoombookError::from(e) {
            RoombookError::Conflict(_) => {
                RoombookError::Conflict("email already registered".to_string())
            }
            other => other,
        })
    }

    /// Get a user by ID.
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, name, password, role, created_at FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Get a user by email.
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, name, password, role, created_at FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }
}
