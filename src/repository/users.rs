//! Users repository for database operations.
//!
//! Admin membership is looked up per request rather than cached at startup,
//! so a change to the users table takes effect without a restart.

use sqlx::{Pool, Sqlite};

use crate::{error::AppResult, models::User};

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Sqlite>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Check whether a username belongs to an administrator
    pub async fn is_admin(&self, username: &str) -> AppResult<bool> {
        let is_admin: Option<bool> =
            sqlx::query_scalar("SELECT is_admin FROM users WHERE username = ?")
                .bind(username)
                .fetch_optional(&self.pool)
                .await?;

        Ok(is_admin.unwrap_or(false))
    }

    /// List all administrator usernames
    pub async fn list_admins(&self) -> AppResult<Vec<String>> {
        let admins: Vec<String> =
            sqlx::query_scalar("SELECT username FROM users WHERE is_admin = 1 ORDER BY username")
                .fetch_all(&self.pool)
                .await?;

        Ok(admins)
    }

    /// Get a user by username
    pub async fn get(&self, username: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT username, password, is_admin FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Insert a user, replacing password and role if it already exists
    pub async fn upsert(&self, username: &str, password: &str, is_admin: bool) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (username, password, is_admin)
            VALUES (?, ?, ?)
            ON CONFLICT (username) DO UPDATE SET
                password = excluded.password,
                is_admin = excluded.is_admin
            "#,
        )
        .bind(username)
        .bind(password)
        .bind(is_admin)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
