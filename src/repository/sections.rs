//! Sections repository for database operations

use sqlx::{Pool, Sqlite};

use crate::{error::AppResult, models::Section};

#[derive(Clone)]
pub struct SectionsRepository {
    pool: Pool<Sqlite>,
}

impl SectionsRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// List all shelving sections
    pub async fn list(&self) -> AppResult<Vec<Section>> {
        let sections = sqlx::query_as::<_, Section>(
            "SELECT location_id, section_name FROM library_sections ORDER BY location_id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(sections)
    }

    /// Check whether a location id references an existing section
    pub async fn exists(&self, location_id: i64) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM library_sections WHERE location_id = ?)",
        )
        .bind(location_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Insert a section, replacing the name if the id already exists
    pub async fn upsert(&self, location_id: i64, section_name: &str) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO library_sections (location_id, section_name)
            VALUES (?, ?)
            ON CONFLICT (location_id) DO UPDATE SET section_name = excluded.section_name
            "#,
        )
        .bind(location_id)
        .bind(section_name)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
