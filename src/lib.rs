//! Libris Library Inventory Management Core
//!
//! Tracks book titles, their physical copies ("boxes"), shelving locations,
//! the borrow/return lifecycle with damage handling, and administrative
//! statistics. The presentation layer and authentication live elsewhere;
//! this crate exposes typed service operations over a transactional SQLite
//! store.

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};

/// Application state shared with the presentation layer
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

/// Create a connection pool for the configured database and run the
/// embedded migrations.
pub async fn connect(config: &config::DatabaseConfig) -> AppResult<Pool<Sqlite>> {
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect(&config.url)
        .await?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| AppError::Internal(format!("migration failed: {}", e)))?;

    Ok(pool)
}
