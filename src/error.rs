//! Error types for the Libris core

use thiserror::Error;

/// Main application error type.
///
/// Only hard failures live here: invalid foreign references and store
/// failures. Business-rule refusals (returning a copy that is not out,
/// re-damaging a damaged copy, ...) are tagged outcome values, not errors —
/// see [`crate::models::outcome`].
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
