//! Book (title record) model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Book model from database.
///
/// `num_books` counts the copies currently owned, `borrowed_count` the copies
/// currently out. The row is removed once `num_books` drops to zero.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub book_id: i64,
    pub title: String,
    pub author: String,
    pub year: i64,
    pub price: f64,
    pub num_books: i64,
    pub borrowed_count: i64,
}

/// Result of adding copies to an existing title
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddedCopies {
    pub title: String,
    pub author: String,
    pub added_copies: i64,
}
