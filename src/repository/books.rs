//! Books repository for database operations.
//!
//! Multi-statement writes run inside one scoped transaction: commit on the
//! happy path, rollback on drop for every early return.

use chrono::NaiveDate;
use sqlx::{Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::{AddedCopies, Book},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Sqlite>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// List all title records
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT book_id, title, author, year, price, num_books, borrowed_count
            FROM books
            ORDER BY book_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// Get a title record by id
    pub async fn get_by_id(&self, book_id: i64) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            SELECT book_id, title, author, year, price, num_books, borrowed_count
            FROM books
            WHERE book_id = ?
            "#,
        )
        .bind(book_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", book_id)))
    }

    /// Create a title record together with its first copy.
    ///
    /// The caller validates the location beforehand. Titles are not
    /// deduplicated by (title, author): book_id is the identity key and two
    /// distinct titles may share both fields.
    pub async fn create_with_first_copy(
        &self,
        title: &str,
        author: &str,
        year: i64,
        price: f64,
        buy_date: NaiveDate,
        location: i64,
    ) -> AppResult<i64> {
        let mut tx = self.pool.begin().await?;

        let book_id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO books (title, author, year, price, num_books, borrowed_count)
            VALUES (?, ?, ?, ?, 1, 0)
            RETURNING book_id
            "#,
        )
        .bind(title)
        .bind(author)
        .bind(year)
        .bind(price)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO book_boxes (book_id, buy_date, location) VALUES (?, ?, ?)")
            .bind(book_id)
            .bind(buy_date)
            .bind(location)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(book_id)
    }

    /// Insert `count` new available copies for an existing title and bump
    /// its owned-copy count by the same amount.
    pub async fn add_copies(
        &self,
        book_id: i64,
        count: i64,
        buy_date: NaiveDate,
        location: i64,
    ) -> AppResult<AddedCopies> {
        let mut tx = self.pool.begin().await?;

        let row: Option<(String, String)> =
            sqlx::query_as("SELECT title, author FROM books WHERE book_id = ?")
                .bind(book_id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some((title, author)) = row else {
            return Err(AppError::NotFound(format!(
                "Book with id {} not found",
                book_id
            )));
        };

        for _ in 0..count {
            sqlx::query("INSERT INTO book_boxes (book_id, buy_date, location) VALUES (?, ?, ?)")
                .bind(book_id)
                .bind(buy_date)
                .bind(location)
                .execute(&mut *tx)
                .await?;
        }

        sqlx::query("UPDATE books SET num_books = num_books + ? WHERE book_id = ?")
            .bind(count)
            .bind(book_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(AddedCopies {
            title,
            author,
            added_copies: count,
        })
    }
}
