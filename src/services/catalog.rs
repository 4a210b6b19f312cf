//! Catalog service: inventory CRUD and the query engine

use chrono::NaiveDate;

use crate::{
    error::{AppError, AppResult},
    models::{AddedCopies, Book, BookQuery, CopyRow, Section},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List all title records
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    /// List every copy with display labels
    pub async fn list_book_boxes(&self) -> AppResult<Vec<CopyRow>> {
        self.repository.copies.list().await
    }

    /// List shelving sections (for location pickers and validation)
    pub async fn list_sections(&self) -> AppResult<Vec<Section>> {
        self.repository.sections.list().await
    }

    /// Add a new title with one copy. Fails hard on an unknown location.
    pub async fn add_book(
        &self,
        title: &str,
        author: &str,
        year: i64,
        price: f64,
        buy_date: NaiveDate,
        location: i64,
    ) -> AppResult<i64> {
        if !self.repository.sections.exists(location).await? {
            return Err(AppError::NotFound("invalid location".to_string()));
        }

        let book_id = self
            .repository
            .books
            .create_with_first_copy(title, author, year, price, buy_date, location)
            .await?;

        tracing::info!(book_id, title, "added book");

        Ok(book_id)
    }

    /// Add copies to an existing title. Fails hard on an unknown book id or
    /// location.
    pub async fn add_copies(
        &self,
        book_id: i64,
        count: i64,
        buy_date: NaiveDate,
        location: i64,
    ) -> AppResult<AddedCopies> {
        if count <= 0 {
            return Err(AppError::Validation(format!(
                "copy count must be positive, got {}",
                count
            )));
        }
        if !self.repository.sections.exists(location).await? {
            return Err(AppError::NotFound("invalid location".to_string()));
        }

        self.repository
            .books
            .add_copies(book_id, count, buy_date, location)
            .await
    }

    /// Filtered and sorted copy query; returns the rows and their count
    pub async fn query_books(&self, query: &BookQuery) -> AppResult<(Vec<CopyRow>, usize)> {
        self.repository.copies.search(query).await
    }
}
