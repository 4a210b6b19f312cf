//! Copies ("book boxes") repository: listing, the dynamic filter/sort query
//! engine, and the damage lifecycle.
//!
//! The query engine builds SQL with `sqlx::QueryBuilder`: every filter value
//! is a bound parameter and sort columns come exclusively from the
//! `SortField` allow-list, so externally influenced text never reaches the
//! query string.

use sqlx::{sqlite::SqliteRow, Pool, QueryBuilder, Row, Sqlite};

use crate::{
    error::AppResult,
    models::{BookQuery, CopyRow, DamageOutcome, DiscardedCopy},
};

const COPY_SELECT: &str = r#"
SELECT b.title, b.author, b.book_id, bb.buy_date, ls.section_name, bb.be_borrowed,
       bb.damaged, b.year, b.price, bb.id, br.borrow_date
FROM book_boxes bb
JOIN books b ON bb.book_id = b.book_id
JOIN library_sections ls ON bb.location = ls.location_id
LEFT JOIN borrow_records br ON bb.id = br.book_box_id AND br.return_date IS NULL
"#;

fn shape_row(row: &SqliteRow) -> CopyRow {
    let be_borrowed: bool = row.get("be_borrowed");
    let damaged: bool = row.get("damaged");

    CopyRow {
        id: row.get("id"),
        book_id: row.get("book_id"),
        title: row.get("title"),
        author: row.get("author"),
        year: row.get("year"),
        price: row.get("price"),
        buy_date: row.get("buy_date"),
        section: row.get("section_name"),
        status: CopyRow::status_label(be_borrowed).to_string(),
        fine: CopyRow::fine_label(damaged).to_string(),
        damaged,
        borrow_date: row.get("borrow_date"),
    }
}

#[derive(Clone)]
pub struct CopiesRepository {
    pool: Pool<Sqlite>,
}

impl CopiesRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// List every copy with its book, section and status labels
    pub async fn list(&self) -> AppResult<Vec<CopyRow>> {
        let rows = sqlx::query(COPY_SELECT).fetch_all(&self.pool).await?;

        Ok(rows.iter().map(shape_row).collect())
    }

    /// Filtered, multi-level-sorted copy query.
    ///
    /// Returns the shaped rows and the total count, which is simply the row
    /// count — there is no pagination and no separate count query.
    pub async fn search(&self, query: &BookQuery) -> AppResult<(Vec<CopyRow>, usize)> {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(COPY_SELECT);
        qb.push("WHERE 1=1");

        if let Some(ref title) = query.title {
            qb.push(" AND b.title = ").push_bind(title);
        }
        if let Some(ref author) = query.author {
            qb.push(" AND b.author = ").push_bind(author);
        }
        if let Some(book_id) = query.book_id {
            qb.push(" AND b.book_id = ").push_bind(book_id);
        }
        if let Some(year_min) = query.year_min {
            qb.push(" AND b.year >= ").push_bind(year_min);
        }
        if let Some(year_max) = query.year_max {
            qb.push(" AND b.year <= ").push_bind(year_max);
        }
        if let Some(price_min) = query.price_min {
            qb.push(" AND b.price >= ").push_bind(price_min);
        }
        if let Some(price_max) = query.price_max {
            qb.push(" AND b.price <= ").push_bind(price_max);
        }
        if let Some(location) = query.location {
            qb.push(" AND bb.location = ").push_bind(location);
        }
        if let Some(borrowed) = query.borrowed {
            qb.push(" AND bb.be_borrowed = ").push_bind(borrowed);
        }
        if let Some(ref borrower) = query.borrower {
            // LEFT JOIN is already restricted to the open record
            qb.push(" AND br.borrower = ").push_bind(borrower);
        }
        if let Some(damaged) = query.damaged {
            qb.push(" AND bb.damaged = ").push_bind(damaged);
        }

        for (i, (field, order)) in query.sort_chain().into_iter().enumerate() {
            qb.push(if i == 0 { " ORDER BY " } else { ", " });
            qb.push(field.column());
            qb.push(" ");
            qb.push(order.sql());
        }

        let rows = qb.build().fetch_all(&self.pool).await?;
        let shaped: Vec<CopyRow> = rows.iter().map(shape_row).collect();
        let total = shaped.len();

        Ok((shaped, total))
    }

    /// Flag a good, shelved copy as damaged.
    ///
    /// Refusals are tagged outcomes: a borrowed copy cannot be flagged, and
    /// an already-damaged copy reports that distinctly rather than as
    /// not-found.
    pub async fn set_damaged(&self, copy_id: i64) -> AppResult<DamageOutcome> {
        let row: Option<(bool, bool)> =
            sqlx::query_as("SELECT damaged, be_borrowed FROM book_boxes WHERE id = ?")
                .bind(copy_id)
                .fetch_optional(&self.pool)
                .await?;

        let Some((damaged, be_borrowed)) = row else {
            return Ok(DamageOutcome::NotFound { copy_id });
        };
        if damaged {
            return Ok(DamageOutcome::AlreadyDamaged { copy_id });
        }
        if be_borrowed {
            return Ok(DamageOutcome::Borrowed { copy_id });
        }

        // conditional like the borrow claim, in case the copy moved between
        // the read and the flag
        let flagged = sqlx::query(
            "UPDATE book_boxes SET damaged = 1 WHERE id = ? AND damaged = 0 AND be_borrowed = 0",
        )
        .bind(copy_id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if flagged == 0 {
            return Ok(DamageOutcome::Borrowed { copy_id });
        }

        Ok(DamageOutcome::Marked { copy_id })
    }

    /// Bulk-discard every damaged copy.
    ///
    /// Deletes the copies and their borrow records, decrements each owning
    /// book's copy count (clamped at zero), then removes books left with no
    /// copies. Idempotent: with nothing eligible it returns an empty list.
    pub async fn discard_damaged(&self) -> AppResult<Vec<DiscardedCopy>> {
        let mut tx = self.pool.begin().await?;

        let damaged: Vec<(i64, String, i64)> = sqlx::query_as(
            r#"
            SELECT bb.id, b.title, b.book_id
            FROM book_boxes bb
            JOIN books b ON bb.book_id = b.book_id
            WHERE bb.damaged = 1
            "#,
        )
        .fetch_all(&mut *tx)
        .await?;

        if damaged.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query(
            r#"
            DELETE FROM borrow_records WHERE book_box_id IN (
                SELECT id FROM book_boxes WHERE damaged = 1
            )
            "#,
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM book_boxes WHERE damaged = 1")
            .execute(&mut *tx)
            .await?;

        let mut thrown = Vec::with_capacity(damaged.len());
        for (_, title, book_id) in damaged {
            sqlx::query("UPDATE books SET num_books = MAX(num_books - 1, 0) WHERE book_id = ?")
                .bind(book_id)
                .execute(&mut *tx)
                .await?;
            thrown.push(DiscardedCopy { book_id, title });
        }

        sqlx::query("DELETE FROM books WHERE num_books <= 0")
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(count = thrown.len(), "discarded damaged copies");

        Ok(thrown)
    }
}
