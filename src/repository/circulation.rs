//! Circulation repository: the borrow/return lifecycle and record listing.

use chrono::NaiveDate;
use sqlx::{Pool, Row, Sqlite};

use crate::{
    error::AppResult,
    models::{BorrowOutcome, BorrowRecordRow, ReturnOutcome},
};

#[derive(Clone)]
pub struct CirculationRepository {
    pool: Pool<Sqlite>,
}

impl CirculationRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Borrow a copy: claim it if and only if it is currently available.
    ///
    /// The claim is a single conditional update, so two concurrent borrows
    /// of the same copy cannot both succeed and a copy can never carry two
    /// open borrow records. Record insert and borrowed-count bump happen in
    /// the same transaction as the claim.
    pub async fn borrow(
        &self,
        copy_id: i64,
        borrower: &str,
        borrow_date: NaiveDate,
    ) -> AppResult<BorrowOutcome> {
        let mut tx = self.pool.begin().await?;

        let claimed = sqlx::query(
            "UPDATE book_boxes SET be_borrowed = 1 WHERE id = ? AND be_borrowed = 0",
        )
        .bind(copy_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if claimed == 0 {
            let exists: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM book_boxes WHERE id = ?)")
                    .bind(copy_id)
                    .fetch_one(&mut *tx)
                    .await?;

            return Ok(if exists {
                BorrowOutcome::AlreadyBorrowed { copy_id }
            } else {
                BorrowOutcome::NotFound { copy_id }
            });
        }

        sqlx::query(
            "INSERT INTO borrow_records (book_box_id, borrower, borrow_date) VALUES (?, ?, ?)",
        )
        .bind(copy_id)
        .bind(borrower)
        .bind(borrow_date)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE books
            SET borrowed_count = borrowed_count + 1
            WHERE book_id = (SELECT book_id FROM book_boxes WHERE id = ?)
            "#,
        )
        .bind(copy_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(BorrowOutcome::Claimed {
            copy_id,
            borrower: borrower.to_string(),
            borrow_date,
        })
    }

    /// Return a copy, recording the caller-supplied condition outcome.
    ///
    /// Closes the open borrow record, shelves the copy and decrements the
    /// book's borrowed count, floored at zero to tolerate drift. A copy that
    /// does not exist or is not out yields the soft `NotBorrowed` outcome.
    pub async fn return_copy(
        &self,
        copy_id: i64,
        return_date: NaiveDate,
        damaged: bool,
    ) -> AppResult<ReturnOutcome> {
        let mut tx = self.pool.begin().await?;

        let be_borrowed: Option<bool> =
            sqlx::query_scalar("SELECT be_borrowed FROM book_boxes WHERE id = ?")
                .bind(copy_id)
                .fetch_optional(&mut *tx)
                .await?;

        if !be_borrowed.unwrap_or(false) {
            return Ok(ReturnOutcome::NotBorrowed { copy_id });
        }

        sqlx::query(
            "UPDATE borrow_records SET return_date = ? WHERE book_box_id = ? AND return_date IS NULL",
        )
        .bind(return_date)
        .bind(copy_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE book_boxes SET be_borrowed = 0, damaged = ? WHERE id = ?")
            .bind(damaged)
            .bind(copy_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            UPDATE books
            SET borrowed_count = MAX(borrowed_count - 1, 0)
            WHERE book_id = (SELECT book_id FROM book_boxes WHERE id = ?)
            "#,
        )
        .bind(copy_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(ReturnOutcome::Returned {
            copy_id,
            return_date,
            damaged,
        })
    }

    /// List borrow records, newest first, optionally restricted to one
    /// borrower.
    pub async fn list_records(&self, user: Option<&str>) -> AppResult<Vec<BorrowRecordRow>> {
        let base = r#"
            SELECT br.record_id, br.borrower, br.borrow_date, br.return_date,
                   bb.id AS box_id, b.title, b.author, ls.section_name, bb.damaged
            FROM borrow_records br
            JOIN book_boxes bb ON br.book_box_id = bb.id
            JOIN books b ON bb.book_id = b.book_id
            JOIN library_sections ls ON bb.location = ls.location_id
        "#;
        let order = " ORDER BY br.borrow_date DESC, br.record_id DESC";

        let rows = if let Some(user) = user {
            sqlx::query(&format!("{} WHERE br.borrower = ?{}", base, order))
                .bind(user)
                .fetch_all(&self.pool)
                .await?
        } else {
            sqlx::query(&format!("{}{}", base, order))
                .fetch_all(&self.pool)
                .await?
        };

        Ok(rows
            .iter()
            .map(|row| {
                let return_date: Option<NaiveDate> = row.get("return_date");
                BorrowRecordRow {
                    record_id: row.get("record_id"),
                    borrower: row.get("borrower"),
                    borrow_date: row.get("borrow_date"),
                    return_date,
                    box_id: row.get("box_id"),
                    title: row.get("title"),
                    author: row.get("author"),
                    section: row.get("section_name"),
                    status: if return_date.is_some() {
                        "Returned".to_string()
                    } else {
                        "Borrowed".to_string()
                    },
                    damaged: row.get("damaged"),
                }
            })
            .collect())
    }
}
