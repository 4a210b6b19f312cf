//! Circulation service: borrow/return lifecycle, damage flagging, discard

use chrono::NaiveDate;

use crate::{
    error::AppResult,
    models::{BorrowOutcome, BorrowRecordRow, DamageOutcome, DiscardedCopy, ReturnOutcome},
    repository::Repository,
};

#[derive(Clone)]
pub struct CirculationService {
    repository: Repository,
}

impl CirculationService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Borrow a copy (claim-if-available)
    pub async fn borrow(
        &self,
        copy_id: i64,
        borrower: &str,
        borrow_date: NaiveDate,
    ) -> AppResult<BorrowOutcome> {
        let outcome = self
            .repository
            .circulation
            .borrow(copy_id, borrower, borrow_date)
            .await?;

        if outcome.success() {
            tracing::info!(copy_id, borrower, "copy borrowed");
        }

        Ok(outcome)
    }

    /// Return a copy, recording whether it came back damaged
    pub async fn return_copy(
        &self,
        copy_id: i64,
        return_date: NaiveDate,
        damaged: bool,
    ) -> AppResult<ReturnOutcome> {
        self.repository
            .circulation
            .return_copy(copy_id, return_date, damaged)
            .await
    }

    /// Flag a shelved copy as damaged
    pub async fn set_damaged(&self, copy_id: i64) -> AppResult<DamageOutcome> {
        self.repository.copies.set_damaged(copy_id).await
    }

    /// Discard every damaged copy, cascading book cleanup
    pub async fn discard_damaged(&self) -> AppResult<Vec<DiscardedCopy>> {
        self.repository.copies.discard_damaged().await
    }

    /// List borrow records, optionally for one borrower
    pub async fn list_borrow_records(
        &self,
        user: Option<&str>,
    ) -> AppResult<Vec<BorrowRecordRow>> {
        self.repository.circulation.list_records(user).await
    }
}
