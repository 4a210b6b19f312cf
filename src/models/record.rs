//! Borrow record display row

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A borrow record joined with its copy, book and section, shaped for
/// display. An open record (no return date) shows as `"Borrowed"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BorrowRecordRow {
    pub record_id: i64,
    pub borrower: String,
    pub borrow_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub box_id: i64,
    pub title: String,
    pub author: String,
    pub section: String,
    pub status: String,
    pub damaged: bool,
}
