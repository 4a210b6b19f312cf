//! Physical copy ("box") display row

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A copy joined with its book, section and open borrow record, shaped for
/// display. `status` and `fine` are presentation labels; `damaged` carries
/// the raw condition flag for logic use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopyRow {
    pub id: i64,
    pub book_id: i64,
    pub title: String,
    pub author: String,
    pub year: i64,
    pub price: f64,
    pub buy_date: NaiveDate,
    pub section: String,
    pub status: String,
    pub fine: String,
    pub damaged: bool,
    pub borrow_date: Option<NaiveDate>,
}

impl CopyRow {
    /// Status label for a `be_borrowed` flag.
    pub fn status_label(be_borrowed: bool) -> &'static str {
        if be_borrowed {
            "Borrowed"
        } else {
            "Available"
        }
    }

    /// Legacy "fine" label for a condition flag: a damaged copy is waiting
    /// to be discarded.
    pub fn fine_label(damaged: bool) -> &'static str {
        if damaged {
            "No(wait to throw away)"
        } else {
            "Yes"
        }
    }
}
