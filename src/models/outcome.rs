//! Tagged outcomes for circulation operations.
//!
//! Business-rule refusals are ordinary values the caller must branch on,
//! not errors: only invalid references and store failures raise
//! [`crate::error::AppError`]. Each outcome renders a display message for
//! the presentation layer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Result of the atomic claim performed by `borrow`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BorrowOutcome {
    Claimed {
        copy_id: i64,
        borrower: String,
        borrow_date: NaiveDate,
    },
    AlreadyBorrowed {
        copy_id: i64,
    },
    NotFound {
        copy_id: i64,
    },
}

impl BorrowOutcome {
    pub fn success(&self) -> bool {
        matches!(self, BorrowOutcome::Claimed { .. })
    }

    pub fn message(&self) -> String {
        match self {
            BorrowOutcome::Claimed {
                copy_id,
                borrower,
                borrow_date,
            } => format!(
                "Book with ID {} borrowed by {} on {}.",
                copy_id, borrower, borrow_date
            ),
            BorrowOutcome::AlreadyBorrowed { copy_id } => {
                format!("Book with ID {} is already borrowed.", copy_id)
            }
            BorrowOutcome::NotFound { copy_id } => {
                format!("Book with ID {} not found.", copy_id)
            }
        }
    }
}

/// Result of `return_copy`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ReturnOutcome {
    Returned {
        copy_id: i64,
        return_date: NaiveDate,
        damaged: bool,
    },
    /// The copy does not exist or is not currently out
    NotBorrowed {
        copy_id: i64,
    },
}

impl ReturnOutcome {
    pub fn success(&self) -> bool {
        matches!(self, ReturnOutcome::Returned { .. })
    }

    pub fn message(&self) -> String {
        match self {
            ReturnOutcome::Returned {
                copy_id,
                return_date,
                damaged,
            } => format!(
                "Book with ID {} returned on {}. Fine: {}.",
                copy_id,
                return_date,
                if *damaged { "No" } else { "Yes" }
            ),
            ReturnOutcome::NotBorrowed { copy_id } => {
                format!("The book with ID {} is not currently borrowed.", copy_id)
            }
        }
    }
}

/// Result of `set_damaged`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DamageOutcome {
    Marked { copy_id: i64 },
    NotFound { copy_id: i64 },
    /// Cannot flag a copy that is currently out
    Borrowed { copy_id: i64 },
    /// Distinct from `NotFound`: the copy exists but is already flagged
    AlreadyDamaged { copy_id: i64 },
}

impl DamageOutcome {
    pub fn success(&self) -> bool {
        matches!(self, DamageOutcome::Marked { .. })
    }

    pub fn message(&self) -> String {
        match self {
            DamageOutcome::Marked { copy_id } => {
                format!("Book with ID {} marked as damaged.", copy_id)
            }
            DamageOutcome::NotFound { copy_id } => {
                format!("Book with ID {} not found.", copy_id)
            }
            DamageOutcome::Borrowed { copy_id } => {
                format!("Book with ID {} is currently borrowed.", copy_id)
            }
            DamageOutcome::AlreadyDamaged { copy_id } => {
                format!("Book with ID {} already damaged.", copy_id)
            }
        }
    }
}

/// One copy removed by `discard_damaged`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscardedCopy {
    pub book_id: i64,
    pub title: String,
}
