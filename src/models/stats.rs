//! Aggregate statistics types

use serde::{Deserialize, Serialize};

/// Grouping dimension for the overview statistics.
///
/// Each variant maps to a statically known key expression and GROUP BY
/// expression; there is no string-matched dispatch on raw input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupDimension {
    Location,
    Author,
    Year,
    /// Borrowed vs available copies
    Status,
    /// Good vs damaged copies
    Condition,
    /// Current open borrower only
    Borrower,
    /// Day granularity
    BuyDate,
}

impl GroupDimension {
    /// All dimensions, in the order `statistics_all` reports them
    pub const ALL: [GroupDimension; 7] = [
        GroupDimension::Location,
        GroupDimension::Author,
        GroupDimension::Year,
        GroupDimension::Status,
        GroupDimension::Condition,
        GroupDimension::Borrower,
        GroupDimension::BuyDate,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "location" => Some(GroupDimension::Location),
            "author" => Some(GroupDimension::Author),
            "year" => Some(GroupDimension::Year),
            "status" => Some(GroupDimension::Status),
            "condition" => Some(GroupDimension::Condition),
            "borrower" => Some(GroupDimension::Borrower),
            "buy_date" => Some(GroupDimension::BuyDate),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GroupDimension::Location => "location",
            GroupDimension::Author => "author",
            GroupDimension::Year => "year",
            GroupDimension::Status => "status",
            GroupDimension::Condition => "condition",
            GroupDimension::Borrower => "borrower",
            GroupDimension::BuyDate => "buy_date",
        }
    }

    /// SELECT expression producing the textual group key.
    ///
    /// Booleans are rendered as their display labels here so the key column
    /// is uniformly TEXT; an open-record borrower may be NULL, which groups
    /// under `(none)`.
    pub fn key_expr(self) -> &'static str {
        match self {
            GroupDimension::Location => "ls.section_name",
            GroupDimension::Author => "b.author",
            GroupDimension::Year => "CAST(b.year AS TEXT)",
            GroupDimension::Status => {
                "CASE WHEN bb.be_borrowed THEN 'Borrowed' ELSE 'Available' END"
            }
            GroupDimension::Condition => {
                "CASE WHEN bb.damaged THEN 'Damaged' ELSE 'Good' END"
            }
            GroupDimension::Borrower => "COALESCE(br.borrower, '(none)')",
            GroupDimension::BuyDate => "CAST(bb.buy_date AS TEXT)",
        }
    }

    /// GROUP BY expression paired with [`Self::key_expr`]
    pub fn group_expr(self) -> &'static str {
        match self {
            GroupDimension::Location => "ls.section_name",
            GroupDimension::Author => "b.author",
            GroupDimension::Year => "b.year",
            GroupDimension::Status => "bb.be_borrowed",
            GroupDimension::Condition => "bb.damaged",
            GroupDimension::Borrower => "br.borrower",
            GroupDimension::BuyDate => "bb.buy_date",
        }
    }
}

/// One aggregate row: per group, or the single `overall` row when ungrouped
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatRow {
    pub group_key: String,
    pub total_titles: i64,
    pub avg_price: Option<f64>,
    pub total_value: Option<f64>,
    pub total_copies: i64,
}
