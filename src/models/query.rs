//! Dynamic copy-level query parameters and the sort-field allow-list.
//!
//! Sort fields arrive as raw names from outside the core. They resolve
//! through [`SortField`], a closed mapping to fixed column references; any
//! name outside the mapping resolves to "no sort level" and is never
//! interpolated into query text.

use serde::Deserialize;

/// Filters and sort levels for `query_books`.
///
/// Every filter is independently optional and ANDed in. Up to three sort
/// levels form a left-to-right priority chain: level 2 only applies when
/// level 1 resolved, level 3 only when level 2 did.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookQuery {
    pub title: Option<String>,
    pub author: Option<String>,
    pub book_id: Option<i64>,
    pub year_min: Option<i64>,
    pub year_max: Option<i64>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub location: Option<i64>,
    pub borrowed: Option<bool>,
    /// Matched against the currently open borrow record only
    pub borrower: Option<String>,
    pub damaged: Option<bool>,

    pub sort_by_1: Option<String>,
    pub sort_order_1: Option<String>,
    pub sort_by_2: Option<String>,
    pub sort_order_2: Option<String>,
    pub sort_by_3: Option<String>,
    pub sort_order_3: Option<String>,
}

impl BookQuery {
    /// Resolve the sort chain against the allow-list.
    ///
    /// A hole in the chain drops everything after it, so an unresolvable
    /// (unknown or hostile) field name silently disables that level and the
    /// levels below.
    pub fn sort_chain(&self) -> Vec<(SortField, SortOrder)> {
        let levels = [
            (&self.sort_by_1, &self.sort_order_1),
            (&self.sort_by_2, &self.sort_order_2),
            (&self.sort_by_3, &self.sort_order_3),
        ];

        let mut chain = Vec::new();
        for (field, order) in levels {
            let Some(field) = field.as_deref().and_then(SortField::from_name) else {
                break;
            };
            chain.push((field, SortOrder::from_name(order.as_deref())));
        }
        chain
    }
}

/// Allow-listed sortable fields, each mapping to a validated column
/// reference in the copy-level join.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Title,
    Author,
    Year,
    Price,
    BuyDate,
    Section,
    Status,
}

impl SortField {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "title" => Some(SortField::Title),
            "author" => Some(SortField::Author),
            "year" => Some(SortField::Year),
            "price" => Some(SortField::Price),
            "buy_date" => Some(SortField::BuyDate),
            "section" => Some(SortField::Section),
            "status" => Some(SortField::Status),
            _ => None,
        }
    }

    /// Column reference in the `book_boxes`/`books`/`library_sections` join
    pub fn column(self) -> &'static str {
        match self {
            SortField::Title => "b.title",
            SortField::Author => "b.author",
            SortField::Year => "b.year",
            SortField::Price => "b.price",
            SortField::BuyDate => "bb.buy_date",
            SortField::Section => "ls.section_name",
            SortField::Status => "bb.be_borrowed",
        }
    }
}

/// Sort direction. Anything that is not `desc` (case-insensitively) sorts
/// ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            Some(s) if s.eq_ignore_ascii_case("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }

    pub fn sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}
