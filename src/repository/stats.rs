//! Statistics repository: the aggregate overview query.

use sqlx::{Pool, Row, Sqlite};

use crate::{
    error::AppResult,
    models::{GroupDimension, StatRow},
};

#[derive(Clone)]
pub struct StatsRepository {
    pool: Pool<Sqlite>,
}

impl StatsRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// One aggregate query over copies joined to books, sections and open
    /// borrow records: distinct-title count, average price, summed price
    /// (inventory valuation) and copy count — per group, or a single
    /// `overall` row when `group_by` is unset.
    ///
    /// The key and GROUP BY expressions come from the [`GroupDimension`]
    /// enum only; no externally influenced text reaches the query string.
    pub async fn overview(&self, group_by: Option<GroupDimension>) -> AppResult<Vec<StatRow>> {
        let key_expr = group_by.map_or("'overall'", GroupDimension::key_expr);

        let mut sql = format!(
            r#"
            SELECT COUNT(DISTINCT b.book_id) AS total_titles,
                   AVG(b.price) AS avg_price,
                   SUM(b.price) AS total_value,
                   COUNT(bb.id) AS total_copies,
                   {} AS group_key
            FROM books b
            JOIN book_boxes bb ON b.book_id = bb.book_id
            JOIN library_sections ls ON bb.location = ls.location_id
            LEFT JOIN borrow_records br ON bb.id = br.book_box_id AND br.return_date IS NULL
            "#,
            key_expr
        );
        if let Some(dim) = group_by {
            sql.push_str(" GROUP BY ");
            sql.push_str(dim.group_expr());
        }

        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        Ok(rows
            .iter()
            .map(|row| StatRow {
                group_key: row.get("group_key"),
                total_titles: row.get("total_titles"),
                avg_price: row.get("avg_price"),
                total_value: row.get("total_value"),
                total_copies: row.get("total_copies"),
            })
            .collect())
    }
}
