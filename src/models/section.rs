//! Library section (shelving location) model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Static shelving-location reference data
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Section {
    pub location_id: i64,
    pub section_name: String,
}
