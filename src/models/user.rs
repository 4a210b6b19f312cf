//! User model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Library account. The core only consults `is_admin` to gate privileged
/// operations; authentication itself is the presentation layer's concern.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub is_admin: bool,
}
