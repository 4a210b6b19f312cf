//! Users service: the admin gate.
//!
//! Admin membership is queried per call instead of being loaded once at
//! startup, so role changes take effect immediately.

use crate::{error::AppResult, repository::Repository};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
}

impl UsersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Whether this username may perform privileged operations
    pub async fn is_admin(&self, username: &str) -> AppResult<bool> {
        self.repository.users.is_admin(username).await
    }

    /// All administrator usernames
    pub async fn list_admins(&self) -> AppResult<Vec<String>> {
        self.repository.users.list_admins().await
    }
}
