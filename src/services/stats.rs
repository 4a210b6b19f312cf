//! Statistics service

use indexmap::IndexMap;

use crate::{
    error::AppResult,
    models::{GroupDimension, StatRow},
    repository::Repository,
};

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Overview statistics, per group or as a single `overall` row
    pub async fn overview_stats(
        &self,
        group_by: Option<GroupDimension>,
    ) -> AppResult<Vec<StatRow>> {
        self.repository.stats.overview(group_by).await
    }

    /// The ungrouped overview plus every group dimension in one batch,
    /// keyed by dimension name (the ungrouped row under `overall`).
    pub async fn statistics_all(&self) -> AppResult<IndexMap<String, Vec<StatRow>>> {
        let mut all = IndexMap::with_capacity(GroupDimension::ALL.len() + 1);

        all.insert(
            "overall".to_string(),
            self.repository.stats.overview(None).await?,
        );
        for dim in GroupDimension::ALL {
            all.insert(
                dim.name().to_string(),
                self.repository.stats.overview(Some(dim)).await?,
            );
        }

        Ok(all)
    }
}
