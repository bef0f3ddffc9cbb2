use crate::query::QueryError;
use chrono::NaiveDate;
use domain::rank_history::{ChartSnapshot, RankHistoryRepository};
use domain::value::ChartType;
use std::sync::Arc;

#[derive(Clone)]
pub struct GetSnapshot {
    repository: Arc<dyn RankHistoryRepository>,
}

impl GetSnapshot {
    pub fn new(repository: Arc<dyn RankHistoryRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        chart_type: &ChartType,
        date: NaiveDate,
    ) -> Result<Option<ChartSnapshot>, QueryError> {
        let history = self.repository.load_history(chart_type).await?;
        Ok(history.snapshot(date).cloned())
    }
}
