use crate::query::QueryError;
use chrono::NaiveDate;
use domain::rank_history::RankHistoryRepository;
use domain::value::ChartType;
use std::sync::Arc;

#[derive(Clone)]
pub struct GetHistoryDates {
    repository: Arc<dyn RankHistoryRepository>,
}

impl GetHistoryDates {
    pub fn new(repository: Arc<dyn RankHistoryRepository>) -> Self {
        Self { repository }
    }

    /// 已记录快照的日期，降序且无重复；未知榜单类型返回空列表
    pub async fn handle(&self, chart_type: &ChartType) -> Result<Vec<NaiveDate>, QueryError> {
        let history = self.repository.load_history(chart_type).await?;
        Ok(history.dates_desc())
    }
}
