use crate::command::song_identity::SongIdentityResolver;
use crate::query::QueryError;
use crate::shared::today;
use chrono::NaiveDate;
use domain::rank_history::RankHistoryRepository;
use domain::value::ChartType;
use std::sync::Arc;

#[derive(Clone)]
pub struct GetPreviousRank {
    repository: Arc<dyn RankHistoryRepository>,
    resolver: Arc<SongIdentityResolver>,
}

impl GetPreviousRank {
    pub fn new(
        repository: Arc<dyn RankHistoryRepository>,
        resolver: Arc<SongIdentityResolver>,
    ) -> Self {
        Self {
            repository,
            resolver,
        }
    }

    /// 歌曲在上一次记录的快照中的名次（不是严格的 7 天回看）
    pub async fn handle(
        &self,
        chart_type: &ChartType,
        title: &str,
        artist: &str,
        current_date: Option<NaiveDate>,
    ) -> Result<Option<u32>, QueryError> {
        let current_date = current_date.unwrap_or_else(today);
        let key = self.resolver.key(title, artist);
        let history = self.repository.load_history(chart_type).await?;
        Ok(history.previous_rank(&key, current_date))
    }
}
