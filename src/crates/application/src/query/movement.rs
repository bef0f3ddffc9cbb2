use crate::command::song_identity::SongIdentityResolver;
use crate::query::dto::{EnrichedChart, EnrichedEntry, MovementSummary};
use crate::query::QueryError;
use crate::shared::today;
use chrono::NaiveDate;
use domain::chart::RankedEntry;
use domain::movement::Movement;
use domain::rank_history::RankHistoryRepository;
use domain::value::ChartType;
use log::{info, warn};
use std::sync::Arc;

/// 对比历史快照计算名次变化
#[derive(Clone)]
pub struct MovementCalculator {
    repository: Arc<dyn RankHistoryRepository>,
    resolver: Arc<SongIdentityResolver>,
}

impl MovementCalculator {
    pub fn new(
        repository: Arc<dyn RankHistoryRepository>,
        resolver: Arc<SongIdentityResolver>,
    ) -> Self {
        Self {
            repository,
            resolver,
        }
    }

    pub async fn calculate_rank_change(
        &self,
        chart_type: &ChartType,
        title: &str,
        artist: &str,
        current_rank: u32,
        current_date: Option<NaiveDate>,
    ) -> Result<Movement, QueryError> {
        if current_rank == 0 {
            return Err(QueryError::InvalidInput(format!(
                "rank must be 1-based ({} - {})",
                title, artist
            )));
        }
        let current_date = current_date.unwrap_or_else(today);
        let history = self.repository.load_history(chart_type).await?;
        let key = self.resolver.key(title, artist);
        Ok(Movement::between(
            history.previous_rank(&key, current_date),
            current_rank,
        ))
    }

    /// 历史只读取一次，逐条计算名次变化、上榜周数和最高名次。
    /// 名次为 0 的条目被跳过并记录警告。
    pub async fn enrich<T: RankedEntry>(
        &self,
        chart_type: &ChartType,
        entries: Vec<T>,
        current_date: Option<NaiveDate>,
    ) -> Result<EnrichedChart<T>, QueryError> {
        let current_date = current_date.unwrap_or_else(today);
        let history = self.repository.load_history(chart_type).await?;
        let mut summary = MovementSummary::default();

        let entries: Vec<EnrichedEntry<T>> = entries
            .into_iter()
            .filter(|entry| {
                if entry.rank() == 0 {
                    warn!(
                        "Skipping {} entry {} - {}: rank must be 1-based",
                        chart_type,
                        entry.title(),
                        entry.artist()
                    );
                    return false;
                }
                true
            })
            .map(|entry| {
                let key = self.resolver.key(entry.title(), entry.artist());
                let movement =
                    Movement::between(history.previous_rank(&key, current_date), entry.rank());
                let run = history.chart_run(&key, entry.rank(), current_date);
                summary.record(&movement);
                EnrichedEntry {
                    entry,
                    movement,
                    run,
                }
            })
            .collect();

        info!(
            "[Rank Change] {}: new entries {}, up {}, down {}, unchanged {}",
            chart_type,
            summary.new_entries,
            summary.moved_up,
            summary.moved_down,
            summary.unchanged
        );
        Ok(EnrichedChart { entries, summary })
    }
}
