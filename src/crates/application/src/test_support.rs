use crate::command::song_identity::{SongIdentityResolver, SongNameNormalizer};
use async_trait::async_trait;
use chrono::NaiveDate;
use domain::rank_history::{ChartHistory, ChartSnapshot, RankHistoryError, RankHistoryRepository};
use domain::value::ChartType;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub struct LowercaseNormalizer;

impl SongNameNormalizer for LowercaseNormalizer {
    fn normalize(&self, text: &str) -> String {
        text.to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub fn resolver() -> Arc<SongIdentityResolver> {
    Arc::new(SongIdentityResolver::new(Arc::new(LowercaseNormalizer)))
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[derive(Default)]
pub struct MemoryRepository {
    store: Mutex<HashMap<ChartType, Vec<ChartSnapshot>>>,
}

#[async_trait]
impl RankHistoryRepository for MemoryRepository {
    async fn save_snapshot(&self, snapshot: &ChartSnapshot) -> Result<(), RankHistoryError> {
        let mut store = self.store.lock().unwrap();
        let snapshots = store.entry(snapshot.chart_type.clone()).or_default();
        snapshots.retain(|s| s.date != snapshot.date);
        snapshots.push(snapshot.clone());
        Ok(())
    }

    async fn load_history(&self, chart_type: &ChartType) -> Result<ChartHistory, RankHistoryError> {
        let store = self.store.lock().unwrap();
        let snapshots = store.get(chart_type).cloned().unwrap_or_default();
        Ok(ChartHistory::from_snapshots(chart_type.clone(), snapshots))
    }

    async fn delete_chart_type(&self, chart_type: &ChartType) -> Result<(), RankHistoryError> {
        self.store.lock().unwrap().remove(chart_type);
        Ok(())
    }

    async fn truncate(&self) -> Result<(), RankHistoryError> {
        self.store.lock().unwrap().clear();
        Ok(())
    }
}

/// 写入总是失败的仓储
pub struct FailingRepository;

#[async_trait]
impl RankHistoryRepository for FailingRepository {
    async fn save_snapshot(&self, _snapshot: &ChartSnapshot) -> Result<(), RankHistoryError> {
        Err(RankHistoryError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only volume",
        )))
    }

    async fn load_history(&self, chart_type: &ChartType) -> Result<ChartHistory, RankHistoryError> {
        Ok(ChartHistory::empty(chart_type.clone()))
    }

    async fn delete_chart_type(&self, _chart_type: &ChartType) -> Result<(), RankHistoryError> {
        Ok(())
    }

    async fn truncate(&self) -> Result<(), RankHistoryError> {
        Ok(())
    }
}
