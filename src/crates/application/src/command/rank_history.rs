use crate::command::song_identity::SongIdentityResolver;
use crate::error::AppError;
use crate::shared::today;
use chrono::NaiveDate;
use domain::rank_history::{ChartSnapshot, RankHistoryRepository, SnapshotEntry};
use domain::value::ChartType;
use log::{info, warn};
use std::sync::Arc;

#[derive(Debug)]
pub struct RecordSnapshotCmd {
    pub chart_type: ChartType,
    pub entries: Vec<SnapshotEntry>,
    /// 缺省为今天
    pub date: Option<NaiveDate>,
}

/// 榜单名次历史的写入端：只有这里会修改历史
#[derive(Clone)]
pub struct RankHistoryService {
    repository: Arc<dyn RankHistoryRepository>,
    resolver: Arc<SongIdentityResolver>,
}

impl RankHistoryService {
    pub fn new(
        repository: Arc<dyn RankHistoryRepository>,
        resolver: Arc<SongIdentityResolver>,
    ) -> Self {
        Self {
            repository,
            resolver,
        }
    }

    /// 生成快照并完整替换同一 (chart_type, date) 的旧快照。
    /// 不合法的条目被跳过并记录警告；持久化失败直接返回给调用方。
    pub async fn record_snapshot(&self, cmd: RecordSnapshotCmd) -> Result<ChartSnapshot, AppError> {
        let date = cmd.date.unwrap_or_else(today);
        let mut snapshot = ChartSnapshot::new(cmd.chart_type.clone(), date);
        let mut skipped = 0usize;

        for entry in cmd.entries {
            if let Err(e) = entry.validate() {
                warn!("Skipping snapshot entry for {}: {}", cmd.chart_type, e);
                skipped += 1;
                continue;
            }
            let key = self.resolver.key(&entry.title, &entry.artist);
            let rank = entry.rank;
            if !snapshot.insert(key.clone(), entry) {
                warn!(
                    "Duplicate song {} at rank {} in {} snapshot, keeping the first entry",
                    key, rank, cmd.chart_type
                );
                skipped += 1;
            }
        }

        self.repository.save_snapshot(&snapshot).await?;

        info!(
            "Recorded snapshot for {} on {}: {} songs ({} skipped)",
            snapshot.chart_type,
            snapshot.date,
            snapshot.len(),
            skipped
        );
        Ok(snapshot)
    }

    /// chart_type 为 None 时清空全部历史
    pub async fn clear_history(&self, chart_type: Option<&ChartType>) -> Result<(), AppError> {
        match chart_type {
            Some(chart_type) => {
                self.repository.delete_chart_type(chart_type).await?;
                info!("Cleared rank history for {}", chart_type);
            }
            None => {
                self.repository.truncate().await?;
                info!("Cleared all rank history");
            }
        }
        Ok(())
    }
}
