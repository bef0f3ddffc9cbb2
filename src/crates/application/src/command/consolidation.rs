use crate::command::song_identity::{CanonicalName, SongIdentityResolver};
use crate::error::AppError;
use domain::chart::{ConsolidatedSong, PlatformRank, RankedSong};
use domain::observation::PlatformObservation;
use domain::value::SongKey;
use indexmap::IndexMap;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::sync::Arc;

/// 未配置权重的平台使用的默认权重
pub const DEFAULT_PLATFORM_WEIGHT: f64 = 1.0;

/// 平台名 -> 有序的榜单记录；遍历顺序即输入顺序，决定并列时的先后
pub type PlatformCharts = IndexMap<String, Vec<PlatformObservation>>;

#[derive(Debug, Clone)]
pub struct RankingConfig {
    pub platform_weights: HashMap<String, f64>,
    /// 仅用于分数归一化，与平台实际提供多少条无关
    pub max_position_norm: u32,
    pub top_k: usize,
    /// 超过 max_position_norm + 1 的名次贡献为负；开启后截断为 0
    pub clamp_negative_contributions: bool,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            platform_weights: HashMap::new(),
            max_position_norm: 50,
            top_k: 25,
            clamp_negative_contributions: false,
        }
    }
}

struct SongGroup {
    name: CanonicalName,
    platform_ranks: Vec<PlatformRank>,
    score: f64,
}

pub struct ConsolidationEngine {
    resolver: Arc<SongIdentityResolver>,
    config: RankingConfig,
}

impl ConsolidationEngine {
    pub fn new(resolver: Arc<SongIdentityResolver>, config: RankingConfig) -> Result<Self, AppError> {
        if config.max_position_norm == 0 {
            return Err(AppError::InvalidInput(
                "max_position_norm must be greater than 0".to_string(),
            ));
        }
        Ok(Self { resolver, config })
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    pub fn weight_for(&self, platform: &str) -> f64 {
        self.config
            .platform_weights
            .get(platform)
            .copied()
            .unwrap_or(DEFAULT_PLATFORM_WEIGHT)
    }

    /// (max_position_norm - position + 1) / max_position_norm
    /// 第 1 名为 1.0，名次超过 max_position_norm + 1 时为负
    pub fn position_score(&self, position: u32) -> f64 {
        let norm = f64::from(self.config.max_position_norm);
        (norm - f64::from(position) + 1.0) / norm
    }

    pub fn contribution(&self, platform: &str, position: u32) -> f64 {
        let contribution = self.weight_for(platform) * self.position_score(position);
        if self.config.clamp_negative_contributions && contribution < 0.0 {
            0.0
        } else {
            contribution
        }
    }

    pub fn consolidate(&self, charts: &PlatformCharts) -> Vec<RankedSong> {
        self.consolidate_with_tiebreak(charts, &HashMap::new())
    }

    /// 合并各平台榜单为 Top-K。
    /// 排序：score 降序，platforms_count 降序，external_tiebreak 降序；
    /// 仍然并列时保持首次出现的顺序（稳定排序）。
    pub fn consolidate_with_tiebreak(
        &self,
        charts: &PlatformCharts,
        external_tiebreak: &HashMap<SongKey, u64>,
    ) -> Vec<RankedSong> {
        let mut groups: IndexMap<SongKey, SongGroup> = IndexMap::new();

        for (platform, observations) in charts {
            if observations.is_empty() {
                debug!("Platform {} contributed no songs, skipping", platform);
                continue;
            }
            info!("Adding {} songs from {}", observations.len(), platform);
            let weight = self.weight_for(platform);

            for observation in observations {
                if observation.platform() != platform {
                    warn!(
                        "Observation tagged {} listed under platform {}, using {}",
                        observation.platform(),
                        platform,
                        platform
                    );
                }
                let key = self.resolver.key(observation.title(), observation.artist());
                let group = groups.entry(key.clone()).or_insert_with(|| SongGroup {
                    name: CanonicalName::new(observation.title(), observation.artist(), weight),
                    platform_ranks: Vec::new(),
                    score: 0.0,
                });

                // 同一平台重复列出同一首歌：保留先出现（名次更靠前）的一条
                if group.platform_ranks.iter().any(|p| &p.platform == platform) {
                    warn!(
                        "Duplicate entry for {} on {} at position {}, keeping the first one",
                        key,
                        platform,
                        observation.position()
                    );
                    continue;
                }

                group.platform_ranks.push(PlatformRank {
                    platform: platform.clone(),
                    rank: observation.position(),
                    weight,
                });
                group.score += self.contribution(platform, observation.position());
                group.name = self.resolver.canonical_name(
                    &group.name,
                    observation.title(),
                    observation.artist(),
                    weight,
                );
            }
        }

        info!("Total unique songs found: {}", groups.len());

        let mut songs: Vec<ConsolidatedSong> = groups
            .into_iter()
            .map(|(song_key, group)| {
                let external_tiebreak = external_tiebreak.get(&song_key).copied().unwrap_or(0);
                ConsolidatedSong {
                    platforms_count: group.platform_ranks.len(),
                    canonical_title: group.name.title,
                    canonical_artist: group.name.artist,
                    score: group.score,
                    platform_ranks: group.platform_ranks,
                    external_tiebreak,
                    song_key,
                }
            })
            .collect();

        songs.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| b.platforms_count.cmp(&a.platforms_count))
                .then_with(|| b.external_tiebreak.cmp(&a.external_tiebreak))
        });
        songs.truncate(self.config.top_k);

        songs
            .into_iter()
            .enumerate()
            .map(|(i, song)| RankedSong {
                rank: i as u32 + 1,
                song,
            })
            .collect()
    }
}
