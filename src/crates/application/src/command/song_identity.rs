use domain::value::SongKey;
use std::sync::Arc;

/// 文本规范化：相同输入在任何进程、任何一次运行中都必须得到相同输出
pub trait SongNameNormalizer: Send + Sync {
    fn normalize(&self, text: &str) -> String;
}

/// 歌曲的展示名称及其来源平台的权重
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalName {
    pub title: String,
    pub artist: String,
    pub weight: f64,
}

impl CanonicalName {
    pub fn new(title: impl Into<String>, artist: impl Into<String>, weight: f64) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            weight,
        }
    }
}

#[derive(Clone)]
pub struct SongIdentityResolver {
    normalizer: Arc<dyn SongNameNormalizer>,
}

impl SongIdentityResolver {
    pub fn new(normalizer: Arc<dyn SongNameNormalizer>) -> Self {
        Self { normalizer }
    }

    pub fn normalize(&self, text: &str) -> String {
        self.normalizer.normalize(text)
    }

    /// 跨平台匹配、历史快照、名次变化共用的唯一身份键
    pub fn key(&self, title: &str, artist: &str) -> SongKey {
        SongKey::from(format!(
            "{}|{}",
            self.normalizer.normalize(title),
            self.normalizer.normalize(artist)
        ))
    }

    /// 保留权重最高的平台提供的名称；权重相同时保留先出现的
    pub fn canonical_name(
        &self,
        existing: &CanonicalName,
        candidate_title: &str,
        candidate_artist: &str,
        candidate_platform_weight: f64,
    ) -> CanonicalName {
        if candidate_platform_weight > existing.weight {
            CanonicalName::new(candidate_title, candidate_artist, candidate_platform_weight)
        } else {
            existing.clone()
        }
    }
}
