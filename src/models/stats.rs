use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregate counts over the whole work collection, consumed by display
/// components as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total_works: usize,
    pub type_stats: BTreeMap<String, usize>,
    pub status_stats: BTreeMap<String, usize>,
    pub year_stats: BTreeMap<String, usize>,
    pub episode_stats: EpisodeStats,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EpisodeStats {
    pub total_episodes: usize,
    pub watched_episodes: usize,
    /// round(watched / total * 100); 0 when there are no episodes.
    pub completion_rate: u32,
}
