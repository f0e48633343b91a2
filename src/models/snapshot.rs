use super::{Tag, Work};
use serde::{Deserialize, Serialize};

/// A full, point-in-time copy of the work and tag collections plus derived
/// metadata. Built on demand at export time; immutable; holds no reference
/// back to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupSnapshot {
    pub version: String,
    pub timestamp: String,
    pub works: Vec<Work>,
    pub tags: Vec<Tag>,
    pub metadata: SnapshotMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotMetadata {
    pub total_works: usize,
    pub total_tags: usize,
    pub total_episodes: usize,
    pub watched_episodes: usize,
    /// Percentage rounded to two decimals; 0 when there are no episodes.
    pub completion_rate: f64,
}

impl SnapshotMetadata {
    /// Derives the metadata block from the snapshot content.
    #[must_use]
    pub fn derive(works: &[Work], tags: &[Tag]) -> Self {
        let total_episodes: usize = works.iter().map(|w| w.episodes.len()).sum();
        let watched_episodes: usize = works
            .iter()
            .map(|w| w.episodes.iter().filter(|e| e.watched).count())
            .sum();

        let completion_rate = if total_episodes > 0 {
            let raw = watched_episodes as f64 / total_episodes as f64 * 100.0;
            (raw * 100.0).round() / 100.0
        } else {
            0.0
        };

        Self {
            total_works: works.len(),
            total_tags: tags.len(),
            total_episodes,
            watched_episodes,
            completion_rate,
        }
    }
}
