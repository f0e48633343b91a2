use crate::models::{EpisodeStats, Stats, Work};

/// Aggregates collection counts and episode totals from a full work scan.
///
/// Pure and side-effect free; callers run it on demand against a fresh read
/// after each mutation instead of caching the result anywhere.
#[must_use]
pub fn compute_stats(works: &[Work]) -> Stats {
    let mut stats = Stats {
        total_works: works.len(),
        ..Stats::default()
    };

    let mut total_episodes = 0usize;
    let mut watched_episodes = 0usize;

    for work in works {
        *stats.type_stats.entry(work.kind.to_string()).or_default() += 1;
        *stats
            .status_stats
            .entry(work.status.to_string())
            .or_default() += 1;

        let year_key = work
            .year
            .map_or_else(|| "unknown".to_string(), |y| y.to_string());
        *stats.year_stats.entry(year_key).or_default() += 1;

        total_episodes += work.episodes.len();
        watched_episodes += work.episodes.iter().filter(|e| e.watched).count();
    }

    let completion_rate = if total_episodes > 0 {
        (watched_episodes as f64 / total_episodes as f64 * 100.0).round() as u32
    } else {
        0
    };

    stats.episode_stats = EpisodeStats {
        total_episodes,
        watched_episodes,
        completion_rate,
    };
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Episode, WorkKind, WorkStatus};

    fn work(kind: WorkKind, status: WorkStatus, year: Option<i32>, episodes: Vec<Episode>) -> Work {
        Work {
            id: uuid::Uuid::new_v4().to_string(),
            title: "t".to_string(),
            kind,
            status,
            year,
            rating: None,
            review: None,
            note: None,
            source: None,
            reminder_enabled: false,
            reminder_frequency: None,
            tag_ids: Vec::new(),
            episodes,
            date_added: "2024-01-01T00:00:00Z".to_string(),
            date_updated: None,
        }
    }

    fn episode(number: i32, watched: bool) -> Episode {
        Episode {
            id: format!("ep-{number}"),
            number,
            season: 1,
            kind: "episode".to_string(),
            watched,
            date_watched: None,
            title: None,
            description: None,
            note: None,
        }
    }

    #[test]
    fn empty_collection_yields_zeroes() {
        let stats = compute_stats(&[]);
        assert_eq!(stats.total_works, 0);
        assert_eq!(stats.episode_stats.total_episodes, 0);
        assert_eq!(stats.episode_stats.completion_rate, 0);
    }

    #[test]
    fn counts_by_kind_status_and_year() {
        let works = vec![
            work(WorkKind::Anime, WorkStatus::Ongoing, Some(2023), vec![]),
            work(WorkKind::Anime, WorkStatus::Completed, Some(2023), vec![]),
            work(WorkKind::Novel, WorkStatus::Ongoing, None, vec![]),
        ];
        let stats = compute_stats(&works);

        assert_eq!(stats.total_works, 3);
        assert_eq!(stats.type_stats["anime"], 2);
        assert_eq!(stats.type_stats["novel"], 1);
        assert_eq!(stats.status_stats["ongoing"], 2);
        assert_eq!(stats.year_stats["2023"], 2);
        assert_eq!(stats.year_stats["unknown"], 1);
    }

    #[test]
    fn completion_rate_rounds_to_nearest_percent() {
        let works = vec![work(
            WorkKind::Anime,
            WorkStatus::Ongoing,
            None,
            vec![episode(1, true), episode(2, false), episode(3, false)],
        )];
        let stats = compute_stats(&works);

        assert_eq!(stats.episode_stats.total_episodes, 3);
        assert_eq!(stats.episode_stats.watched_episodes, 1);
        // 1/3 = 33.33..%
        assert_eq!(stats.episode_stats.completion_rate, 33);
    }
}
