//! Mark-episode-watched command handler.

use super::open_store;
use crate::config::Config;
use crate::constants::episode_kinds;
use crate::models::{Episode, WorkUpdate};
use crate::services::CatalogService;
use chrono::Utc;
use uuid::Uuid;

pub async fn cmd_watch(config: &Config, id: &str, number: i32, season: i32) -> anyhow::Result<()> {
    if number < 1 || season < 1 {
        println!("Episode and season numbers start at 1.");
        return Ok(());
    }

    let store = open_store(config).await?;
    let catalog = CatalogService::new(store);

    let Some(work) = catalog.get_work(id).await? else {
        println!("Work with ID {id} not found.");
        return Ok(());
    };

    let mut episodes = work.episodes;
    let now = Utc::now().to_rfc3339();

    match episodes
        .iter_mut()
        .find(|e| e.season == season && e.number == number)
    {
        Some(episode) => {
            episode.watched = true;
            episode.date_watched = Some(now);
        }
        None => episodes.push(Episode {
            id: Uuid::new_v4().to_string(),
            number,
            season,
            kind: episode_kinds::EPISODE.to_string(),
            watched: true,
            date_watched: Some(now),
            title: None,
            description: None,
            note: None,
        }),
    }

    // The store keeps episode lists as given; re-sort after mutating.
    episodes.sort_by_key(|e| (e.season, e.number));

    let patch = WorkUpdate {
        episodes: Some(episodes),
        ..WorkUpdate::default()
    };

    if catalog.update_work(id, patch).await?.is_some() {
        println!(
            "✓ Marked S{season:02}E{number:02} watched for {}",
            work.title
        );
        let stats = catalog.stats().await;
        println!(
            "  Overall progress: {}/{} episodes ({}%)",
            stats.episode_stats.watched_episodes,
            stats.episode_stats.total_episodes,
            stats.episode_stats.completion_rate
        );
    }

    Ok(())
}
