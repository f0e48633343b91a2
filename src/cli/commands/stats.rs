//! Collection-statistics command handler.

use super::open_store;
use crate::config::Config;
use crate::services::CatalogService;

pub async fn cmd_stats(config: &Config) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    let catalog = CatalogService::new(store);

    let stats = catalog.stats().await;

    println!("Collection Statistics");
    println!("{:-<70}", "");
    println!("Total works: {}", stats.total_works);

    if !stats.type_stats.is_empty() {
        println!();
        println!("By type:");
        for (kind, count) in &stats.type_stats {
            println!("  {kind:<12} {count}");
        }
    }

    if !stats.status_stats.is_empty() {
        println!();
        println!("By status:");
        for (status, count) in &stats.status_stats {
            println!("  {status:<12} {count}");
        }
    }

    if !stats.year_stats.is_empty() {
        println!();
        println!("By year:");
        for (year, count) in &stats.year_stats {
            println!("  {year:<12} {count}");
        }
    }

    println!();
    println!(
        "Episodes: {}/{} watched ({}%)",
        stats.episode_stats.watched_episodes,
        stats.episode_stats.total_episodes,
        stats.episode_stats.completion_rate
    );

    Ok(())
}
