//! Update-work command handler.

use super::open_store;
use crate::config::Config;
use crate::models::WorkUpdate;
use crate::services::CatalogService;

#[allow(clippy::too_many_arguments)]
pub async fn cmd_update(
    config: &Config,
    id: &str,
    title: Option<String>,
    kind: Option<&str>,
    status: Option<&str>,
    year: Option<i32>,
    rating: Option<i32>,
    review: Option<String>,
    note: Option<String>,
    source: Option<String>,
) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    let catalog = CatalogService::new(store);

    let patch = WorkUpdate {
        title,
        kind: kind
            .map(str::parse)
            .transpose()
            .map_err(|e: String| anyhow::anyhow!(e))?,
        status: status
            .map(str::parse)
            .transpose()
            .map_err(|e: String| anyhow::anyhow!(e))?,
        year,
        rating,
        review,
        note,
        source,
        ..WorkUpdate::default()
    };

    match catalog.update_work(id, patch).await? {
        Some(work) => {
            println!("✓ Updated: {}", work.title);
            println!("  Type: {} | Status: {}", work.kind, work.status);
        }
        None => println!("Work with ID {id} not found."),
    }

    Ok(())
}
