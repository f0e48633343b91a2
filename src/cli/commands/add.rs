//! Add-work command handler.

use super::open_store;
use crate::config::Config;
use crate::models::WorkCreate;
use crate::services::CatalogService;

#[allow(clippy::too_many_arguments)]
pub async fn cmd_add(
    config: &Config,
    title: &str,
    kind: Option<&str>,
    status: Option<&str>,
    year: Option<i32>,
    rating: Option<i32>,
    note: Option<String>,
    source: Option<String>,
) -> anyhow::Result<()> {
    let kind = kind
        .map(str::parse)
        .transpose()
        .map_err(|e: String| anyhow::anyhow!(e))?
        .unwrap_or_default();
    let status = status
        .map(str::parse)
        .transpose()
        .map_err(|e: String| anyhow::anyhow!(e))?
        .unwrap_or_default();

    let data = WorkCreate {
        title: title.to_string(),
        kind,
        status,
        year,
        rating,
        note,
        source,
        ..WorkCreate::default()
    };

    let store = open_store(config).await?;
    let catalog = CatalogService::new(store);

    match catalog.create_work(data).await {
        Ok(work) => {
            println!("✓ Added: {} (ID: {})", work.title, work.id);
            println!("  Type: {} | Status: {}", work.kind, work.status);
            let stats = catalog.stats().await;
            println!("  Collection size: {} works", stats.total_works);
        }
        Err(e) => println!("✗ {e}"),
    }

    Ok(())
}
