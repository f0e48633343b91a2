//! List-works command handler.

use super::open_store;
use crate::config::Config;
use crate::models::WorkQuery;
use crate::services::CatalogService;

#[allow(clippy::too_many_arguments)]
pub async fn cmd_list(
    config: &Config,
    title: Option<String>,
    kind: Option<&str>,
    status: Option<&str>,
    year: Option<i32>,
    tag: Option<i32>,
    page: Option<usize>,
    size: Option<usize>,
) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    let catalog = CatalogService::new(store);

    let query = WorkQuery {
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
        tag_ids: tag.into_iter().collect(),
        page,
        size,
    };

    let page = catalog.list_works(query).await?;

    if page.works.is_empty() {
        println!("No works found.");
        println!();
        println!("Add one with: watchvault add \"<title>\"");
        return Ok(());
    }

    println!(
        "Works ({} total, page {} of {})",
        page.total,
        page.page,
        page.total.div_ceil(page.size).max(1)
    );
    println!("{:-<70}", "");

    for work in &page.works {
        let watched = work.episodes.iter().filter(|e| e.watched).count();
        let progress = if work.episodes.is_empty() {
            String::new()
        } else {
            format!(" [{}/{} eps]", watched, work.episodes.len())
        };
        let year = work.year.map(|y| format!(" ({y})")).unwrap_or_default();

        println!("• {}{}{}", work.title, year, progress);
        println!(
            "  ID: {} | Type: {} | Status: {}",
            work.id, work.kind, work.status
        );
    }

    Ok(())
}
