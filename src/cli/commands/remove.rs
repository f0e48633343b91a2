//! Remove-work command handler.

use super::{confirm, open_store};
use crate::config::Config;
use crate::services::CatalogService;

pub async fn cmd_remove(config: &Config, id: &str) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    let catalog = CatalogService::new(store);

    let Some(work) = catalog.get_work(id).await? else {
        println!("Work with ID {id} not found.");
        return Ok(());
    };

    if confirm(&format!("Remove '{}' (ID: {})?", work.title, work.id))? {
        if catalog.delete_work(id).await? {
            println!("✓ Removed: {}", work.title);
        } else {
            println!("Failed to remove work.");
        }
    } else {
        println!("Cancelled.");
    }

    Ok(())
}
