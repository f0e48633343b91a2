//! Tag management command handlers.

use super::open_store;
use crate::config::Config;
use crate::models::TagCreate;
use crate::services::CatalogService;

pub async fn cmd_tag_add(config: &Config, name: &str, color: &str) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    let catalog = CatalogService::new(store);

    let tag = catalog
        .create_tag(TagCreate {
            name: name.to_string(),
            color: color.to_string(),
        })
        .await?;

    println!("✓ Added tag #{}: {} ({})", tag.id, tag.name, tag.color);
    Ok(())
}

pub async fn cmd_tag_list(config: &Config) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    let catalog = CatalogService::new(store);

    let tags = catalog.list_tags().await;

    if tags.is_empty() {
        println!("No tags defined.");
        println!();
        println!("Add one with: watchvault tag add <name> <color>");
        return Ok(());
    }

    println!("Tags ({} total)", tags.len());
    println!("{:-<40}", "");
    for tag in tags {
        println!("#{:<4} {} ({})", tag.id, tag.name, tag.color);
    }

    Ok(())
}

pub async fn cmd_tag_remove(config: &Config, id: i32) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    let catalog = CatalogService::new(store);

    if catalog.delete_tag(id).await? {
        println!("✓ Removed tag #{id}");
    } else {
        println!("Tag #{id} not found.");
    }

    Ok(())
}
