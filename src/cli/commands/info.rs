//! Work-details command handler.

use super::open_store;
use crate::config::Config;
use crate::services::CatalogService;

pub async fn cmd_info(config: &Config, id: &str) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    let catalog = CatalogService::new(store.clone());

    let Some(work) = catalog.get_work(id).await? else {
        println!("Work with ID {id} not found.");
        return Ok(());
    };

    println!("Work Info");
    println!("{:-<70}", "");
    println!("Title:    {}", work.title);
    println!("ID:       {}", work.id);
    println!("Type:     {} | Status: {}", work.kind, work.status);
    if let Some(year) = work.year {
        println!("Year:     {year}");
    }
    if let Some(rating) = work.rating {
        println!("Rating:   {rating}/10");
    }
    if let Some(source) = &work.source {
        println!("Source:   {source}");
    }
    if let Some(note) = &work.note {
        println!("Note:     {note}");
    }
    if let Some(review) = &work.review {
        println!("Review:   {review}");
    }
    println!("Added:    {}", work.date_added);
    if let Some(updated) = &work.date_updated {
        println!("Updated:  {updated}");
    }

    if !work.tag_ids.is_empty() {
        let tags = store.all_tags().await;
        let names: Vec<&str> = tags
            .iter()
            .filter(|t| work.tag_ids.contains(&t.id))
            .map(|t| t.name.as_str())
            .collect();
        println!("Tags:     {}", names.join(", "));
    }

    if work.episodes.is_empty() {
        println!();
        println!("No episodes tracked.");
    } else {
        println!();
        println!("Episodes ({}):", work.episodes.len());
        for episode in &work.episodes {
            let status_icon = if episode.watched { "✓" } else { "○" };
            let title = episode.title.as_deref().unwrap_or("");
            println!(
                "{} S{:02}E{:02} {} {}",
                status_icon, episode.season, episode.number, episode.kind, title
            );
        }
        println!();
        println!("Legend: ✓ Watched | ○ Unwatched");
    }

    Ok(())
}
