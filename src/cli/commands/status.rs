//! Database-status command handler.

use super::open_store;
use crate::config::Config;
use crate::services::{BackupService, LegacyStore, MigrationService, MigrationStatus};

pub async fn cmd_status(config: &Config) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    store.ping().await?;

    let backup = BackupService::new(store.clone());
    let info = backup.database_info().await?;

    println!("Database Status");
    println!("{:-<70}", "");
    println!("Path:      {}", config.general.database_path);
    println!("Works:     {}", info.works_count);
    println!("Tags:      {}", info.tags_count);
    println!(
        "Episodes:  {}/{} watched ({}%)",
        info.watched_episodes, info.total_episodes, info.completion_rate
    );
    match info.last_backup {
        Some(when) => println!("Last auto backup: {when}"),
        None => println!("Last auto backup: never"),
    }

    let legacy = LegacyStore::new(&config.legacy.data_dir);
    let migration = MigrationService::new(store, legacy);
    if migration.check().await == MigrationStatus::NeedsMigration {
        println!();
        println!("Legacy data detected. Run 'watchvault migrate' to import it.");
    }

    Ok(())
}
