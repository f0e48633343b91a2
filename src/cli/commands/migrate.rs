//! Legacy-store migration command handlers.

use super::{confirm, open_store};
use crate::config::Config;
use crate::services::{LegacyStore, MigrationService, MigrationStatus};
use tracing::info;

pub async fn cmd_migrate(config: &Config) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    let legacy = LegacyStore::new(&config.legacy.data_dir);
    let migration = MigrationService::new(store, legacy);

    match migration.check().await {
        MigrationStatus::NoMigrationNeeded => {
            println!("No migration needed.");
            return Ok(());
        }
        MigrationStatus::NeedsMigration => {
            info!("Legacy data found; starting migration");
        }
    }

    let outcome = migration.migrate().await;

    if outcome.performed {
        println!("✓ {}", outcome.message);
        println!();
        println!("Legacy data was kept. After verifying the result, remove it with:");
        println!("  watchvault migrate clear");
    } else {
        println!("{}", outcome.message);
    }

    Ok(())
}

pub async fn cmd_migrate_clear(config: &Config) -> anyhow::Result<()> {
    let legacy = LegacyStore::new(&config.legacy.data_dir);

    if !legacy.has_data() {
        println!("No legacy data present.");
        return Ok(());
    }

    if confirm("Remove the legacy flat-store files? This cannot be undone.")? {
        legacy.clear();
        println!("✓ Legacy data removed.");
    } else {
        println!("Cancelled.");
    }

    Ok(())
}
