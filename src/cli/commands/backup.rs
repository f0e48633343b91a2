//! Export, import, and auto-backup archive command handlers.

use super::{confirm, open_store};
use crate::config::Config;
use crate::services::{AutoBackupService, BackupFormat, BackupService};
use std::path::Path;

pub async fn cmd_export(config: &Config, format_str: &str) -> anyhow::Result<()> {
    let format = match format_str {
        "json" => BackupFormat::Json,
        "csv" => BackupFormat::Csv,
        other => {
            println!("Unknown export format: {other} (use json or csv)");
            return Ok(());
        }
    };

    let store = open_store(config).await?;
    let backup = BackupService::new(store);

    let path = backup
        .export_to_file(Path::new(&config.backup.export_dir), format)
        .await?;

    println!("✓ Exported backup to {}", path.display());
    println!("  Format: {}", format.mime_type());
    Ok(())
}

pub async fn cmd_import(config: &Config, path_str: &str) -> anyhow::Result<()> {
    let path = Path::new(path_str);

    let store = open_store(config).await?;
    let backup = BackupService::new(store);

    let snapshot = match backup.import_from_file(path).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            println!("✗ {e}");
            return Ok(());
        }
    };

    println!(
        "Backup from {} (version {})",
        snapshot.timestamp, snapshot.version
    );
    println!(
        "  {} works, {} tags, {} episodes",
        snapshot.metadata.total_works,
        snapshot.metadata.total_tags,
        snapshot.metadata.total_episodes
    );

    if confirm("Restoring replaces the entire collection. Continue?")? {
        backup.restore(&snapshot).await?;
        println!("✓ Backup restored.");
    } else {
        println!("Cancelled.");
    }

    Ok(())
}

pub async fn cmd_backup_now(config: &Config) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    let auto_backup = AutoBackupService::new(store);

    let date = auto_backup.snapshot().await?;
    println!("✓ Auto backup stored for {date}");

    let retained = auto_backup.list().await?;
    println!("  Retained snapshots: {}", retained.len());
    Ok(())
}

pub async fn cmd_backup_list(config: &Config) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    let auto_backup = AutoBackupService::new(store);

    let entries = auto_backup.list().await?;

    if entries.is_empty() {
        println!("No auto backups retained.");
        println!();
        println!("Create one with: watchvault backup now");
        return Ok(());
    }

    println!("Auto Backups ({} retained)", entries.len());
    println!("{:-<40}", "");
    for entry in entries {
        println!("{}  {} bytes", entry.date, entry.size);
    }

    if let Some(when) = auto_backup.last_backup().await? {
        println!();
        println!("Last backup: {when}");
    }

    Ok(())
}

pub async fn cmd_backup_restore(config: &Config, date: &str) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    let auto_backup = AutoBackupService::new(store);

    if !confirm(&format!(
        "Restore the auto backup from {date}? This replaces the entire collection."
    ))? {
        println!("Cancelled.");
        return Ok(());
    }

    match auto_backup.restore(date).await {
        Ok(snapshot) => {
            println!(
                "✓ Restored snapshot from {} ({} works, {} tags)",
                date,
                snapshot.works.len(),
                snapshot.tags.len()
            );
        }
        Err(e) => println!("✗ {e}"),
    }

    Ok(())
}
