//! Periodic snapshotting into a date-keyed side archive with bounded
//! retention and named-slot restore.

use crate::constants::archive;
use crate::db::Store;
use crate::models::BackupSnapshot;
use crate::services::backup::{BackupError, BackupFormat, BackupService};
use chrono::Utc;
use tracing::{info, warn};

/// One retained slot, as reported by `list`.
#[derive(Debug, Clone)]
pub struct AutoBackupEntry {
    pub date: String,
    /// Raw payload size in bytes.
    pub size: usize,
}

pub struct AutoBackupService {
    store: Store,
    backup: BackupService,
}

impl AutoBackupService {
    #[must_use]
    pub fn new(store: Store) -> Self {
        let backup = BackupService::new(store.clone());
        Self { store, backup }
    }

    /// Snapshots under today's date key, records the last-backup timestamp,
    /// then prunes the archive down to the retention bound.
    pub async fn snapshot(&self) -> Result<String, BackupError> {
        let date = Utc::now().format("%Y-%m-%d").to_string();
        self.snapshot_on(&date).await?;
        Ok(date)
    }

    /// Same-day snapshots overwrite their slot: one snapshot per date key.
    pub async fn snapshot_on(&self, date: &str) -> Result<BackupSnapshot, BackupError> {
        let snapshot = self.backup.create_snapshot().await;
        let payload = self.backup.serialize(&snapshot, BackupFormat::Json)?;

        let slot_key = format!("{}{}", archive::SLOT_PREFIX, date);
        self.store
            .put_archive_slot(&slot_key, &payload, &snapshot.timestamp)
            .await?;
        self.store
            .set_setting(archive::LAST_BACKUP_KEY, &Utc::now().to_rfc3339())
            .await?;

        info!(
            "Auto backup stored under {} ({} works, {} tags)",
            slot_key,
            snapshot.works.len(),
            snapshot.tags.len()
        );

        self.prune().await?;
        Ok(snapshot)
    }

    /// Keeps the newest slots by date-key string order, deletes the rest.
    async fn prune(&self) -> Result<(), BackupError> {
        let slots = self.store.list_archive_slots().await?;

        for slot in slots.iter().skip(archive::RETAINED_SNAPSHOTS) {
            if self.store.delete_archive_slot(&slot.slot_key).await? {
                info!("Pruned auto backup {}", slot.slot_key);
            }
        }
        Ok(())
    }

    /// Restores the snapshot stored under the given date key via the backup
    /// codec's restore path.
    pub async fn restore(&self, date: &str) -> Result<BackupSnapshot, BackupError> {
        let slot_key = format!("{}{}", archive::SLOT_PREFIX, date);

        let Some(slot) = self.store.get_archive_slot(&slot_key).await? else {
            return Err(BackupError::SnapshotNotFound(date.to_string()));
        };

        let snapshot = self.backup.parse(&slot.payload, BackupFormat::Json)?;
        self.backup.restore(&snapshot).await?;
        Ok(snapshot)
    }

    /// Every retained slot's date key and raw byte size, newest first.
    pub async fn list(&self) -> Result<Vec<AutoBackupEntry>, BackupError> {
        let slots = self.store.list_archive_slots().await?;

        Ok(slots
            .into_iter()
            .map(|slot| {
                let date = slot
                    .slot_key
                    .strip_prefix(archive::SLOT_PREFIX)
                    .map_or_else(
                        || {
                            warn!("Archive slot with unexpected key: {}", slot.slot_key);
                            slot.slot_key.clone()
                        },
                        ToString::to_string,
                    );
                AutoBackupEntry {
                    date,
                    size: slot.payload.len(),
                }
            })
            .collect())
    }

    pub async fn last_backup(&self) -> Result<Option<String>, BackupError> {
        Ok(self.store.get_setting(archive::LAST_BACKUP_KEY).await?)
    }
}
