//! Snapshot construction, the two backup codecs, validation, and restore.
//!
//! The primary format is a structural JSON encoding of [`BackupSnapshot`]
//! with exact round-trip fidelity. The secondary format is the tabular
//! layout implemented in [`crate::services::table`]. Validation runs before
//! any restore touches the store.

use crate::constants::{BACKUP_VERSION, backup as backup_consts};
use crate::db::Store;
use crate::models::{BackupSnapshot, SnapshotMetadata};
use crate::services::table;
use chrono::Utc;
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum BackupError {
    #[error("Invalid backup format: {0}")]
    InvalidFormat(String),

    #[error("Auto backup for {0} not found")]
    SnapshotNotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("File error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<anyhow::Error> for BackupError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Serialization format of an exported or imported backup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupFormat {
    Json,
    Csv,
}

impl BackupFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }

    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Json => backup_consts::JSON_MIME,
            Self::Csv => backup_consts::CSV_MIME,
        }
    }

    /// Dispatches on the file extension; anything but `.json`/`.csv` is
    /// unsupported.
    pub fn from_path(path: &Path) -> Result<Self, BackupError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("csv") => Ok(Self::Csv),
            _ => Err(BackupError::InvalidFormat(format!(
                "unsupported file extension: {}",
                path.display()
            ))),
        }
    }
}

/// Counts shown alongside the last-backup timestamp in status output.
#[derive(Debug, Clone)]
pub struct DatabaseInfo {
    pub works_count: u64,
    pub tags_count: u64,
    pub total_episodes: usize,
    pub watched_episodes: usize,
    pub completion_rate: f64,
    pub last_backup: Option<String>,
}

pub struct BackupService {
    store: Store,
}

impl BackupService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// Builds a full point-in-time snapshot from the live store.
    pub async fn create_snapshot(&self) -> BackupSnapshot {
        let works = self.store.all_works().await;
        let tags = self.store.all_tags().await;
        let metadata = SnapshotMetadata::derive(&works, &tags);

        BackupSnapshot {
            version: BACKUP_VERSION.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            works,
            tags,
            metadata,
        }
    }

    pub fn serialize(
        &self,
        snapshot: &BackupSnapshot,
        format: BackupFormat,
    ) -> Result<String, BackupError> {
        match format {
            BackupFormat::Json => serde_json::to_string_pretty(snapshot)
                .map_err(|e| BackupError::InvalidFormat(e.to_string())),
            BackupFormat::Csv => Ok(table::to_table(snapshot)),
        }
    }

    /// Parses either format and validates the result; nothing is written to
    /// the store here.
    pub fn parse(
        &self,
        content: &str,
        format: BackupFormat,
    ) -> Result<BackupSnapshot, BackupError> {
        let snapshot = match format {
            BackupFormat::Json => Self::parse_json(content)?,
            BackupFormat::Csv => table::from_table(content)?,
        };
        Self::validate(&snapshot)?;
        Ok(snapshot)
    }

    fn parse_json(content: &str) -> Result<BackupSnapshot, BackupError> {
        let value: Value = serde_json::from_str(content)
            .map_err(|e| BackupError::InvalidFormat(format!("not valid JSON: {e}")))?;

        let Value::Object(ref fields) = value else {
            return Err(BackupError::InvalidFormat(
                "backup payload is not an object".to_string(),
            ));
        };

        if !fields.contains_key("version") || !fields.contains_key("timestamp") {
            return Err(BackupError::InvalidFormat(
                "backup is missing its version or timestamp".to_string(),
            ));
        }

        let works_are_list = fields.get("works").is_some_and(Value::is_array);
        let tags_are_list = fields.get("tags").is_some_and(Value::is_array);
        if !works_are_list || !tags_are_list {
            return Err(BackupError::InvalidFormat(
                "backup is missing its works or tags list".to_string(),
            ));
        }

        serde_json::from_value(value)
            .map_err(|e| BackupError::InvalidFormat(format!("malformed backup record: {e}")))
    }

    /// Structural checks that gate a restore. A version mismatch is a
    /// warning, not a rejection.
    pub fn validate(snapshot: &BackupSnapshot) -> Result<(), BackupError> {
        if snapshot.version.is_empty() || snapshot.timestamp.is_empty() {
            return Err(BackupError::InvalidFormat(
                "backup is missing its version or timestamp".to_string(),
            ));
        }

        if snapshot.version != BACKUP_VERSION {
            warn!(
                "Backup version {} differs from current version {}",
                snapshot.version, BACKUP_VERSION
            );
        }

        Ok(())
    }

    /// Replaces the store content with the snapshot. Tags are written before
    /// works because works hold tag references. Each bulk write is atomic on
    /// its own; there is no cross-collection transaction, so a failure
    /// between the two writes leaves a mixed dataset.
    pub async fn restore(&self, snapshot: &BackupSnapshot) -> Result<(), BackupError> {
        Self::validate(snapshot)?;

        self.store.set_all_tags(&snapshot.tags).await?;
        self.store.set_all_works(&snapshot.works).await?;

        info!(
            "Restored backup from {} ({} works, {} tags)",
            snapshot.timestamp,
            snapshot.works.len(),
            snapshot.tags.len()
        );
        Ok(())
    }

    /// Exports a fresh snapshot to `<dir>/watchvault-backup-<date>.<ext>`.
    pub async fn export_to_file(
        &self,
        dir: &Path,
        format: BackupFormat,
    ) -> Result<PathBuf, BackupError> {
        let snapshot = self.create_snapshot().await;
        let content = self.serialize(&snapshot, format)?;

        let date = Utc::now().format("%Y-%m-%d");
        let filename = format!(
            "{}-{}.{}",
            backup_consts::EXPORT_FILE_STEM,
            date,
            format.extension()
        );
        let path = dir.join(filename);

        if !dir.as_os_str().is_empty() {
            tokio::fs::create_dir_all(dir).await?;
        }
        tokio::fs::write(&path, content).await?;

        info!("Exported backup to {}", path.display());
        Ok(path)
    }

    /// Reads the whole file into memory, then parses and validates it.
    pub async fn import_from_file(&self, path: &Path) -> Result<BackupSnapshot, BackupError> {
        let format = BackupFormat::from_path(path)?;
        let content = tokio::fs::read_to_string(path).await?;
        self.parse(&content, format)
    }

    pub async fn database_info(&self) -> Result<DatabaseInfo, BackupError> {
        let works = self.store.all_works().await;
        let tags = self.store.all_tags().await;
        let metadata = SnapshotMetadata::derive(&works, &tags);
        let last_backup = self
            .store
            .get_setting(crate::constants::archive::LAST_BACKUP_KEY)
            .await?;

        Ok(DatabaseInfo {
            works_count: works.len() as u64,
            tags_count: tags.len() as u64,
            total_episodes: metadata.total_episodes,
            watched_episodes: metadata.watched_episodes,
            completion_rate: metadata.completion_rate,
            last_backup,
        })
    }
}
