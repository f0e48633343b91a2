//! One-time transfer from the legacy flat store into the indexed store.
//!
//! The legacy generation kept two named slots - a works document and a tags
//! document - as JSON files in a data directory. Migration replays every
//! record through the normal catalog create path, so identity assignment and
//! the duplicate guard apply uniformly; the legacy data is never deleted
//! automatically.

use crate::constants::legacy;
use crate::db::Store;
use crate::models::{TagCreate, WorkCreate};
use crate::services::catalog::CatalogService;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// The pre-indexed flat store. Read-only from the core's perspective, apart
/// from the explicit post-migration `clear`.
pub struct LegacyStore {
    dir: PathBuf,
}

impl LegacyStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn works_path(&self) -> PathBuf {
        self.dir.join(legacy::WORKS_FILE)
    }

    fn tags_path(&self) -> PathBuf {
        self.dir.join(legacy::TAGS_FILE)
    }

    /// True when at least one of the two named slots is present.
    #[must_use]
    pub fn has_data(&self) -> bool {
        self.works_path().exists() || self.tags_path().exists()
    }

    fn read_slot<T: DeserializeOwned>(path: &Path) -> Vec<T> {
        if !path.exists() {
            return Vec::new();
        }
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                error!("Failed to read legacy slot {}: {e}", path.display());
                return Vec::new();
            }
        };
        match serde_json::from_str(&content) {
            Ok(records) => records,
            Err(e) => {
                error!("Failed to parse legacy slot {}: {e}", path.display());
                Vec::new()
            }
        }
    }

    /// Loads both slots; unreadable or malformed documents degrade to empty
    /// lists.
    #[must_use]
    pub fn load(&self) -> (Vec<WorkCreate>, Vec<TagCreate>) {
        (
            Self::read_slot(&self.works_path()),
            Self::read_slot(&self.tags_path()),
        )
    }

    /// Removes both slots. An explicit follow-up step after migration, never
    /// invoked by the migration itself.
    pub fn clear(&self) {
        for path in [self.works_path(), self.tags_path()] {
            match std::fs::remove_file(&path) {
                Ok(()) => info!("Removed legacy slot {}", path.display()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => error!("Failed to remove legacy slot {}: {e}", path.display()),
            }
        }
    }
}

/// Current migration state, computed fresh on every check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationStatus {
    /// A legacy slot exists and the indexed collections are both empty.
    NeedsMigration,
    /// Covers "already migrated", "fresh install", and "indexed store
    /// populated by other means".
    NoMigrationNeeded,
}

/// Outcome of a migration attempt. Partial success is reported, never
/// raised as an error.
#[derive(Debug, Clone)]
pub struct MigrationOutcome {
    pub performed: bool,
    pub message: String,
    pub migrated_works: usize,
    pub migrated_tags: usize,
}

impl MigrationOutcome {
    fn skipped(message: impl Into<String>) -> Self {
        Self {
            performed: false,
            message: message.into(),
            migrated_works: 0,
            migrated_tags: 0,
        }
    }
}

pub struct MigrationService {
    store: Store,
    catalog: CatalogService,
    legacy: LegacyStore,
}

impl MigrationService {
    #[must_use]
    pub fn new(store: Store, legacy: LegacyStore) -> Self {
        let catalog = CatalogService::new(store.clone());
        Self {
            store,
            catalog,
            legacy,
        }
    }

    async fn store_has_data(&self) -> Option<bool> {
        let works = self.store.count_works().await;
        let tags = self.store.count_tags().await;
        match (works, tags) {
            (Ok(works), Ok(tags)) => Some(works > 0 || tags > 0),
            (Err(e), _) | (_, Err(e)) => {
                error!("Failed to inspect indexed store: {e:#}");
                None
            }
        }
    }

    /// No state is persisted; both sides are inspected on every call. When
    /// the indexed store cannot be inspected, migration is not attempted.
    pub async fn check(&self) -> MigrationStatus {
        if !self.legacy.has_data() {
            return MigrationStatus::NoMigrationNeeded;
        }
        match self.store_has_data().await {
            Some(false) => MigrationStatus::NeedsMigration,
            Some(true) | None => MigrationStatus::NoMigrationNeeded,
        }
    }

    /// Transfers every legacy record through the catalog create path.
    /// Re-checks indexed-store emptiness immediately before writing; records
    /// that appeared in between abort the run with a non-fatal outcome.
    /// Per-record failures are logged and skipped.
    pub async fn migrate(&self) -> MigrationOutcome {
        match self.store_has_data().await {
            Some(false) => {}
            Some(true) => {
                return MigrationOutcome::skipped(
                    "Indexed store already has data; migration skipped",
                );
            }
            None => {
                return MigrationOutcome::skipped("Indexed store is not inspectable");
            }
        }

        let (works, tags) = self.legacy.load();
        if works.is_empty() && tags.is_empty() {
            return MigrationOutcome::skipped("No legacy data to migrate");
        }

        let mut migrated_works = 0usize;
        for mut work in works {
            // Tag references are not carried over: tag identities are
            // reassigned on their way into the indexed store.
            work.tag_ids.clear();
            let title = work.title.clone();
            match self.catalog.create_work(work).await {
                Ok(_) => migrated_works += 1,
                Err(e) => warn!("Skipping legacy work \"{title}\": {e}"),
            }
        }

        let mut migrated_tags = 0usize;
        for tag in tags {
            let name = tag.name.clone();
            match self.store.create_tag(tag).await {
                Ok(_) => migrated_tags += 1,
                Err(e) => warn!("Skipping legacy tag \"{name}\": {e:#}"),
            }
        }

        info!(
            "Migration complete: {} works, {} tags",
            migrated_works, migrated_tags
        );

        MigrationOutcome {
            performed: true,
            message: format!(
                "Migrated {migrated_works} works and {migrated_tags} tags from the legacy store"
            ),
            migrated_works,
            migrated_tags,
        }
    }
}
