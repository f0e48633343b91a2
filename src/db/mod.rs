use crate::models::{Tag, TagCreate, TagUpdate, Work, WorkKind, WorkStatus, WorkUpdate};
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::{error, info};

pub mod migrator;
pub mod repositories;

pub use repositories::archive::ArchiveSlot;

/// Handle to the indexed entity store.
///
/// Constructed once at process start and passed by reference to every
/// component that needs it; there is no implicit global instance.
/// `connect` is idempotent with respect to schema: tables and indexes are
/// created only if missing, so reconnecting to an existing database is a
/// no-op apart from opening the pool.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn connect(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.starts_with(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn work_repo(&self) -> repositories::work::WorkRepository {
        repositories::work::WorkRepository::new(self.conn.clone())
    }

    fn tag_repo(&self) -> repositories::tag::TagRepository {
        repositories::tag::TagRepository::new(self.conn.clone())
    }

    fn archive_repo(&self) -> repositories::archive::ArchiveRepository {
        repositories::archive::ArchiveRepository::new(self.conn.clone())
    }

    // ========== Works ==========

    /// All works in insertion order. Read failures are logged and degrade to
    /// an empty list: this read backs UI rendering, which must not crash on
    /// a corrupt row.
    pub async fn all_works(&self) -> Vec<Work> {
        match self.work_repo().all().await {
            Ok(works) => works,
            Err(e) => {
                error!("Failed to read works: {e:#}");
                Vec::new()
            }
        }
    }

    pub async fn get_work(&self, id: &str) -> Result<Option<Work>> {
        self.work_repo().get(id).await
    }

    /// First exact title match; read failures degrade to `None`.
    pub async fn find_work_by_title(&self, title: &str) -> Option<Work> {
        match self.work_repo().find_by_title(title).await {
            Ok(found) => found,
            Err(e) => {
                error!("Failed to look up work by title: {e:#}");
                None
            }
        }
    }

    pub async fn filter_works(
        &self,
        kind: Option<WorkKind>,
        status: Option<WorkStatus>,
        year: Option<i32>,
    ) -> Result<Vec<Work>> {
        self.work_repo().filter(kind, status, year).await
    }

    pub async fn insert_work(&self, work: &Work) -> Result<()> {
        self.work_repo().insert(work).await
    }

    pub async fn update_work(&self, id: &str, patch: WorkUpdate) -> Result<Option<Work>> {
        self.work_repo().update(id, patch).await
    }

    pub async fn delete_work(&self, id: &str) -> Result<bool> {
        self.work_repo().remove(id).await
    }

    pub async fn set_all_works(&self, records: &[Work]) -> Result<()> {
        self.work_repo().set_all(records).await
    }

    pub async fn count_works(&self) -> Result<u64> {
        self.work_repo().count().await
    }

    // ========== Tags ==========

    /// All tags in insertion (id) order; degrades to empty on read failure.
    pub async fn all_tags(&self) -> Vec<Tag> {
        match self.tag_repo().all().await {
            Ok(tags) => tags,
            Err(e) => {
                error!("Failed to read tags: {e:#}");
                Vec::new()
            }
        }
    }

    pub async fn get_tag(&self, id: i32) -> Result<Option<Tag>> {
        self.tag_repo().get(id).await
    }

    /// First exact name match; read failures degrade to `None`.
    pub async fn find_tag_by_name(&self, name: &str) -> Option<Tag> {
        match self.tag_repo().find_by_name(name).await {
            Ok(found) => found,
            Err(e) => {
                error!("Failed to look up tag by name: {e:#}");
                None
            }
        }
    }

    pub async fn create_tag(&self, data: TagCreate) -> Result<Tag> {
        self.tag_repo().create(data).await
    }

    pub async fn update_tag(&self, id: i32, patch: TagUpdate) -> Result<Option<Tag>> {
        self.tag_repo().update(id, patch).await
    }

    pub async fn delete_tag(&self, id: i32) -> Result<bool> {
        self.tag_repo().remove(id).await
    }

    pub async fn set_all_tags(&self, records: &[Tag]) -> Result<()> {
        self.tag_repo().set_all(records).await
    }

    pub async fn count_tags(&self) -> Result<u64> {
        self.tag_repo().count().await
    }

    // ========== Auto-backup archive ==========

    pub async fn put_archive_slot(
        &self,
        slot_key: &str,
        payload: &str,
        created_at: &str,
    ) -> Result<()> {
        self.archive_repo()
            .put_slot(slot_key, payload, created_at)
            .await
    }

    pub async fn get_archive_slot(&self, slot_key: &str) -> Result<Option<ArchiveSlot>> {
        self.archive_repo().get_slot(slot_key).await
    }

    pub async fn list_archive_slots(&self) -> Result<Vec<ArchiveSlot>> {
        self.archive_repo().list_slots().await
    }

    pub async fn delete_archive_slot(&self, slot_key: &str) -> Result<bool> {
        self.archive_repo().delete_slot(slot_key).await
    }

    pub async fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.archive_repo().set_setting(key, value).await
    }

    pub async fn get_setting(&self, key: &str) -> Result<Option<String>> {
        self.archive_repo().get_setting(key).await
    }
}
