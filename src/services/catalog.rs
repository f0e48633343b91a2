//! Work and tag catalog operations.
//!
//! The catalog owns identity assignment, creation-time stamping, and the
//! duplicate-prevention policy applied at work creation. All storage goes
//! through an injected [`Store`] handle.

use crate::db::Store;
use crate::models::{
    Stats, Tag, TagCreate, TagUpdate, Work, WorkCreate, WorkPage, WorkQuery, WorkUpdate,
};
use crate::services::stats::compute_stats;
use chrono::Utc;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

/// Domain errors for catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("A work titled \"{0}\" already exists")]
    DuplicateTitle(String),

    #[error("A work imported from external catalog entry {0} already exists")]
    DuplicateExternalId(i64),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for CatalogError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<sea_orm::DbErr> for CatalogError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

/// Extracts the numeric id from an external-catalog marker in a note,
/// e.g. `"AniList ID: 21"` yields 21.
#[must_use]
pub fn external_catalog_id(note: &str) -> Option<i64> {
    let tail = &note[note.find("ID: ")? + 4..];
    let digits: String = tail.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

pub struct CatalogService {
    store: Store,
}

impl CatalogService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// Creates a work after running the duplicate guard: first an exact
    /// (case-sensitive) title match, then a scan for the same external
    /// catalog id in existing notes. Both checks walk the full collection;
    /// personal collections stay in the tens-to-thousands range.
    pub async fn create_work(&self, data: WorkCreate) -> Result<Work, CatalogError> {
        let existing = self.store.all_works().await;

        if let Some(found) = existing.iter().find(|w| w.title == data.title) {
            debug!("Rejected duplicate title: {}", found.title);
            return Err(CatalogError::DuplicateTitle(data.title));
        }

        if let Some(external_id) = data.note.as_deref().and_then(external_catalog_id) {
            let collision = existing
                .iter()
                .any(|w| w.note.as_deref().and_then(external_catalog_id) == Some(external_id));
            if collision {
                return Err(CatalogError::DuplicateExternalId(external_id));
            }
        }

        let work = Work {
            id: Uuid::new_v4().to_string(),
            title: data.title,
            kind: data.kind,
            status: data.status,
            year: data.year,
            rating: data.rating,
            review: data.review,
            note: data.note,
            source: data.source,
            reminder_enabled: data.reminder_enabled.unwrap_or(false),
            reminder_frequency: data.reminder_frequency,
            tag_ids: data.tag_ids,
            episodes: data.episodes,
            date_added: Utc::now().to_rfc3339(),
            date_updated: None,
        };

        self.store.insert_work(&work).await?;
        Ok(work)
    }

    /// `Ok(None)` when the id is absent.
    pub async fn update_work(
        &self,
        id: &str,
        patch: WorkUpdate,
    ) -> Result<Option<Work>, CatalogError> {
        Ok(self.store.update_work(id, patch).await?)
    }

    /// `Ok(false)` when the id is absent.
    pub async fn delete_work(&self, id: &str) -> Result<bool, CatalogError> {
        Ok(self.store.delete_work(id).await?)
    }

    pub async fn get_work(&self, id: &str) -> Result<Option<Work>, CatalogError> {
        Ok(self.store.get_work(id).await?)
    }

    /// Filtered, paginated listing. Kind/status/year hit the secondary
    /// indexes; title substring and tag filters run over the fetched rows.
    pub async fn list_works(&self, query: WorkQuery) -> Result<WorkPage, CatalogError> {
        let mut works = self
            .store
            .filter_works(query.kind, query.status, query.year)
            .await?;

        if let Some(title) = &query.title {
            let needle = title.to_lowercase();
            works.retain(|w| w.title.to_lowercase().contains(&needle));
        }

        if !query.tag_ids.is_empty() {
            works.retain(|w| w.tag_ids.iter().any(|id| query.tag_ids.contains(id)));
        }

        let total = works.len();
        let page = query.page.unwrap_or(1).max(1);
        let size = query.size.unwrap_or(20).max(1);
        let start = (page - 1) * size;

        let works = works.into_iter().skip(start).take(size).collect::<Vec<_>>();

        Ok(WorkPage {
            works,
            total,
            page,
            size,
        })
    }

    /// Fresh aggregate over the current collection; nothing is cached.
    pub async fn stats(&self) -> Stats {
        let works = self.store.all_works().await;
        compute_stats(&works)
    }

    // ========== Tags ==========

    pub async fn create_tag(&self, data: TagCreate) -> Result<Tag, CatalogError> {
        Ok(self.store.create_tag(data).await?)
    }

    pub async fn update_tag(&self, id: i32, patch: TagUpdate) -> Result<Option<Tag>, CatalogError> {
        Ok(self.store.update_tag(id, patch).await?)
    }

    pub async fn delete_tag(&self, id: i32) -> Result<bool, CatalogError> {
        Ok(self.store.delete_tag(id).await?)
    }

    pub async fn list_tags(&self) -> Vec<Tag> {
        self.store.all_tags().await
    }
}
