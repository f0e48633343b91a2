use crate::entities::{prelude::*, works};
use crate::models::{Work, WorkKind, WorkStatus, WorkUpdate};
use anyhow::{Context, Result};
use chrono::Utc;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use tracing::info;

/// Repository for the indexed work collection.
pub struct WorkRepository {
    conn: DatabaseConnection,
}

impl WorkRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: works::Model) -> Result<Work> {
        let kind: WorkKind = model
            .kind
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))
            .with_context(|| format!("work {}", model.id))?;
        let status: WorkStatus = model
            .status
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))
            .with_context(|| format!("work {}", model.id))?;

        let tag_ids = model
            .tag_ids
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
            .with_context(|| format!("tag ids of work {}", model.id))?
            .unwrap_or_default();
        let episodes = model
            .episodes
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
            .with_context(|| format!("episodes of work {}", model.id))?
            .unwrap_or_default();

        Ok(Work {
            id: model.id,
            title: model.title,
            kind,
            status,
            year: model.year,
            rating: model.rating,
            review: model.review,
            note: model.note,
            source: model.source,
            reminder_enabled: model.reminder_enabled,
            reminder_frequency: model.reminder_frequency,
            tag_ids,
            episodes,
            date_added: model.date_added,
            date_updated: model.date_updated,
        })
    }

    fn active_model(work: &Work, sort_index: i64) -> Result<works::ActiveModel> {
        let tag_ids = if work.tag_ids.is_empty() {
            None
        } else {
            Some(serde_json::to_string(&work.tag_ids)?)
        };
        let episodes = if work.episodes.is_empty() {
            None
        } else {
            Some(serde_json::to_string(&work.episodes)?)
        };

        Ok(works::ActiveModel {
            id: Set(work.id.clone()),
            sort_index: Set(sort_index),
            title: Set(work.title.clone()),
            kind: Set(work.kind.to_string()),
            status: Set(work.status.to_string()),
            year: Set(work.year),
            rating: Set(work.rating),
            review: Set(work.review.clone()),
            note: Set(work.note.clone()),
            source: Set(work.source.clone()),
            reminder_enabled: Set(work.reminder_enabled),
            reminder_frequency: Set(work.reminder_frequency.clone()),
            tag_ids: Set(tag_ids),
            episodes: Set(episodes),
            date_added: Set(work.date_added.clone()),
            date_updated: Set(work.date_updated.clone()),
        })
    }

    async fn next_sort_index(&self) -> Result<i64> {
        let newest = Works::find()
            .order_by_desc(works::Column::SortIndex)
            .limit(1)
            .one(&self.conn)
            .await?;
        Ok(newest.map_or(1, |m| m.sort_index + 1))
    }

    /// All works in insertion order.
    pub async fn all(&self) -> Result<Vec<Work>> {
        let rows = Works::find()
            .order_by_asc(works::Column::SortIndex)
            .all(&self.conn)
            .await?;
        rows.into_iter().map(Self::map_model).collect()
    }

    pub async fn get(&self, id: &str) -> Result<Option<Work>> {
        let row = Works::find_by_id(id).one(&self.conn).await?;
        row.map(Self::map_model).transpose()
    }

    /// First exact title match in insertion order, or `None`.
    pub async fn find_by_title(&self, title: &str) -> Result<Option<Work>> {
        let row = Works::find()
            .filter(works::Column::Title.eq(title))
            .order_by_asc(works::Column::SortIndex)
            .one(&self.conn)
            .await?;
        row.map(Self::map_model).transpose()
    }

    /// Index-backed scan over the indexed columns; in-memory filters
    /// (title substring, tag ids) are the caller's business.
    pub async fn filter(
        &self,
        kind: Option<WorkKind>,
        status: Option<WorkStatus>,
        year: Option<i32>,
    ) -> Result<Vec<Work>> {
        let mut query = Works::find();
        if let Some(kind) = kind {
            query = query.filter(works::Column::Kind.eq(kind.to_string()));
        }
        if let Some(status) = status {
            query = query.filter(works::Column::Status.eq(status.to_string()));
        }
        if let Some(year) = year {
            query = query.filter(works::Column::Year.eq(year));
        }

        let rows = query
            .order_by_asc(works::Column::SortIndex)
            .all(&self.conn)
            .await?;
        rows.into_iter().map(Self::map_model).collect()
    }

    pub async fn insert(&self, work: &Work) -> Result<()> {
        let sort_index = self.next_sort_index().await?;
        let active_model = Self::active_model(work, sort_index)?;
        Works::insert(active_model).exec(&self.conn).await?;
        info!("Added work: {}", work.title);
        Ok(())
    }

    /// Merges the patch onto the stored record and stamps `date_updated`.
    /// `Ok(None)` when the id is absent - an expected outcome, not an error.
    pub async fn update(&self, id: &str, patch: WorkUpdate) -> Result<Option<Work>> {
        let Some(model) = Works::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };
        let sort_index = model.sort_index;
        let mut work = Self::map_model(model)?;

        if let Some(title) = patch.title {
            work.title = title;
        }
        if let Some(kind) = patch.kind {
            work.kind = kind;
        }
        if let Some(status) = patch.status {
            work.status = status;
        }
        if let Some(year) = patch.year {
            work.year = Some(year);
        }
        if let Some(rating) = patch.rating {
            work.rating = Some(rating);
        }
        if let Some(review) = patch.review {
            work.review = Some(review);
        }
        if let Some(note) = patch.note {
            work.note = Some(note);
        }
        if let Some(source) = patch.source {
            work.source = Some(source);
        }
        if let Some(reminder_enabled) = patch.reminder_enabled {
            work.reminder_enabled = reminder_enabled;
        }
        if let Some(reminder_frequency) = patch.reminder_frequency {
            work.reminder_frequency = Some(reminder_frequency);
        }
        if let Some(tag_ids) = patch.tag_ids {
            work.tag_ids = tag_ids;
        }
        if let Some(episodes) = patch.episodes {
            work.episodes = episodes;
        }
        work.date_updated = Some(Utc::now().to_rfc3339());

        let active_model = Self::active_model(&work, sort_index)?;
        Works::update(active_model).exec(&self.conn).await?;
        Ok(Some(work))
    }

    pub async fn remove(&self, id: &str) -> Result<bool> {
        let result = Works::delete_by_id(id).exec(&self.conn).await?;
        let removed = result.rows_affected > 0;
        if removed {
            info!("Removed work: {}", id);
        }
        Ok(removed)
    }

    /// Wholesale replace: clear then refill inside one transaction so no
    /// reader observes a half-cleared collection. Sort indexes follow the
    /// list order.
    pub async fn set_all(&self, records: &[Work]) -> Result<()> {
        let txn = self.conn.begin().await?;

        Works::delete_many().exec(&txn).await?;

        for (position, work) in records.iter().enumerate() {
            let active_model = Self::active_model(work, position as i64 + 1)?;
            Works::insert(active_model).exec(&txn).await?;
        }

        txn.commit().await?;
        info!("Replaced work collection ({} records)", records.len());
        Ok(())
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(Works::find().count(&self.conn).await?)
    }
}
