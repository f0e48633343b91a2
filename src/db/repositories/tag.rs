use crate::entities::{prelude::*, tags};
use crate::models::{Tag, TagCreate, TagUpdate};
use anyhow::Result;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use tracing::info;

/// Repository for the shared tag collection.
pub struct TagRepository {
    conn: DatabaseConnection,
}

impl TagRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: tags::Model) -> Tag {
        Tag {
            id: model.id,
            name: model.name,
            color: model.color,
        }
    }

    fn active_model(tag: &Tag) -> tags::ActiveModel {
        tags::ActiveModel {
            id: Set(tag.id),
            name: Set(tag.name.clone()),
            color: Set(tag.color.clone()),
        }
    }

    /// Tag ids are monotonic, so id order is insertion order.
    pub async fn all(&self) -> Result<Vec<Tag>> {
        let rows = Tags::find()
            .order_by_asc(tags::Column::Id)
            .all(&self.conn)
            .await?;
        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    pub async fn get(&self, id: i32) -> Result<Option<Tag>> {
        let row = Tags::find_by_id(id).one(&self.conn).await?;
        Ok(row.map(Self::map_model))
    }

    /// First exact name match or `None`.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Tag>> {
        let row = Tags::find()
            .filter(tags::Column::Name.eq(name))
            .order_by_asc(tags::Column::Id)
            .one(&self.conn)
            .await?;
        Ok(row.map(Self::map_model))
    }

    /// Assigns the next integer identity (max(existing)+1) and persists.
    pub async fn create(&self, data: TagCreate) -> Result<Tag> {
        let newest = Tags::find()
            .order_by_desc(tags::Column::Id)
            .limit(1)
            .one(&self.conn)
            .await?;

        let tag = Tag {
            id: newest.map_or(1, |m| m.id + 1),
            name: data.name,
            color: data.color,
        };

        Tags::insert(Self::active_model(&tag)).exec(&self.conn).await?;
        info!("Added tag: {} (ID: {})", tag.name, tag.id);
        Ok(tag)
    }

    pub async fn update(&self, id: i32, patch: TagUpdate) -> Result<Option<Tag>> {
        let Some(model) = Tags::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };
        let mut tag = Self::map_model(model);

        if let Some(name) = patch.name {
            tag.name = name;
        }
        if let Some(color) = patch.color {
            tag.color = color;
        }

        Tags::update(Self::active_model(&tag)).exec(&self.conn).await?;
        Ok(Some(tag))
    }

    pub async fn remove(&self, id: i32) -> Result<bool> {
        let result = Tags::delete_by_id(id).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }

    /// Wholesale replace inside one transaction; ids are taken from the
    /// records as given (restore keeps the snapshot's tag identities).
    pub async fn set_all(&self, records: &[Tag]) -> Result<()> {
        let txn = self.conn.begin().await?;

        Tags::delete_many().exec(&txn).await?;

        for tag in records {
            Tags::insert(Self::active_model(tag)).exec(&txn).await?;
        }

        txn.commit().await?;
        info!("Replaced tag collection ({} records)", records.len());
        Ok(())
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(Tags::find().count(&self.conn).await?)
    }
}
