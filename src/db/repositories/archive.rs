use crate::entities::{auto_backups, prelude::*, settings};
use anyhow::Result;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder, Set};

/// A retained auto-backup slot.
#[derive(Debug, Clone)]
pub struct ArchiveSlot {
    pub slot_key: String,
    pub payload: String,
    pub created_at: String,
}

/// Repository for the auto-backup archive and the scalar settings slots.
pub struct ArchiveRepository {
    conn: DatabaseConnection,
}

impl ArchiveRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_slot(model: auto_backups::Model) -> ArchiveSlot {
        ArchiveSlot {
            slot_key: model.slot_key,
            payload: model.payload,
            created_at: model.created_at,
        }
    }

    /// Writes or overwrites a date-keyed slot (one snapshot per day).
    pub async fn put_slot(&self, slot_key: &str, payload: &str, created_at: &str) -> Result<()> {
        let active_model = auto_backups::ActiveModel {
            slot_key: Set(slot_key.to_string()),
            payload: Set(payload.to_string()),
            created_at: Set(created_at.to_string()),
        };

        AutoBackups::insert(active_model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(auto_backups::Column::SlotKey)
                    .update_columns([
                        auto_backups::Column::Payload,
                        auto_backups::Column::CreatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.conn)
            .await?;
        Ok(())
    }

    pub async fn get_slot(&self, slot_key: &str) -> Result<Option<ArchiveSlot>> {
        let row = AutoBackups::find_by_id(slot_key).one(&self.conn).await?;
        Ok(row.map(Self::map_slot))
    }

    /// All slots, newest slot key first (keys are ISO dates, so string order
    /// is date order).
    pub async fn list_slots(&self) -> Result<Vec<ArchiveSlot>> {
        let rows = AutoBackups::find()
            .order_by_desc(auto_backups::Column::SlotKey)
            .all(&self.conn)
            .await?;
        Ok(rows.into_iter().map(Self::map_slot).collect())
    }

    pub async fn delete_slot(&self, slot_key: &str) -> Result<bool> {
        let result = AutoBackups::delete_by_id(slot_key).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        let active_model = settings::ActiveModel {
            key: Set(key.to_string()),
            value: Set(value.to_string()),
        };

        Settings::insert(active_model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(settings::Column::Key)
                    .update_column(settings::Column::Value)
                    .to_owned(),
            )
            .exec(&self.conn)
            .await?;
        Ok(())
    }

    pub async fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let row = Settings::find_by_id(key).one(&self.conn).await?;
        Ok(row.map(|m| m.value))
    }
}
