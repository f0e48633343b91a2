use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "auto_backups")]
pub struct Model {
    /// Slot key, `auto_backup_<ISO-date>`.
    #[sea_orm(primary_key, auto_increment = false)]
    pub slot_key: String,
    /// Serialized snapshot (primary backup format).
    #[sea_orm(column_type = "Text")]
    pub payload: String,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
