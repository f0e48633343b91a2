use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "works")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Monotonic insertion counter; `all` reads order by it so callers see
    /// records in the order they were written.
    pub sort_index: i64,
    pub title: String,
    pub kind: String,
    pub status: String,
    pub year: Option<i32>,
    pub rating: Option<i32>,
    pub review: Option<String>,
    pub note: Option<String>,
    pub source: Option<String>,
    pub reminder_enabled: bool,
    pub reminder_frequency: Option<String>,
    /// JSON array of referenced tag ids.
    #[sea_orm(column_type = "Text", nullable)]
    pub tag_ids: Option<String>,
    /// JSON array of embedded episodes, owned by this work.
    #[sea_orm(column_type = "Text", nullable)]
    pub episodes: Option<String>,
    pub date_added: String,
    pub date_updated: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
