use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Secondary lookup indexes; none of them unique (title uniqueness is
        // a duplicate-guard policy, not a storage constraint).
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_works_title")
                    .table(Works::Table)
                    .col(Works::Title)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_works_kind")
                    .table(Works::Table)
                    .col(Works::Kind)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_works_status")
                    .table(Works::Table)
                    .col(Works::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_works_year")
                    .table(Works::Table)
                    .col(Works::Year)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_tags_name")
                    .table(Tags::Table)
                    .col(Tags::Name)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_works_title",
            "idx_works_kind",
            "idx_works_status",
            "idx_works_year",
            "idx_tags_name",
        ] {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Works {
    Table,
    Title,
    Kind,
    Status,
    Year,
}

#[derive(DeriveIden)]
enum Tags {
    Table,
    Name,
}
