//! Create announcement table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Announcement::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Announcement::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Announcement::Title).string_len(256).not_null())
                    .col(ColumnDef::new(Announcement::Body).text().not_null())
                    .col(ColumnDef::new(Announcement::Priority).string_len(16).not_null())
                    .col(ColumnDef::new(Announcement::Audience).string_len(16).not_null())
                    .col(ColumnDef::new(Announcement::ProgramId).string_len(32))
                    .col(ColumnDef::new(Announcement::AuthorId).string_len(32).not_null())
                    .col(ColumnDef::new(Announcement::StartsAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Announcement::EndsAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Announcement::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Announcement::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // Index: audience (visibility filtering)
        manager
            .create_index(
                Index::create()
                    .name("idx_announcement_audience")
                    .table(Announcement::Table)
                    .col(Announcement::Audience)
                    .to_owned(),
            )
            .await?;

        // Index: created_at
        manager
            .create_index(
                Index::create()
                    .name("idx_announcement_created_at")
                    .table(Announcement::Table)
                    .col(Announcement::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Announcement::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Announcement {
    Table,
    Id,
    Title,
    Body,
    Priority,
    Audience,
    ProgramId,
    AuthorId,
    StartsAt,
    EndsAt,
    CreatedAt,
    UpdatedAt,
}
