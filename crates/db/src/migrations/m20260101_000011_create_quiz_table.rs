//! Create quiz table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Quiz::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Quiz::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Quiz::Title).string_len(256).not_null())
                    .col(ColumnDef::new(Quiz::ProgramId).string_len(32).not_null())
                    .col(ColumnDef::new(Quiz::Status).string_len(16).not_null())
                    .col(ColumnDef::new(Quiz::ScheduledOn).date().not_null())
                    .col(ColumnDef::new(Quiz::DurationMinutes).integer())
                    .col(ColumnDef::new(Quiz::TotalPoints).integer().not_null())
                    .col(ColumnDef::new(Quiz::CreatedBy).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Quiz::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Quiz::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // Index: program_id
        manager
            .create_index(
                Index::create()
                    .name("idx_quiz_program_id")
                    .table(Quiz::Table)
                    .col(Quiz::ProgramId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Quiz::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Quiz {
    Table,
    Id,
    Title,
    ProgramId,
    Status,
    ScheduledOn,
    DurationMinutes,
    TotalPoints,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}
