//! Create program table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Program::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Program::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Program::Name).string_len(256).not_null())
                    .col(ColumnDef::new(Program::Description).text())
                    .col(ColumnDef::new(Program::DurationMonths).integer().not_null())
                    .col(ColumnDef::new(Program::PriceCents).big_integer().not_null())
                    .col(ColumnDef::new(Program::Capacity).integer().not_null())
                    .col(
                        ColumnDef::new(Program::EnrolledCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Program::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Program::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Program::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // Unique index: name
        manager
            .create_index(
                Index::create()
                    .name("idx_program_name")
                    .table(Program::Table)
                    .col(Program::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Program::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Program {
    Table,
    Id,
    Name,
    Description,
    DurationMonths,
    PriceCents,
    Capacity,
    EnrolledCount,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
