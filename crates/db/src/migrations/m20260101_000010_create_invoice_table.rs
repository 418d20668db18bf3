//! Create invoice table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Invoice::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Invoice::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Invoice::StudentId).string_len(32).not_null())
                    .col(ColumnDef::new(Invoice::AmountCents).big_integer().not_null())
                    .col(ColumnDef::new(Invoice::Status).string_len(16).not_null())
                    .col(ColumnDef::new(Invoice::IssuedOn).date().not_null())
                    .col(ColumnDef::new(Invoice::DueOn).date().not_null())
                    .col(ColumnDef::new(Invoice::PaidAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Invoice::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Invoice::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // Index: student_id
        manager
            .create_index(
                Index::create()
                    .name("idx_invoice_student_id")
                    .table(Invoice::Table)
                    .col(Invoice::StudentId)
                    .to_owned(),
            )
            .await?;

        // Index: status
        manager
            .create_index(
                Index::create()
                    .name("idx_invoice_status")
                    .table(Invoice::Table)
                    .col(Invoice::Status)
                    .to_owned(),
            )
            .await?;

        // Index: due_on (overdue sweeps)
        manager
            .create_index(
                Index::create()
                    .name("idx_invoice_due_on")
                    .table(Invoice::Table)
                    .col(Invoice::DueOn)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Invoice::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Invoice {
    Table,
    Id,
    StudentId,
    AmountCents,
    Status,
    IssuedOn,
    DueOn,
    PaidAt,
    CreatedAt,
    UpdatedAt,
}
