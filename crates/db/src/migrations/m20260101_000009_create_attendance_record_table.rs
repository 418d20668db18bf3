//! Create attendance record table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AttendanceRecord::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AttendanceRecord::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AttendanceRecord::StudentId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(AttendanceRecord::Date).date().not_null())
                    .col(
                        ColumnDef::new(AttendanceRecord::Status)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(AttendanceRecord::CheckIn).time())
                    .col(ColumnDef::new(AttendanceRecord::CheckOut).time())
                    .col(ColumnDef::new(AttendanceRecord::Notes).text())
                    .col(
                        ColumnDef::new(AttendanceRecord::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(AttendanceRecord::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // Unique index: (student_id, date) - one record per student per day
        manager
            .create_index(
                Index::create()
                    .name("idx_attendance_record_student_date")
                    .table(AttendanceRecord::Table)
                    .col(AttendanceRecord::StudentId)
                    .col(AttendanceRecord::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: date (daily sheets)
        manager
            .create_index(
                Index::create()
                    .name("idx_attendance_record_date")
                    .table(AttendanceRecord::Table)
                    .col(AttendanceRecord::Date)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AttendanceRecord::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum AttendanceRecord {
    Table,
    Id,
    StudentId,
    Date,
    Status,
    CheckIn,
    CheckOut,
    Notes,
    CreatedAt,
    UpdatedAt,
}
