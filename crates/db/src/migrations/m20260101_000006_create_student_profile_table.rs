//! Create student profile table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StudentProfile::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudentProfile::UserId)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StudentProfile::ProgramId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentProfile::EnrollmentStatus)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(StudentProfile::DateOfBirth).date())
                    .col(ColumnDef::new(StudentProfile::Address).string_len(512))
                    .col(ColumnDef::new(StudentProfile::City).string_len(128))
                    .col(ColumnDef::new(StudentProfile::Country).string_len(128))
                    .col(ColumnDef::new(StudentProfile::EmergencyContactName).string_len(256))
                    .col(ColumnDef::new(StudentProfile::EmergencyContactPhone).string_len(32))
                    .col(
                        ColumnDef::new(StudentProfile::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(StudentProfile::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // Index: program_id (per-program rosters)
        manager
            .create_index(
                Index::create()
                    .name("idx_student_profile_program_id")
                    .table(StudentProfile::Table)
                    .col(StudentProfile::ProgramId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StudentProfile::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum StudentProfile {
    Table,
    UserId,
    ProgramId,
    EnrollmentStatus,
    DateOfBirth,
    Address,
    City,
    Country,
    EmergencyContactName,
    EmergencyContactPhone,
    CreatedAt,
    UpdatedAt,
}
