//! Create teacher profile table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TeacherProfile::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TeacherProfile::UserId)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TeacherProfile::Specialization)
                            .string_len(256)
                            .not_null(),
                    )
                    .col(ColumnDef::new(TeacherProfile::Qualifications).text())
                    .col(
                        ColumnDef::new(TeacherProfile::ExperienceYears)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeacherProfile::EmploymentStatus)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeacherProfile::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(TeacherProfile::UpdatedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TeacherProfile::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum TeacherProfile {
    Table,
    UserId,
    Specialization,
    Qualifications,
    ExperienceYears,
    EmploymentStatus,
    CreatedAt,
    UpdatedAt,
}
