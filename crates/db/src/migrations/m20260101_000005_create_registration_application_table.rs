//! Create registration application table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RegistrationApplication::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RegistrationApplication::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RegistrationApplication::Email)
                            .string_len(320)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RegistrationApplication::EmailLower)
                            .string_len(320)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RegistrationApplication::FirstName)
                            .string_len(128)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RegistrationApplication::LastName)
                            .string_len(128)
                            .not_null(),
                    )
                    .col(ColumnDef::new(RegistrationApplication::Password).text().not_null())
                    .col(
                        ColumnDef::new(RegistrationApplication::RequestedRole)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(RegistrationApplication::ProgramId).string_len(32))
                    .col(ColumnDef::new(RegistrationApplication::Phone).string_len(32))
                    .col(ColumnDef::new(RegistrationApplication::DateOfBirth).date())
                    .col(ColumnDef::new(RegistrationApplication::Address).string_len(512))
                    .col(ColumnDef::new(RegistrationApplication::City).string_len(128))
                    .col(ColumnDef::new(RegistrationApplication::Country).string_len(128))
                    .col(
                        ColumnDef::new(RegistrationApplication::EmergencyContactName)
                            .string_len(256),
                    )
                    .col(
                        ColumnDef::new(RegistrationApplication::EmergencyContactPhone)
                            .string_len(32),
                    )
                    .col(ColumnDef::new(RegistrationApplication::Specialization).string_len(256))
                    .col(ColumnDef::new(RegistrationApplication::Qualifications).text())
                    .col(ColumnDef::new(RegistrationApplication::ExperienceYears).integer())
                    .col(
                        ColumnDef::new(RegistrationApplication::Status)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(RegistrationApplication::ReviewedBy).string_len(32))
                    .col(
                        ColumnDef::new(RegistrationApplication::ReviewedAt)
                            .timestamp_with_time_zone(),
                    )
                    .col(ColumnDef::new(RegistrationApplication::Notes).text())
                    .col(
                        ColumnDef::new(RegistrationApplication::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: email_lower (duplicate checks against pending applications)
        manager
            .create_index(
                Index::create()
                    .name("idx_registration_application_email_lower")
                    .table(RegistrationApplication::Table)
                    .col(RegistrationApplication::EmailLower)
                    .to_owned(),
            )
            .await?;

        // Index: status (review queue filtering)
        manager
            .create_index(
                Index::create()
                    .name("idx_registration_application_status")
                    .table(RegistrationApplication::Table)
                    .col(RegistrationApplication::Status)
                    .to_owned(),
            )
            .await?;

        // Index: created_at
        manager
            .create_index(
                Index::create()
                    .name("idx_registration_application_created_at")
                    .table(RegistrationApplication::Table)
                    .col(RegistrationApplication::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(RegistrationApplication::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum RegistrationApplication {
    Table,
    Id,
    Email,
    EmailLower,
    FirstName,
    LastName,
    Password,
    RequestedRole,
    ProgramId,
    Phone,
    DateOfBirth,
    Address,
    City,
    Country,
    EmergencyContactName,
    EmergencyContactPhone,
    Specialization,
    Qualifications,
    ExperienceYears,
    Status,
    ReviewedBy,
    ReviewedAt,
    Notes,
    CreatedAt,
}
