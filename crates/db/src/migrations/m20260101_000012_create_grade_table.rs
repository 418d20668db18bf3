//! Create grade table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Grade::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Grade::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Grade::StudentId).string_len(32).not_null())
                    .col(ColumnDef::new(Grade::QuizId).string_len(32))
                    .col(ColumnDef::new(Grade::Subject).string_len(128).not_null())
                    .col(ColumnDef::new(Grade::Assignment).string_len(256).not_null())
                    .col(ColumnDef::new(Grade::Score).integer().not_null())
                    .col(ColumnDef::new(Grade::MaxScore).integer().not_null())
                    .col(ColumnDef::new(Grade::Feedback).text())
                    .col(ColumnDef::new(Grade::GradedBy).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Grade::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: student_id
        manager
            .create_index(
                Index::create()
                    .name("idx_grade_student_id")
                    .table(Grade::Table)
                    .col(Grade::StudentId)
                    .to_owned(),
            )
            .await?;

        // Index: quiz_id
        manager
            .create_index(
                Index::create()
                    .name("idx_grade_quiz_id")
                    .table(Grade::Table)
                    .col(Grade::QuizId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Grade::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Grade {
    Table,
    Id,
    StudentId,
    QuizId,
    Subject,
    Assignment,
    Score,
    MaxScore,
    Feedback,
    GradedBy,
    CreatedAt,
}
