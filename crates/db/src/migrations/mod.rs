//! Database migrations.
//!
//! Schema migrations for the database.

#![allow(missing_docs)]

use sea_orm_migration::prelude::*;

mod m20260101_000001_create_user_table;
mod m20260101_000002_create_user_profile_table;
mod m20260101_000003_create_session_table;
mod m20260101_000004_create_program_table;
mod m20260101_000005_create_registration_application_table;
mod m20260101_000006_create_student_profile_table;
mod m20260101_000007_create_teacher_profile_table;
mod m20260101_000008_create_announcement_table;
mod m20260101_000009_create_attendance_record_table;
mod m20260101_000010_create_invoice_table;
mod m20260101_000011_create_quiz_table;
mod m20260101_000012_create_grade_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_000001_create_user_table::Migration),
            Box::new(m20260101_000002_create_user_profile_table::Migration),
            Box::new(m20260101_000003_create_session_table::Migration),
            Box::new(m20260101_000004_create_program_table::Migration),
            Box::new(m20260101_000005_create_registration_application_table::Migration),
            Box::new(m20260101_000006_create_student_profile_table::Migration),
            Box::new(m20260101_000007_create_teacher_profile_table::Migration),
            Box::new(m20260101_000008_create_announcement_table::Migration),
            Box::new(m20260101_000009_create_attendance_record_table::Migration),
            Box::new(m20260101_000010_create_invoice_table::Migration),
            Box::new(m20260101_000011_create_quiz_table::Migration),
            Box::new(m20260101_000012_create_grade_table::Migration),
        ]
    }
}
