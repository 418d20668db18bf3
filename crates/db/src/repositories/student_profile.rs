//! Student profile repository.

use std::sync::Arc;

use crate::entities::{StudentProfile, student_profile};
use campus_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
};

/// Student profile repository for database operations.
#[derive(Clone)]
pub struct StudentProfileRepository {
    db: Arc<DatabaseConnection>,
}

impl StudentProfileRepository {
    /// Create a new student profile repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a student profile by user ID.
    pub async fn find_by_user_id(
        &self,
        user_id: &str,
    ) -> AppResult<Option<student_profile::Model>> {
        StudentProfile::find_by_id(user_id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find all student profiles enrolled in a program.
    pub async fn find_by_program(&self, program_id: &str) -> AppResult<Vec<student_profile::Model>> {
        StudentProfile::find()
            .filter(student_profile::Column::ProgramId.eq(program_id))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count students enrolled in a program.
    pub async fn count_by_program(&self, program_id: &str) -> AppResult<u64> {
        StudentProfile::find()
            .filter(student_profile::Column::ProgramId.eq(program_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new student profile.
    pub async fn create(
        &self,
        model: student_profile::ActiveModel,
    ) -> AppResult<student_profile::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a student profile.
    pub async fn update(
        &self,
        model: student_profile::ActiveModel,
    ) -> AppResult<student_profile::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
