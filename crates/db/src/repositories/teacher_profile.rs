//! Teacher profile repository.

use std::sync::Arc;

use crate::entities::{TeacherProfile, teacher_profile};
use campus_common::{AppError, AppResult};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait};

/// Teacher profile repository for database operations.
#[derive(Clone)]
pub struct TeacherProfileRepository {
    db: Arc<DatabaseConnection>,
}

impl TeacherProfileRepository {
    /// Create a new teacher profile repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a teacher profile by user ID.
    pub async fn find_by_user_id(
        &self,
        user_id: &str,
    ) -> AppResult<Option<teacher_profile::Model>> {
        TeacherProfile::find_by_id(user_id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new teacher profile.
    pub async fn create(
        &self,
        model: teacher_profile::ActiveModel,
    ) -> AppResult<teacher_profile::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a teacher profile.
    pub async fn update(
        &self,
        model: teacher_profile::ActiveModel,
    ) -> AppResult<teacher_profile::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
