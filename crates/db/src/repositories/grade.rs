//! Grade repository.

use std::sync::Arc;

use crate::entities::{Grade, grade};
use campus_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

/// Grade repository for database operations.
#[derive(Clone)]
pub struct GradeRepository {
    db: Arc<DatabaseConnection>,
}

impl GradeRepository {
    /// Create a new grade repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// List a student's grades, newest first (paginated).
    pub async fn find_by_student(
        &self,
        student_id: &str,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<grade::Model>> {
        Grade::find()
            .filter(grade::Column::StudentId.eq(student_id))
            .order_by_desc(grade::Column::CreatedAt)
            .order_by_desc(grade::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List the grades recorded for a quiz.
    pub async fn find_by_quiz(&self, quiz_id: &str) -> AppResult<Vec<grade::Model>> {
        Grade::find()
            .filter(grade::Column::QuizId.eq(quiz_id))
            .order_by_asc(grade::Column::StudentId)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new grade.
    pub async fn create(&self, model: grade::ActiveModel) -> AppResult<grade::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
