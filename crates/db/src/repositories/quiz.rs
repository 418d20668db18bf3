//! Quiz repository.

use std::sync::Arc;

use crate::entities::{Quiz, quiz};
use campus_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

/// Quiz repository for database operations.
#[derive(Clone)]
pub struct QuizRepository {
    db: Arc<DatabaseConnection>,
}

impl QuizRepository {
    /// Create a new quiz repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a quiz by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<quiz::Model>> {
        Quiz::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a quiz by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<quiz::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz {id} not found")))
    }

    /// List quizzes with optional program and status filters, newest first.
    pub async fn find_all(
        &self,
        program_id: Option<&str>,
        status: Option<quiz::QuizStatus>,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<quiz::Model>> {
        let mut query = Quiz::find()
            .order_by_desc(quiz::Column::ScheduledOn)
            .order_by_desc(quiz::Column::Id);

        if let Some(pid) = program_id {
            query = query.filter(quiz::Column::ProgramId.eq(pid));
        }
        if let Some(s) = status {
            query = query.filter(quiz::Column::Status.eq(s));
        }

        query
            .offset(offset)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new quiz.
    pub async fn create(&self, model: quiz::ActiveModel) -> AppResult<quiz::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a quiz.
    pub async fn update(&self, model: quiz::ActiveModel) -> AppResult<quiz::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
