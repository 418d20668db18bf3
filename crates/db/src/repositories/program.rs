//! Program repository.

use std::sync::Arc;

use crate::entities::{Program, program};
use campus_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

/// Program repository for database operations.
#[derive(Clone)]
pub struct ProgramRepository {
    db: Arc<DatabaseConnection>,
}

impl ProgramRepository {
    /// Create a new program repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a program by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<program::Model>> {
        Program::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a program by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<program::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Program {id} not found")))
    }

    /// Find a program by its unique name.
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<program::Model>> {
        Program::find()
            .filter(program::Column::Name.eq(name))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List programs, optionally only active ones.
    pub async fn find_all(
        &self,
        active_only: bool,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<program::Model>> {
        let mut query = Program::find().order_by_asc(program::Column::Name);

        if active_only {
            query = query.filter(program::Column::IsActive.eq(true));
        }

        query
            .offset(offset)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count programs.
    pub async fn count(&self) -> AppResult<u64> {
        Program::find()
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new program.
    pub async fn create(&self, model: program::ActiveModel) -> AppResult<program::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a program.
    pub async fn update(&self, model: program::ActiveModel) -> AppResult<program::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
