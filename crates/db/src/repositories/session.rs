//! Session repository.

use std::sync::Arc;

use crate::entities::{Session, session};
use campus_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
};

/// Session repository for database operations.
#[derive(Clone)]
pub struct SessionRepository {
    db: Arc<DatabaseConnection>,
}

impl SessionRepository {
    /// Create a new session repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Create a new session.
    pub async fn create(&self, model: session::ActiveModel) -> AppResult<session::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a session by its bearer token.
    pub async fn find_by_token(&self, token: &str) -> AppResult<Option<session::Model>> {
        Session::find()
            .filter(session::Column::Token.eq(token))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a session by token. Idempotent.
    pub async fn delete_by_token(&self, token: &str) -> AppResult<()> {
        Session::delete_many()
            .filter(session::Column::Token.eq(token))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete all sessions belonging to a user (e.g. on suspension).
    pub async fn delete_for_user(&self, user_id: &str) -> AppResult<u64> {
        let result = Session::delete_many()
            .filter(session::Column::UserId.eq(user_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(result.rows_affected)
    }

    /// Delete all sessions that expired before `now`.
    pub async fn delete_expired(
        &self,
        now: chrono::DateTime<chrono::Utc>,
    ) -> AppResult<u64> {
        let result = Session::delete_many()
            .filter(session::Column::ExpiresAt.lt(now))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(result.rows_affected)
    }
}
