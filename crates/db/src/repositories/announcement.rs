//! Announcement repository.

use std::sync::Arc;

use crate::entities::{Announcement, announcement};
use campus_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

/// Announcement repository for database operations.
#[derive(Clone)]
pub struct AnnouncementRepository {
    db: Arc<DatabaseConnection>,
}

impl AnnouncementRepository {
    /// Create a new announcement repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an announcement by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<announcement::Model>> {
        Announcement::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find an announcement by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<announcement::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Announcement {id} not found")))
    }

    /// List all announcements, newest first (for admin).
    pub async fn find_all(&self, limit: u64, offset: u64) -> AppResult<Vec<announcement::Model>> {
        Announcement::find()
            .order_by_desc(announcement::Column::CreatedAt)
            .order_by_desc(announcement::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List announcements for a set of audiences whose active window
    /// contains `now`, newest first.
    pub async fn find_for_audiences(
        &self,
        audiences: &[announcement::Audience],
        program_id: Option<&str>,
        now: chrono::DateTime<chrono::Utc>,
    ) -> AppResult<Vec<announcement::Model>> {
        let mut audience_cond = Condition::any();
        for audience in audiences {
            if *audience == announcement::Audience::Program {
                // Program announcements only match the caller's own program
                if let Some(pid) = program_id {
                    audience_cond = audience_cond.add(
                        Condition::all()
                            .add(announcement::Column::Audience.eq(*audience))
                            .add(announcement::Column::ProgramId.eq(pid)),
                    );
                }
            } else {
                audience_cond = audience_cond.add(announcement::Column::Audience.eq(*audience));
            }
        }

        let window = Condition::all()
            .add(
                Condition::any()
                    .add(announcement::Column::StartsAt.is_null())
                    .add(announcement::Column::StartsAt.lte(now)),
            )
            .add(
                Condition::any()
                    .add(announcement::Column::EndsAt.is_null())
                    .add(announcement::Column::EndsAt.gte(now)),
            );

        Announcement::find()
            .filter(audience_cond)
            .filter(window)
            .order_by_desc(announcement::Column::CreatedAt)
            .order_by_desc(announcement::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count all announcements.
    pub async fn count(&self) -> AppResult<u64> {
        Announcement::find()
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new announcement.
    pub async fn create(&self, model: announcement::ActiveModel) -> AppResult<announcement::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update an announcement.
    pub async fn update(&self, model: announcement::ActiveModel) -> AppResult<announcement::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete an announcement.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        Announcement::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
