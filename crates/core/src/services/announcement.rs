//! Announcement service.

use campus_common::{AppError, AppResult};
use campus_db::{
    entities::{
        announcement,
        announcement::{Audience, Priority},
        user::Role,
    },
    repositories::AnnouncementRepository,
};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Input for creating an announcement.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAnnouncementInput {
    #[validate(length(min = 1, max = 256))]
    pub title: String,

    #[validate(length(min = 1, max = 16384))]
    pub body: String,

    pub priority: Priority,

    pub audience: Audience,

    pub program_id: Option<String>,

    pub starts_at: Option<chrono::DateTime<chrono::Utc>>,

    pub ends_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// The audiences a role is part of.
///
/// Program-specific announcements additionally require a matching program,
/// which the repository filters on.
#[must_use]
pub const fn audiences_for_role(role: Role) -> &'static [Audience] {
    match role {
        // Admins see everything addressed to anyone
        Role::Admin => &[
            Audience::All,
            Audience::Students,
            Audience::Teachers,
            Audience::Admins,
            Audience::Program,
        ],
        Role::Teacher => &[Audience::All, Audience::Teachers],
        Role::Student => &[Audience::All, Audience::Students, Audience::Program],
    }
}

/// Announcement service.
#[derive(Clone)]
pub struct AnnouncementService {
    announcement_repo: AnnouncementRepository,
}

impl AnnouncementService {
    /// Create a new announcement service.
    #[must_use]
    pub const fn new(announcement_repo: AnnouncementRepository) -> Self {
        Self { announcement_repo }
    }

    /// List all announcements (for admin).
    pub async fn list_all(&self, limit: u64, offset: u64) -> AppResult<Vec<announcement::Model>> {
        self.announcement_repo.find_all(limit, offset).await
    }

    /// List the announcements currently visible to a role.
    ///
    /// `program_id` is the caller's program (students only); it scopes
    /// program-specific announcements.
    pub async fn visible_to(
        &self,
        role: Role,
        program_id: Option<&str>,
    ) -> AppResult<Vec<announcement::Model>> {
        self.announcement_repo
            .find_for_audiences(audiences_for_role(role), program_id, chrono::Utc::now())
            .await
    }

    /// Get an announcement by ID.
    pub async fn get(&self, id: &str) -> AppResult<announcement::Model> {
        self.announcement_repo.get_by_id(id).await
    }

    /// Count all announcements.
    pub async fn count(&self) -> AppResult<u64> {
        self.announcement_repo.count().await
    }

    /// Create a new announcement.
    pub async fn create(
        &self,
        author_id: &str,
        input: CreateAnnouncementInput,
    ) -> AppResult<announcement::Model> {
        input.validate()?;

        if input.audience == Audience::Program && input.program_id.is_none() {
            return Err(AppError::Validation(
                "Program announcements require a program".to_string(),
            ));
        }

        let model = announcement::ActiveModel {
            id: Set(crate::generate_id()),
            title: Set(input.title),
            body: Set(input.body),
            priority: Set(input.priority),
            audience: Set(input.audience),
            program_id: Set(input.program_id),
            author_id: Set(author_id.to_string()),
            starts_at: Set(input.starts_at.map(Into::into)),
            ends_at: Set(input.ends_at.map(Into::into)),
            created_at: Set(chrono::Utc::now().into()),
            updated_at: Set(None),
        };

        let announcement = self.announcement_repo.create(model).await?;

        tracing::info!(
            announcement_id = %announcement.id,
            audience = ?announcement.audience,
            "Announcement created"
        );

        Ok(announcement)
    }

    /// Delete an announcement.
    ///
    /// Admins may delete anything; teachers only their own.
    pub async fn delete(&self, id: &str, actor_id: &str, actor_role: Role) -> AppResult<()> {
        let announcement = self.announcement_repo.get_by_id(id).await?;

        if actor_role != Role::Admin && announcement.author_id != actor_id {
            return Err(AppError::Forbidden(
                "Only the author or an admin can delete an announcement".to_string(),
            ));
        }

        self.announcement_repo.delete(id).await?;

        tracing::info!(announcement_id = %id, "Announcement deleted");

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn test_announcement(id: &str, audience: Audience, author_id: &str) -> announcement::Model {
        announcement::Model {
            id: id.to_string(),
            title: "Exam week".to_string(),
            body: "Midterms start Monday.".to_string(),
            priority: Priority::High,
            audience,
            program_id: None,
            author_id: author_id.to_string(),
            starts_at: None,
            ends_at: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn service(db: sea_orm::DatabaseConnection) -> AnnouncementService {
        AnnouncementService::new(AnnouncementRepository::new(Arc::new(db)))
    }

    #[test]
    fn test_teachers_are_not_in_student_audience() {
        let audiences = audiences_for_role(Role::Teacher);
        assert!(audiences.contains(&Audience::All));
        assert!(audiences.contains(&Audience::Teachers));
        assert!(!audiences.contains(&Audience::Students));
        assert!(!audiences.contains(&Audience::Admins));
    }

    #[test]
    fn test_students_see_program_announcements() {
        let audiences = audiences_for_role(Role::Student);
        assert!(audiences.contains(&Audience::Program));
        assert!(!audiences.contains(&Audience::Teachers));
    }

    #[test]
    fn test_admins_see_everything() {
        assert_eq!(audiences_for_role(Role::Admin).len(), 5);
    }

    #[tokio::test]
    async fn test_create_program_announcement_requires_program() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let result = service(db)
            .create(
                "admin1",
                CreateAnnouncementInput {
                    title: "Title".to_string(),
                    body: "Body".to_string(),
                    priority: Priority::Medium,
                    audience: Audience::Program,
                    program_id: None,
                    starts_at: None,
                    ends_at: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_teacher_cannot_delete_someone_elses_announcement() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_announcement("ann1", Audience::All, "other-teacher")]])
            .into_connection();

        let result = service(db)
            .delete("ann1", "teacher1", Role::Teacher)
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_admin_can_delete_any_announcement() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_announcement("ann1", Audience::All, "teacher1")]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let result = service(db).delete("ann1", "admin1", Role::Admin).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_visible_to_passes_through_repo_rows() {
        let ann = test_announcement("ann1", Audience::Students, "admin1");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[ann]])
            .into_connection();

        let result = service(db)
            .visible_to(Role::Student, None)
            .await
            .unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "ann1");
    }
}
