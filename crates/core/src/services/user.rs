//! User directory service: student and teacher listings and status changes.

use campus_common::{AppError, AppResult};
use campus_db::{
    entities::{student_profile, teacher_profile, user},
    repositories::{
        SessionRepository, StudentProfileRepository, TeacherProfileRepository, UserRepository,
    },
};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// A student with their role extension.
#[derive(Debug, Clone)]
pub struct StudentRecord {
    pub user: user::Model,
    pub profile: student_profile::Model,
}

/// A teacher with their role extension.
#[derive(Debug, Clone)]
pub struct TeacherRecord {
    pub user: user::Model,
    pub profile: teacher_profile::Model,
}

/// Input for updating the mutable parts of a user.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserInput {
    #[validate(length(min = 1, max = 128))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 128))]
    pub last_name: Option<String>,

    #[validate(length(max = 1024))]
    pub avatar_url: Option<String>,
}

/// User directory service.
#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
    student_repo: StudentProfileRepository,
    teacher_repo: TeacherProfileRepository,
    session_repo: SessionRepository,
}

impl UserService {
    /// Create a new user service.
    #[must_use]
    pub const fn new(
        user_repo: UserRepository,
        student_repo: StudentProfileRepository,
        teacher_repo: TeacherProfileRepository,
        session_repo: SessionRepository,
    ) -> Self {
        Self {
            user_repo,
            student_repo,
            teacher_repo,
            session_repo,
        }
    }

    /// List users of a role, optionally filtered by a search query.
    pub async fn list(
        &self,
        role: user::Role,
        search: Option<&str>,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<user::Model>> {
        match search {
            Some(q) if !q.trim().is_empty() => {
                self.user_repo.search(role, q.trim(), limit, offset).await
            }
            _ => self.user_repo.find_by_role(role, limit, offset).await,
        }
    }

    /// Count users of a role.
    pub async fn count(&self, role: user::Role) -> AppResult<u64> {
        self.user_repo.count_by_role(role).await
    }

    /// Get a student and their extension record.
    pub async fn get_student(&self, id: &str) -> AppResult<StudentRecord> {
        let user = self.user_repo.get_by_id(id).await?;

        if user.role != user::Role::Student {
            return Err(AppError::UserNotFound(id.to_string()));
        }

        let profile = self
            .student_repo
            .find_by_user_id(id)
            .await?
            .ok_or_else(|| {
                AppError::Internal(format!("Student {id} has no extension record"))
            })?;

        Ok(StudentRecord { user, profile })
    }

    /// Get a teacher and their extension record.
    pub async fn get_teacher(&self, id: &str) -> AppResult<TeacherRecord> {
        let user = self.user_repo.get_by_id(id).await?;

        if user.role != user::Role::Teacher {
            return Err(AppError::UserNotFound(id.to_string()));
        }

        let profile = self
            .teacher_repo
            .find_by_user_id(id)
            .await?
            .ok_or_else(|| {
                AppError::Internal(format!("Teacher {id} has no extension record"))
            })?;

        Ok(TeacherRecord { user, profile })
    }

    /// Update a user's name or avatar.
    pub async fn update(&self, id: &str, input: UpdateUserInput) -> AppResult<user::Model> {
        input.validate()?;

        let user = self.user_repo.get_by_id(id).await?;
        let mut active: user::ActiveModel = user.into();

        if let Some(first_name) = input.first_name {
            active.first_name = Set(first_name);
        }
        if let Some(last_name) = input.last_name {
            active.last_name = Set(last_name);
        }
        if let Some(avatar_url) = input.avatar_url {
            active.avatar_url = Set(Some(avatar_url));
        }

        active.updated_at = Set(Some(chrono::Utc::now().into()));

        self.user_repo.update(active).await
    }

    /// Change a student's enrollment status.
    pub async fn set_enrollment_status(
        &self,
        student_id: &str,
        status: student_profile::EnrollmentStatus,
    ) -> AppResult<student_profile::Model> {
        let record = self.get_student(student_id).await?;

        let mut active: student_profile::ActiveModel = record.profile.into();
        active.enrollment_status = Set(status);
        active.updated_at = Set(Some(chrono::Utc::now().into()));

        let updated = self.student_repo.update(active).await?;

        tracing::info!(student_id = %student_id, status = ?status, "Enrollment status changed");

        Ok(updated)
    }

    /// Change a teacher's employment status.
    pub async fn set_employment_status(
        &self,
        teacher_id: &str,
        status: teacher_profile::EmploymentStatus,
    ) -> AppResult<teacher_profile::Model> {
        let record = self.get_teacher(teacher_id).await?;

        let mut active: teacher_profile::ActiveModel = record.profile.into();
        active.employment_status = Set(status);
        active.updated_at = Set(Some(chrono::Utc::now().into()));

        let updated = self.teacher_repo.update(active).await?;

        tracing::info!(teacher_id = %teacher_id, status = ?status, "Employment status changed");

        Ok(updated)
    }

    /// Suspend or unsuspend an account. Suspension kills all live sessions.
    pub async fn set_suspended(&self, user_id: &str, suspended: bool) -> AppResult<user::Model> {
        let user = self.user_repo.set_suspended(user_id, suspended).await?;

        if suspended {
            let killed = self.session_repo.delete_for_user(user_id).await?;
            tracing::info!(user_id = %user_id, sessions_killed = killed, "Account suspended");
        } else {
            tracing::info!(user_id = %user_id, "Account unsuspended");
        }

        Ok(user)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn test_user(id: &str, role: user::Role) -> user::Model {
        user::Model {
            id: id.to_string(),
            email: format!("{id}@example.com"),
            email_lower: format!("{id}@example.com"),
            first_name: "Marcus".to_string(),
            last_name: "Chen".to_string(),
            role,
            avatar_url: None,
            is_suspended: false,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn test_student_profile(user_id: &str) -> student_profile::Model {
        student_profile::Model {
            user_id: user_id.to_string(),
            program_id: "prog1".to_string(),
            enrollment_status: student_profile::EnrollmentStatus::Active,
            date_of_birth: None,
            address: None,
            city: None,
            country: None,
            emergency_contact_name: None,
            emergency_contact_phone: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn service(db: sea_orm::DatabaseConnection) -> UserService {
        let db = Arc::new(db);
        UserService::new(
            UserRepository::new(Arc::clone(&db)),
            StudentProfileRepository::new(Arc::clone(&db)),
            TeacherProfileRepository::new(Arc::clone(&db)),
            SessionRepository::new(db),
        )
    }

    #[tokio::test]
    async fn test_get_student_joins_extension() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_user("stu1", user::Role::Student)]])
            .append_query_results([[test_student_profile("stu1")]])
            .into_connection();

        let record = service(db).get_student("stu1").await.unwrap();

        assert_eq!(record.user.id, "stu1");
        assert_eq!(record.profile.program_id, "prog1");
    }

    #[tokio::test]
    async fn test_get_student_rejects_non_student() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_user("t1", user::Role::Teacher)]])
            .into_connection();

        let result = service(db).get_student("t1").await;

        assert!(matches!(result, Err(AppError::UserNotFound(_))));
    }

    #[tokio::test]
    async fn test_suspend_kills_sessions() {
        let user = test_user("stu1", user::Role::Student);
        let mut suspended = user.clone();
        suspended.is_suspended = true;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            // set_suspended: load then update (returning)
            .append_query_results([[user]])
            .append_query_results([[suspended]])
            // delete_for_user
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 2,
            }])
            .into_connection();

        let result = service(db).set_suspended("stu1", true).await.unwrap();

        assert!(result.is_suspended);
    }
}
