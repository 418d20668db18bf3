//! Quiz service.

use campus_common::{AppError, AppResult};
use campus_db::{
    entities::{quiz, quiz::QuizStatus},
    repositories::{ProgramRepository, QuizRepository},
};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Input for creating a quiz.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuizInput {
    #[validate(length(min = 1, max = 256))]
    pub title: String,

    pub program_id: String,

    pub scheduled_on: chrono::NaiveDate,

    #[validate(range(min = 1, max = 480))]
    pub duration_minutes: Option<i32>,

    #[validate(range(min = 1))]
    pub total_points: i32,
}

/// Quiz service.
#[derive(Clone)]
pub struct QuizService {
    quiz_repo: QuizRepository,
    program_repo: ProgramRepository,
}

impl QuizService {
    /// Create a new quiz service.
    #[must_use]
    pub const fn new(quiz_repo: QuizRepository, program_repo: ProgramRepository) -> Self {
        Self {
            quiz_repo,
            program_repo,
        }
    }

    /// Create a new quiz for a program.
    pub async fn create(
        &self,
        created_by: &str,
        input: CreateQuizInput,
    ) -> AppResult<quiz::Model> {
        input.validate()?;

        // The program must exist; quizzes for unknown programs are
        // unreachable from every roster.
        self.program_repo.get_by_id(&input.program_id).await?;

        let model = quiz::ActiveModel {
            id: Set(crate::generate_id()),
            title: Set(input.title),
            program_id: Set(input.program_id),
            status: Set(QuizStatus::Scheduled),
            scheduled_on: Set(input.scheduled_on),
            duration_minutes: Set(input.duration_minutes),
            total_points: Set(input.total_points),
            created_by: Set(created_by.to_string()),
            created_at: Set(chrono::Utc::now().into()),
            updated_at: Set(None),
        };

        let quiz = self.quiz_repo.create(model).await?;

        tracing::info!(quiz_id = %quiz.id, program_id = %quiz.program_id, "Quiz created");

        Ok(quiz)
    }

    /// Get a quiz by ID.
    pub async fn get(&self, id: &str) -> AppResult<quiz::Model> {
        self.quiz_repo.get_by_id(id).await
    }

    /// List quizzes with optional program and status filters.
    pub async fn list(
        &self,
        program_id: Option<&str>,
        status: Option<QuizStatus>,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<quiz::Model>> {
        self.quiz_repo
            .find_all(program_id, status, limit, offset)
            .await
    }

    /// Advance a quiz's status.
    ///
    /// Quizzes only move forward: scheduled -> grading -> completed.
    pub async fn set_status(&self, id: &str, status: QuizStatus) -> AppResult<quiz::Model> {
        let quiz = self.quiz_repo.get_by_id(id).await?;

        let allowed = matches!(
            (quiz.status, status),
            (QuizStatus::Scheduled, QuizStatus::Grading)
                | (QuizStatus::Scheduled, QuizStatus::Completed)
                | (QuizStatus::Grading, QuizStatus::Completed)
        );

        if !allowed {
            return Err(AppError::Conflict(format!(
                "Quiz {id} cannot move from {:?} to {status:?}",
                quiz.status
            )));
        }

        let mut active: quiz::ActiveModel = quiz.into();
        active.status = Set(status);
        active.updated_at = Set(Some(chrono::Utc::now().into()));

        self.quiz_repo.update(active).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn test_quiz(id: &str, status: QuizStatus) -> quiz::Model {
        quiz::Model {
            id: id.to_string(),
            title: "Component Architecture".to_string(),
            program_id: "prog1".to_string(),
            status,
            scheduled_on: NaiveDate::from_ymd_opt(2026, 2, 15).unwrap(),
            duration_minutes: Some(90),
            total_points: 100,
            created_by: "teacher1".to_string(),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn service(db: sea_orm::DatabaseConnection) -> QuizService {
        let db = Arc::new(db);
        QuizService::new(
            QuizRepository::new(Arc::clone(&db)),
            ProgramRepository::new(db),
        )
    }

    #[tokio::test]
    async fn test_set_status_forward_transition() {
        let mut grading = test_quiz("quiz1", QuizStatus::Grading);
        grading.updated_at = Some(Utc::now().into());

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_quiz("quiz1", QuizStatus::Scheduled)]])
            .append_query_results([[grading]])
            .into_connection();

        let result = service(db)
            .set_status("quiz1", QuizStatus::Grading)
            .await
            .unwrap();

        assert_eq!(result.status, QuizStatus::Grading);
    }

    #[tokio::test]
    async fn test_set_status_backward_transition_fails() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_quiz("quiz1", QuizStatus::Completed)]])
            .into_connection();

        let result = service(db).set_status("quiz1", QuizStatus::Scheduled).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_create_requires_existing_program() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<campus_db::entities::program::Model>::new()])
            .into_connection();

        let result = service(db)
            .create(
                "teacher1",
                CreateQuizInput {
                    title: "Midterm".to_string(),
                    program_id: "ghost".to_string(),
                    scheduled_on: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
                    duration_minutes: None,
                    total_points: 100,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
