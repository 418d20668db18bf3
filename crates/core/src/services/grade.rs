//! Grade service.

use campus_common::{AppError, AppResult};
use campus_db::{entities::grade, repositories::GradeRepository};
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Input for recording a grade.
#[derive(Debug, Deserialize, Validate)]
pub struct RecordGradeInput {
    pub student_id: String,

    pub quiz_id: Option<String>,

    #[validate(length(min = 1, max = 128))]
    pub subject: String,

    #[validate(length(min = 1, max = 256))]
    pub assignment: String,

    #[validate(range(min = 0))]
    pub score: i32,

    #[validate(range(min = 1))]
    pub max_score: i32,

    #[validate(length(max = 4096))]
    pub feedback: Option<String>,
}

/// A student's grade average.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeSummary {
    pub graded_count: u64,
    pub percentage: f64,
    pub letter: char,
}

/// Grade service.
#[derive(Clone)]
pub struct GradeService {
    grade_repo: GradeRepository,
}

impl GradeService {
    /// Create a new grade service.
    #[must_use]
    pub const fn new(grade_repo: GradeRepository) -> Self {
        Self { grade_repo }
    }

    /// Record a grade for a student.
    pub async fn record(
        &self,
        graded_by: &str,
        input: RecordGradeInput,
    ) -> AppResult<grade::Model> {
        input.validate()?;

        if input.score > input.max_score {
            return Err(AppError::Validation(format!(
                "Score {} exceeds maximum {}",
                input.score, input.max_score
            )));
        }

        let model = grade::ActiveModel {
            id: Set(crate::generate_id()),
            student_id: Set(input.student_id),
            quiz_id: Set(input.quiz_id),
            subject: Set(input.subject),
            assignment: Set(input.assignment),
            score: Set(input.score),
            max_score: Set(input.max_score),
            feedback: Set(input.feedback),
            graded_by: Set(graded_by.to_string()),
            created_at: Set(chrono::Utc::now().into()),
        };

        let grade = self.grade_repo.create(model).await?;

        tracing::info!(
            grade_id = %grade.id,
            student_id = %grade.student_id,
            score = grade.score,
            max_score = grade.max_score,
            "Grade recorded"
        );

        Ok(grade)
    }

    /// A student's grades, newest first.
    pub async fn list_for_student(
        &self,
        student_id: &str,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<grade::Model>> {
        self.grade_repo
            .find_by_student(student_id, limit, offset)
            .await
    }

    /// Grades recorded for a quiz.
    pub async fn list_for_quiz(&self, quiz_id: &str) -> AppResult<Vec<grade::Model>> {
        self.grade_repo.find_by_quiz(quiz_id).await
    }

    /// Average a student's grades into a percentage and letter.
    pub async fn summary(&self, student_id: &str) -> AppResult<GradeSummary> {
        let grades = self.grade_repo.find_by_student(student_id, 1000, 0).await?;

        let (scored, possible) = grades.iter().fold((0i64, 0i64), |(s, p), g| {
            (s + i64::from(g.score), p + i64::from(g.max_score))
        });

        #[allow(clippy::cast_precision_loss)]
        let percentage = if possible == 0 {
            0.0
        } else {
            (scored as f64 / possible as f64) * 100.0
        };

        Ok(GradeSummary {
            graded_count: grades.len() as u64,
            percentage,
            letter: letter_grade(percentage),
        })
    }
}

/// Letter grade for a percentage.
#[must_use]
pub fn letter_grade(percentage: f64) -> char {
    match percentage {
        p if p >= 90.0 => 'A',
        p if p >= 80.0 => 'B',
        p if p >= 70.0 => 'C',
        p if p >= 60.0 => 'D',
        _ => 'F',
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn test_grade(id: &str, score: i32, max_score: i32) -> grade::Model {
        grade::Model {
            id: id.to_string(),
            student_id: "stu1".to_string(),
            quiz_id: None,
            subject: "Web Development".to_string(),
            assignment: "Midterm".to_string(),
            score,
            max_score,
            feedback: None,
            graded_by: "teacher1".to_string(),
            created_at: Utc::now().into(),
        }
    }

    fn record_input(score: i32, max_score: i32) -> RecordGradeInput {
        RecordGradeInput {
            student_id: "stu1".to_string(),
            quiz_id: None,
            subject: "Web Development".to_string(),
            assignment: "Midterm".to_string(),
            score,
            max_score,
            feedback: None,
        }
    }

    fn service(db: sea_orm::DatabaseConnection) -> GradeService {
        GradeService::new(GradeRepository::new(Arc::new(db)))
    }

    #[test]
    fn test_letter_grade_boundaries() {
        assert_eq!(letter_grade(95.0), 'A');
        assert_eq!(letter_grade(90.0), 'A');
        assert_eq!(letter_grade(89.9), 'B');
        assert_eq!(letter_grade(70.0), 'C');
        assert_eq!(letter_grade(60.0), 'D');
        assert_eq!(letter_grade(59.9), 'F');
    }

    #[tokio::test]
    async fn test_record_rejects_score_above_maximum() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let result = service(db).record("teacher1", record_input(110, 100)).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_record_grade() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_grade("g1", 87, 100)]])
            .into_connection();

        let result = service(db)
            .record("teacher1", record_input(87, 100))
            .await
            .unwrap();

        assert_eq!(result.score, 87);
    }

    #[tokio::test]
    async fn test_summary_averages_across_assignments() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_grade("g1", 90, 100), test_grade("g2", 30, 50)]])
            .into_connection();

        let summary = service(db).summary("stu1").await.unwrap();

        assert_eq!(summary.graded_count, 2);
        assert!((summary.percentage - 80.0).abs() < f64::EPSILON);
        assert_eq!(summary.letter, 'B');
    }

    #[tokio::test]
    async fn test_summary_with_no_grades() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<grade::Model>::new()])
            .into_connection();

        let summary = service(db).summary("stu1").await.unwrap();

        assert_eq!(summary.graded_count, 0);
        assert_eq!(summary.letter, 'F');
    }
}
