//! Grade endpoints.

use axum::{Json, Router, extract::State, routing::post};
use campus_common::{AppError, AppResult};
use campus_core::{GradeSummary, RecordGradeInput};
use campus_db::entities::{grade, user::Role};
use serde::{Deserialize, Serialize};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

const fn default_limit() -> u64 {
    50
}

/// Wire representation of a grade.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeResponse {
    pub id: String,
    pub student_id: String,
    pub quiz_id: Option<String>,
    pub subject: String,
    pub assignment: String,
    pub score: i32,
    pub max_score: i32,
    pub feedback: Option<String>,
    pub created_at: String,
}

impl From<grade::Model> for GradeResponse {
    fn from(grade: grade::Model) -> Self {
        Self {
            id: grade.id,
            student_id: grade.student_id,
            quiz_id: grade.quiz_id,
            subject: grade.subject,
            assignment: grade.assignment,
            score: grade.score,
            max_score: grade.max_score,
            feedback: grade.feedback,
            created_at: grade.created_at.to_rfc3339(),
        }
    }
}

/// Record grade request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordGradeRequest {
    pub student_id: String,
    pub quiz_id: Option<String>,
    pub subject: String,
    pub assignment: String,
    pub score: i32,
    pub max_score: i32,
    pub feedback: Option<String>,
}

/// Record a grade (teacher or admin).
async fn record_grade(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<RecordGradeRequest>,
) -> AppResult<ApiResponse<GradeResponse>> {
    if user.role == Role::Student {
        return Err(AppError::Forbidden(
            "Only teachers and admins can record grades".to_string(),
        ));
    }

    let grade = state
        .grade_service
        .record(
            &user.id,
            RecordGradeInput {
                student_id: req.student_id,
                quiz_id: req.quiz_id,
                subject: req.subject,
                assignment: req.assignment,
                score: req.score,
                max_score: req.max_score,
                feedback: req.feedback,
            },
        )
        .await?;

    Ok(ApiResponse::ok(grade.into()))
}

/// List grades request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListGradesRequest {
    pub student_id: String,
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

/// A student's grades (staff, or the student themselves).
async fn list_grades(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<ListGradesRequest>,
) -> AppResult<ApiResponse<Vec<GradeResponse>>> {
    if user.role == Role::Student && user.id != req.student_id {
        return Err(AppError::Forbidden(
            "Students can only view their own grades".to_string(),
        ));
    }

    let grades = state
        .grade_service
        .list_for_student(&req.student_id, req.limit.min(100), req.offset)
        .await?;

    Ok(ApiResponse::ok(
        grades.into_iter().map(Into::into).collect(),
    ))
}

/// By-quiz request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListByQuizRequest {
    pub quiz_id: String,
}

/// The grades recorded for a quiz (teacher or admin).
async fn list_by_quiz(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<ListByQuizRequest>,
) -> AppResult<ApiResponse<Vec<GradeResponse>>> {
    if user.role == Role::Student {
        return Err(AppError::Forbidden(
            "Only teachers and admins can view quiz results".to_string(),
        ));
    }

    let grades = state.grade_service.list_for_quiz(&req.quiz_id).await?;

    Ok(ApiResponse::ok(
        grades.into_iter().map(Into::into).collect(),
    ))
}

/// Summary request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeSummaryRequest {
    pub student_id: String,
}

/// A student's grade average (staff, or the student themselves).
async fn grade_summary(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<GradeSummaryRequest>,
) -> AppResult<ApiResponse<GradeSummary>> {
    if user.role == Role::Student && user.id != req.student_id {
        return Err(AppError::Forbidden(
            "Students can only view their own grades".to_string(),
        ));
    }

    let summary = state.grade_service.summary(&req.student_id).await?;

    Ok(ApiResponse::ok(summary))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/record", post(record_grade))
        .route("/list", post(list_grades))
        .route("/by-quiz", post(list_by_quiz))
        .route("/summary", post(grade_summary))
}
