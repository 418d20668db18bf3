//! Quiz endpoints.

use axum::{Json, Router, extract::State, routing::post};
use campus_common::{AppError, AppResult};
use campus_core::CreateQuizInput;
use campus_db::entities::{
    quiz::{self, QuizStatus},
    user::Role,
};
use serde::{Deserialize, Serialize};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

const fn default_limit() -> u64 {
    50
}

/// Wire representation of a quiz.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResponse {
    pub id: String,
    pub title: String,
    pub program_id: String,
    pub status: QuizStatus,
    pub scheduled_on: String,
    pub duration_minutes: Option<i32>,
    pub total_points: i32,
    pub created_by: String,
}

impl From<quiz::Model> for QuizResponse {
    fn from(quiz: quiz::Model) -> Self {
        Self {
            id: quiz.id,
            title: quiz.title,
            program_id: quiz.program_id,
            status: quiz.status,
            scheduled_on: quiz.scheduled_on.to_string(),
            duration_minutes: quiz.duration_minutes,
            total_points: quiz.total_points,
            created_by: quiz.created_by,
        }
    }
}

fn require_staff(role: Role) -> AppResult<()> {
    if role == Role::Student {
        return Err(AppError::Forbidden(
            "Only teachers and admins can manage quizzes".to_string(),
        ));
    }
    Ok(())
}

/// Create quiz request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuizRequest {
    pub title: String,
    pub program_id: String,
    pub scheduled_on: chrono::NaiveDate,
    pub duration_minutes: Option<i32>,
    pub total_points: i32,
}

/// Create a quiz (teacher or admin).
async fn create_quiz(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreateQuizRequest>,
) -> AppResult<ApiResponse<QuizResponse>> {
    require_staff(user.role)?;

    let quiz = state
        .quiz_service
        .create(
            &user.id,
            CreateQuizInput {
                title: req.title,
                program_id: req.program_id,
                scheduled_on: req.scheduled_on,
                duration_minutes: req.duration_minutes,
                total_points: req.total_points,
            },
        )
        .await?;

    Ok(ApiResponse::ok(quiz.into()))
}

/// List quizzes request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuizzesRequest {
    #[serde(default)]
    pub program_id: Option<String>,
    #[serde(default)]
    pub status: Option<QuizStatus>,
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

/// List quizzes (teacher or admin).
async fn list_quizzes(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<ListQuizzesRequest>,
) -> AppResult<ApiResponse<Vec<QuizResponse>>> {
    require_staff(user.role)?;

    let quizzes = state
        .quiz_service
        .list(
            req.program_id.as_deref(),
            req.status,
            req.limit.min(100),
            req.offset,
        )
        .await?;

    Ok(ApiResponse::ok(
        quizzes.into_iter().map(Into::into).collect(),
    ))
}

/// Show quiz request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowQuizRequest {
    pub quiz_id: String,
}

/// Show one quiz (teacher or admin).
async fn show_quiz(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<ShowQuizRequest>,
) -> AppResult<ApiResponse<QuizResponse>> {
    require_staff(user.role)?;

    let quiz = state.quiz_service.get(&req.quiz_id).await?;

    Ok(ApiResponse::ok(quiz.into()))
}

/// Set-status request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetQuizStatusRequest {
    pub quiz_id: String,
    pub status: QuizStatus,
}

/// Advance a quiz's status (teacher or admin).
async fn set_status(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<SetQuizStatusRequest>,
) -> AppResult<ApiResponse<QuizResponse>> {
    require_staff(user.role)?;

    let quiz = state
        .quiz_service
        .set_status(&req.quiz_id, req.status)
        .await?;

    Ok(ApiResponse::ok(quiz.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_quiz))
        .route("/list", post(list_quizzes))
        .route("/show", post(show_quiz))
        .route("/set-status", post(set_status))
}
