//! Teacher directory endpoints (admin only).

use axum::{Json, Router, extract::State, routing::post};
use campus_common::{AppError, AppResult};
use campus_db::entities::{
    teacher_profile::{self, EmploymentStatus},
    user::Role,
};
use serde::{Deserialize, Serialize};

use crate::{
    endpoints::auth::UserResponse, extractors::AuthUser, middleware::AppState,
    response::ApiResponse,
};

const fn default_limit() -> u64 {
    50
}

/// Wire representation of a teacher extension.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherProfileResponse {
    pub specialization: String,
    pub qualifications: Option<String>,
    pub experience_years: i32,
    pub employment_status: EmploymentStatus,
}

impl From<teacher_profile::Model> for TeacherProfileResponse {
    fn from(profile: teacher_profile::Model) -> Self {
        Self {
            specialization: profile.specialization,
            qualifications: profile.qualifications,
            experience_years: profile.experience_years,
            employment_status: profile.employment_status,
        }
    }
}

/// A teacher with their extension.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub profile: TeacherProfileResponse,
}

/// List teachers request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTeachersRequest {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

/// List teachers (admin only).
async fn list_teachers(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<ListTeachersRequest>,
) -> AppResult<ApiResponse<Vec<UserResponse>>> {
    if user.role != Role::Admin {
        return Err(AppError::Forbidden(
            "Only admins can browse the teacher directory".to_string(),
        ));
    }

    let teachers = state
        .user_service
        .list(
            Role::Teacher,
            req.search.as_deref(),
            req.limit.min(100),
            req.offset,
        )
        .await?;

    Ok(ApiResponse::ok(
        teachers.into_iter().map(Into::into).collect(),
    ))
}

/// Show teacher request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowTeacherRequest {
    pub teacher_id: String,
}

/// Show one teacher with their extension (admin only).
async fn show_teacher(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<ShowTeacherRequest>,
) -> AppResult<ApiResponse<TeacherResponse>> {
    if user.role != Role::Admin {
        return Err(AppError::Forbidden(
            "Only admins can browse the teacher directory".to_string(),
        ));
    }

    let record = state.user_service.get_teacher(&req.teacher_id).await?;

    Ok(ApiResponse::ok(TeacherResponse {
        user: record.user.into(),
        profile: record.profile.into(),
    }))
}

/// Update employment status request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmploymentRequest {
    pub teacher_id: String,
    pub status: EmploymentStatus,
}

/// Change a teacher's employment status (admin only).
async fn update_employment(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<UpdateEmploymentRequest>,
) -> AppResult<ApiResponse<TeacherProfileResponse>> {
    if user.role != Role::Admin {
        return Err(AppError::Forbidden(
            "Only admins can change employment status".to_string(),
        ));
    }

    let profile = state
        .user_service
        .set_employment_status(&req.teacher_id, req.status)
        .await?;

    Ok(ApiResponse::ok(profile.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", post(list_teachers))
        .route("/show", post(show_teacher))
        .route("/update-employment", post(update_employment))
}
