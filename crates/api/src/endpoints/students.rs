//! Student directory endpoints.

use axum::{Json, Router, extract::State, routing::post};
use campus_common::{AppError, AppResult};
use campus_db::entities::{
    student_profile::{self, EnrollmentStatus},
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

/// Wire representation of a student extension.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfileResponse {
    pub program_id: String,
    pub enrollment_status: EnrollmentStatus,
    pub date_of_birth: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
}

impl From<student_profile::Model> for StudentProfileResponse {
    fn from(profile: student_profile::Model) -> Self {
        Self {
            program_id: profile.program_id,
            enrollment_status: profile.enrollment_status,
            date_of_birth: profile.date_of_birth.map(|d| d.to_string()),
            address: profile.address,
            city: profile.city,
            country: profile.country,
            emergency_contact_name: profile.emergency_contact_name,
            emergency_contact_phone: profile.emergency_contact_phone,
        }
    }
}

/// A student with their extension.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub profile: StudentProfileResponse,
}

/// List students request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListStudentsRequest {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

/// List students (admin and teacher).
async fn list_students(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<ListStudentsRequest>,
) -> AppResult<ApiResponse<Vec<UserResponse>>> {
    if user.role == Role::Student {
        return Err(AppError::Forbidden(
            "Students cannot browse the student directory".to_string(),
        ));
    }

    let students = state
        .user_service
        .list(
            Role::Student,
            req.search.as_deref(),
            req.limit.min(100),
            req.offset,
        )
        .await?;

    Ok(ApiResponse::ok(
        students.into_iter().map(Into::into).collect(),
    ))
}

/// Show student request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowStudentRequest {
    pub student_id: String,
}

/// Show one student with their extension (admin and teacher).
async fn show_student(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<ShowStudentRequest>,
) -> AppResult<ApiResponse<StudentResponse>> {
    if user.role == Role::Student {
        return Err(AppError::Forbidden(
            "Students cannot browse the student directory".to_string(),
        ));
    }

    let record = state.user_service.get_student(&req.student_id).await?;

    Ok(ApiResponse::ok(StudentResponse {
        user: record.user.into(),
        profile: record.profile.into(),
    }))
}

/// Update enrollment status request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEnrollmentRequest {
    pub student_id: String,
    pub status: EnrollmentStatus,
}

/// Change a student's enrollment status (admin only).
async fn update_enrollment(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<UpdateEnrollmentRequest>,
) -> AppResult<ApiResponse<StudentProfileResponse>> {
    if user.role != Role::Admin {
        return Err(AppError::Forbidden(
            "Only admins can change enrollment status".to_string(),
        ));
    }

    let profile = state
        .user_service
        .set_enrollment_status(&req.student_id, req.status)
        .await?;

    Ok(ApiResponse::ok(profile.into()))
}

/// Suspend/unsuspend request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuspendRequest {
    pub user_id: String,
}

/// Suspend an account (admin only).
async fn suspend(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<SuspendRequest>,
) -> AppResult<ApiResponse<UserResponse>> {
    if user.role != Role::Admin {
        return Err(AppError::Forbidden(
            "Only admins can suspend accounts".to_string(),
        ));
    }

    let updated = state.user_service.set_suspended(&req.user_id, true).await?;

    Ok(ApiResponse::ok(updated.into()))
}

/// Unsuspend an account (admin only).
async fn unsuspend(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<SuspendRequest>,
) -> AppResult<ApiResponse<UserResponse>> {
    if user.role != Role::Admin {
        return Err(AppError::Forbidden(
            "Only admins can unsuspend accounts".to_string(),
        ));
    }

    let updated = state
        .user_service
        .set_suspended(&req.user_id, false)
        .await?;

    Ok(ApiResponse::ok(updated.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", post(list_students))
        .route("/show", post(show_student))
        .route("/update-enrollment", post(update_enrollment))
        .route("/suspend", post(suspend))
        .route("/unsuspend", post(unsuspend))
}
