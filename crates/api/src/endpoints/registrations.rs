//! Registration application endpoints.
//!
//! `/apply` is the public intake; the review endpoints are admin-only.

use axum::{Json, Router, extract::State, routing::post};
use campus_common::{AppError, AppResult};
use campus_core::SubmitApplicationInput;
use campus_db::entities::registration_application::{
    self, ApplicationStatus, RequestedRole,
};
use campus_db::entities::user::Role;
use serde::{Deserialize, Serialize};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

const fn default_limit() -> u64 {
    50
}

/// Wire representation of a registration application.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub requested_role: RequestedRole,
    pub program_id: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub specialization: Option<String>,
    pub qualifications: Option<String>,
    pub experience_years: Option<i32>,
    pub status: ApplicationStatus,
    pub reviewed_by: Option<String>,
    pub reviewed_at: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
}

impl From<registration_application::Model> for ApplicationResponse {
    fn from(application: registration_application::Model) -> Self {
        Self {
            id: application.id,
            email: application.email,
            first_name: application.first_name,
            last_name: application.last_name,
            requested_role: application.requested_role,
            program_id: application.program_id,
            phone: application.phone,
            date_of_birth: application.date_of_birth.map(|d| d.to_string()),
            address: application.address,
            city: application.city,
            country: application.country,
            emergency_contact_name: application.emergency_contact_name,
            emergency_contact_phone: application.emergency_contact_phone,
            specialization: application.specialization,
            qualifications: application.qualifications,
            experience_years: application.experience_years,
            status: application.status,
            reviewed_by: application.reviewed_by,
            reviewed_at: application.reviewed_at.map(|t| t.to_rfc3339()),
            notes: application.notes,
            created_at: application.created_at.to_rfc3339(),
        }
    }
}

/// Apply request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub role: RequestedRole,
    pub program_id: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<chrono::NaiveDate>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub specialization: Option<String>,
    pub qualifications: Option<String>,
    pub experience_years: Option<i32>,
}

/// Apply response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyResponse {
    pub id: String,
    pub status: ApplicationStatus,
}

/// Submit a registration application (public).
async fn apply(
    State(state): State<AppState>,
    Json(req): Json<ApplyRequest>,
) -> AppResult<ApiResponse<ApplyResponse>> {
    let input = SubmitApplicationInput {
        email: req.email,
        first_name: req.first_name,
        last_name: req.last_name,
        password: req.password,
        requested_role: req.role,
        program_id: req.program_id,
        phone: req.phone,
        date_of_birth: req.date_of_birth,
        address: req.address,
        city: req.city,
        country: req.country,
        emergency_contact_name: req.emergency_contact_name,
        emergency_contact_phone: req.emergency_contact_phone,
        specialization: req.specialization,
        qualifications: req.qualifications,
        experience_years: req.experience_years,
    };

    let application = state.registration_service.submit(input).await?;

    Ok(ApiResponse::ok(ApplyResponse {
        id: application.id,
        status: application.status,
    }))
}

/// List applications request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListApplicationsRequest {
    #[serde(default)]
    pub status: Option<ApplicationStatus>,
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

/// List registration applications (admin only).
async fn list_applications(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<ListApplicationsRequest>,
) -> AppResult<ApiResponse<Vec<ApplicationResponse>>> {
    if user.role != Role::Admin {
        return Err(AppError::Forbidden(
            "Only admins can view registration applications".to_string(),
        ));
    }

    let applications = state
        .registration_service
        .list(req.status, req.limit.min(100), req.offset)
        .await?;

    Ok(ApiResponse::ok(
        applications.into_iter().map(Into::into).collect(),
    ))
}

/// Approve/Reject request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewApplicationRequest {
    pub application_id: String,
    pub notes: Option<String>,
}

/// Approve an application and provision the account (admin only).
async fn approve_application(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<ReviewApplicationRequest>,
) -> AppResult<ApiResponse<ApplicationResponse>> {
    if user.role != Role::Admin {
        return Err(AppError::Forbidden(
            "Only admins can approve registration applications".to_string(),
        ));
    }

    let application = state
        .registration_service
        .approve(&req.application_id, &user.id, req.notes.as_deref())
        .await?;

    Ok(ApiResponse::ok(application.into()))
}

/// Reject an application (admin only).
async fn reject_application(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<ReviewApplicationRequest>,
) -> AppResult<ApiResponse<ApplicationResponse>> {
    if user.role != Role::Admin {
        return Err(AppError::Forbidden(
            "Only admins can reject registration applications".to_string(),
        ));
    }

    let application = state
        .registration_service
        .reject(&req.application_id, &user.id, req.notes.as_deref())
        .await?;

    Ok(ApiResponse::ok(application.into()))
}

/// Pending-count response (for the admin dashboard badge).
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingCountResponse {
    pub count: u64,
}

/// Count pending applications (admin only).
async fn count_pending(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<PendingCountResponse>> {
    if user.role != Role::Admin {
        return Err(AppError::Forbidden(
            "Only admins can view registration applications".to_string(),
        ));
    }

    let count = state.registration_service.count_pending().await?;

    Ok(ApiResponse::ok(PendingCountResponse { count }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/apply", post(apply))
        .route("/list", post(list_applications))
        .route("/approve", post(approve_application))
        .route("/reject", post(reject_application))
        .route("/count-pending", post(count_pending))
}
