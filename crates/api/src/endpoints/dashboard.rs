//! Dashboard endpoints: headline counts for the admin landing screen.

use axum::{Router, extract::State, routing::post};
use campus_common::{AppError, AppResult};
use campus_db::entities::user::Role;
use serde::Serialize;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Headline counts for the admin dashboard.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStatsResponse {
    pub students: u64,
    pub teachers: u64,
    pub pending_applications: u64,
    pub announcements: u64,
}

/// Admin dashboard stats.
async fn admin_stats(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<AdminStatsResponse>> {
    if user.role != Role::Admin {
        return Err(AppError::Forbidden(
            "Only admins can view dashboard stats".to_string(),
        ));
    }

    let students = state.user_service.count(Role::Student).await?;
    let teachers = state.user_service.count(Role::Teacher).await?;
    let pending_applications = state.registration_service.count_pending().await?;
    let announcements = state.announcement_service.count().await?;

    Ok(ApiResponse::ok(AdminStatsResponse {
        students,
        teachers,
        pending_applications,
        announcements,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/stats", post(admin_stats))
}
