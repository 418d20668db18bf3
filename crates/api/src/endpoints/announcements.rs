//! Announcement endpoints.

use axum::{Json, Router, extract::State, routing::post};
use campus_common::{AppError, AppResult};
use campus_core::CreateAnnouncementInput;
use campus_db::entities::{
    announcement::{self, Audience, Priority},
    user::Role,
};
use serde::{Deserialize, Serialize};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

const fn default_limit() -> u64 {
    50
}

/// Wire representation of an announcement.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementResponse {
    pub id: String,
    pub title: String,
    pub body: String,
    pub priority: Priority,
    pub audience: Audience,
    pub program_id: Option<String>,
    pub author_id: String,
    pub starts_at: Option<String>,
    pub ends_at: Option<String>,
    pub created_at: String,
}

impl From<announcement::Model> for AnnouncementResponse {
    fn from(announcement: announcement::Model) -> Self {
        Self {
            id: announcement.id,
            title: announcement.title,
            body: announcement.body,
            priority: announcement.priority,
            audience: announcement.audience,
            program_id: announcement.program_id,
            author_id: announcement.author_id,
            starts_at: announcement.starts_at.map(|t| t.to_rfc3339()),
            ends_at: announcement.ends_at.map(|t| t.to_rfc3339()),
            created_at: announcement.created_at.to_rfc3339(),
        }
    }
}

/// List announcements visible to the caller.
async fn list_visible(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<AnnouncementResponse>>> {
    // Program-scoped announcements only apply to students, keyed by
    // their enrolled program.
    let program_id = if user.role == Role::Student {
        let record = state.user_service.get_student(&user.id).await?;
        Some(record.profile.program_id)
    } else {
        None
    };

    let announcements = state
        .announcement_service
        .visible_to(user.role, program_id.as_deref())
        .await?;

    Ok(ApiResponse::ok(
        announcements.into_iter().map(Into::into).collect(),
    ))
}

/// List-all request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAllRequest {
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

/// List every announcement regardless of audience (admin only).
async fn list_all(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<ListAllRequest>,
) -> AppResult<ApiResponse<Vec<AnnouncementResponse>>> {
    if user.role != Role::Admin {
        return Err(AppError::Forbidden(
            "Only admins can list all announcements".to_string(),
        ));
    }

    let announcements = state
        .announcement_service
        .list_all(req.limit.min(100), req.offset)
        .await?;

    Ok(ApiResponse::ok(
        announcements.into_iter().map(Into::into).collect(),
    ))
}

/// Create announcement request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnnouncementRequest {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub audience: Audience,
    pub program_id: Option<String>,
    pub starts_at: Option<chrono::DateTime<chrono::Utc>>,
    pub ends_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Create an announcement (admin or teacher).
async fn create_announcement(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreateAnnouncementRequest>,
) -> AppResult<ApiResponse<AnnouncementResponse>> {
    if user.role == Role::Student {
        return Err(AppError::Forbidden(
            "Students cannot post announcements".to_string(),
        ));
    }

    let announcement = state
        .announcement_service
        .create(
            &user.id,
            CreateAnnouncementInput {
                title: req.title,
                body: req.body,
                priority: req.priority,
                audience: req.audience,
                program_id: req.program_id,
                starts_at: req.starts_at,
                ends_at: req.ends_at,
            },
        )
        .await?;

    Ok(ApiResponse::ok(announcement.into()))
}

/// Show announcement request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowAnnouncementRequest {
    pub announcement_id: String,
}

/// Show one announcement.
async fn show_announcement(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<ShowAnnouncementRequest>,
) -> AppResult<ApiResponse<AnnouncementResponse>> {
    let announcement = state
        .announcement_service
        .get(&req.announcement_id)
        .await?;

    Ok(ApiResponse::ok(announcement.into()))
}

/// Delete announcement request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAnnouncementRequest {
    pub announcement_id: String,
}

/// Delete an announcement (admin, or the authoring teacher).
async fn delete_announcement(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<DeleteAnnouncementRequest>,
) -> AppResult<ApiResponse<serde_json::Value>> {
    state
        .announcement_service
        .delete(&req.announcement_id, &user.id, user.role)
        .await?;

    Ok(ApiResponse::ok(serde_json::json!({ "ok": true })))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", post(list_visible))
        .route("/list-all", post(list_all))
        .route("/show", post(show_announcement))
        .route("/create", post(create_announcement))
        .route("/delete", post(delete_announcement))
}
