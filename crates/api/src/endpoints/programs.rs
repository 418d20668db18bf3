//! Program endpoints.

use axum::{Json, Router, extract::State, routing::post};
use campus_common::{AppError, AppResult};
use campus_core::{CreateProgramInput, UpdateProgramInput};
use campus_db::entities::{program, user::Role};
use serde::{Deserialize, Serialize};

use crate::{
    endpoints::auth::UserResponse,
    endpoints::students::StudentProfileResponse,
    extractors::AuthUser,
    middleware::AppState,
    response::ApiResponse,
};

const fn default_limit() -> u64 {
    50
}

/// Wire representation of a program.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub duration_months: i32,
    pub price_cents: i64,
    pub capacity: i32,
    pub enrolled_count: i32,
    pub is_active: bool,
}

impl From<program::Model> for ProgramResponse {
    fn from(program: program::Model) -> Self {
        Self {
            id: program.id,
            name: program.name,
            description: program.description,
            duration_months: program.duration_months,
            price_cents: program.price_cents,
            capacity: program.capacity,
            enrolled_count: program.enrolled_count,
            is_active: program.is_active,
        }
    }
}

/// List programs request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProgramsRequest {
    #[serde(default)]
    pub active_only: bool,
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

/// List programs (any authenticated role).
async fn list_programs(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<ListProgramsRequest>,
) -> AppResult<ApiResponse<Vec<ProgramResponse>>> {
    let programs = state
        .program_service
        .list(req.active_only, req.limit.min(100), req.offset)
        .await?;

    Ok(ApiResponse::ok(
        programs.into_iter().map(Into::into).collect(),
    ))
}

/// Show program request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowProgramRequest {
    pub program_id: String,
}

/// Show one program (any authenticated role).
async fn show_program(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<ShowProgramRequest>,
) -> AppResult<ApiResponse<ProgramResponse>> {
    let program = state.program_service.get(&req.program_id).await?;

    Ok(ApiResponse::ok(program.into()))
}

/// Create program request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProgramRequest {
    pub name: String,
    pub description: Option<String>,
    pub duration_months: i32,
    pub price_cents: i64,
    pub capacity: i32,
}

/// Create a program (admin only).
async fn create_program(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreateProgramRequest>,
) -> AppResult<ApiResponse<ProgramResponse>> {
    if user.role != Role::Admin {
        return Err(AppError::Forbidden(
            "Only admins can create programs".to_string(),
        ));
    }

    let program = state
        .program_service
        .create(CreateProgramInput {
            name: req.name,
            description: req.description,
            duration_months: req.duration_months,
            price_cents: req.price_cents,
            capacity: req.capacity,
        })
        .await?;

    Ok(ApiResponse::ok(program.into()))
}

/// Update program request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProgramRequest {
    pub program_id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub duration_months: Option<i32>,
    pub price_cents: Option<i64>,
    pub capacity: Option<i32>,
}

/// Update a program (admin only).
async fn update_program(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<UpdateProgramRequest>,
) -> AppResult<ApiResponse<ProgramResponse>> {
    if user.role != Role::Admin {
        return Err(AppError::Forbidden(
            "Only admins can update programs".to_string(),
        ));
    }

    let program = state
        .program_service
        .update(
            &req.program_id,
            UpdateProgramInput {
                name: req.name,
                description: req.description,
                duration_months: req.duration_months,
                price_cents: req.price_cents,
                capacity: req.capacity,
            },
        )
        .await?;

    Ok(ApiResponse::ok(program.into()))
}

/// A roster entry: an enrolled student and their extension.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntryResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub profile: StudentProfileResponse,
}

/// The students enrolled in a program (admin and teacher).
async fn roster(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<ShowProgramRequest>,
) -> AppResult<ApiResponse<Vec<RosterEntryResponse>>> {
    if user.role == Role::Student {
        return Err(AppError::Forbidden(
            "Students cannot browse program rosters".to_string(),
        ));
    }

    let entries = state.program_service.roster(&req.program_id).await?;

    Ok(ApiResponse::ok(
        entries
            .into_iter()
            .map(|entry| RosterEntryResponse {
                user: entry.user.into(),
                profile: entry.profile.into(),
            })
            .collect(),
    ))
}

/// Deactivate a program (admin only).
async fn deactivate_program(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<ShowProgramRequest>,
) -> AppResult<ApiResponse<ProgramResponse>> {
    if user.role != Role::Admin {
        return Err(AppError::Forbidden(
            "Only admins can deactivate programs".to_string(),
        ));
    }

    let program = state.program_service.deactivate(&req.program_id).await?;

    Ok(ApiResponse::ok(program.into()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", post(list_programs))
        .route("/show", post(show_program))
        .route("/roster", post(roster))
        .route("/create", post(create_program))
        .route("/update", post(update_program))
        .route("/deactivate", post(deactivate_program))
}
