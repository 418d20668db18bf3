//! Attendance endpoints.

use axum::{Json, Router, extract::State, routing::post};
use campus_common::{AppError, AppResult};
use campus_core::{AttendanceService, AttendanceSummary, MarkAttendanceInput};
use campus_db::entities::{
    attendance_record::{self, AttendanceStatus},
    user::Role,
};
use serde::{Deserialize, Serialize};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

const fn default_limit() -> u64 {
    50
}

/// Wire representation of an attendance record.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceResponse {
    pub id: String,
    pub student_id: String,
    pub date: String,
    pub status: AttendanceStatus,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub notes: Option<String>,
}

impl From<attendance_record::Model> for AttendanceResponse {
    fn from(record: attendance_record::Model) -> Self {
        Self {
            id: record.id,
            student_id: record.student_id,
            date: record.date.to_string(),
            status: record.status,
            check_in: record.check_in.map(|t| t.format("%H:%M").to_string()),
            check_out: record.check_out.map(|t| t.format("%H:%M").to_string()),
            notes: record.notes,
        }
    }
}

/// Mark request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkRequest {
    pub student_id: String,
    pub date: chrono::NaiveDate,
    pub status: AttendanceStatus,
    pub check_in: Option<chrono::NaiveTime>,
    pub check_out: Option<chrono::NaiveTime>,
    pub notes: Option<String>,
}

impl From<MarkRequest> for MarkAttendanceInput {
    fn from(req: MarkRequest) -> Self {
        Self {
            student_id: req.student_id,
            date: req.date,
            status: req.status,
            check_in: req.check_in,
            check_out: req.check_out,
            notes: req.notes,
        }
    }
}

/// Mark one student's attendance (admin only).
async fn mark(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<MarkRequest>,
) -> AppResult<ApiResponse<AttendanceResponse>> {
    if user.role != Role::Admin {
        return Err(AppError::Forbidden(
            "Only admins can mark attendance".to_string(),
        ));
    }

    let record = state.attendance_service.mark(req.into()).await?;

    Ok(ApiResponse::ok(record.into()))
}

/// Bulk mark request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkBulkRequest {
    pub records: Vec<MarkRequest>,
}

/// Mark a whole class for a day (admin only).
async fn mark_bulk(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<MarkBulkRequest>,
) -> AppResult<ApiResponse<Vec<AttendanceResponse>>> {
    if user.role != Role::Admin {
        return Err(AppError::Forbidden(
            "Only admins can mark attendance".to_string(),
        ));
    }

    let records = state
        .attendance_service
        .mark_bulk(req.records.into_iter().map(Into::into).collect())
        .await?;

    Ok(ApiResponse::ok(
        records.into_iter().map(Into::into).collect(),
    ))
}

/// Sheet request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetRequest {
    pub date: chrono::NaiveDate,
}

/// The attendance sheet for a day (admin only).
async fn sheet(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<SheetRequest>,
) -> AppResult<ApiResponse<Vec<AttendanceResponse>>> {
    if user.role != Role::Admin {
        return Err(AppError::Forbidden(
            "Only admins can view the attendance sheet".to_string(),
        ));
    }

    let records = state.attendance_service.sheet_for_date(req.date).await?;

    Ok(ApiResponse::ok(
        records.into_iter().map(Into::into).collect(),
    ))
}

/// History request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRequest {
    pub student_id: String,
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

/// A student's attendance history (staff, or the student themselves).
async fn history(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<HistoryRequest>,
) -> AppResult<ApiResponse<Vec<AttendanceResponse>>> {
    if !AttendanceService::may_view(&user.id, user.role, &req.student_id) {
        return Err(AppError::Forbidden(
            "Students can only view their own attendance".to_string(),
        ));
    }

    let records = state
        .attendance_service
        .history(&req.student_id, req.limit.min(100), req.offset)
        .await?;

    Ok(ApiResponse::ok(
        records.into_iter().map(Into::into).collect(),
    ))
}

/// Summary request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRequest {
    pub student_id: String,
}

/// Per-status tallies for a student (staff, or the student themselves).
async fn summary(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<SummaryRequest>,
) -> AppResult<ApiResponse<AttendanceSummary>> {
    if !AttendanceService::may_view(&user.id, user.role, &req.student_id) {
        return Err(AppError::Forbidden(
            "Students can only view their own attendance".to_string(),
        ));
    }

    let summary = state.attendance_service.summary(&req.student_id).await?;

    Ok(ApiResponse::ok(summary))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/mark", post(mark))
        .route("/mark-bulk", post(mark_bulk))
        .route("/sheet", post(sheet))
        .route("/history", post(history))
        .route("/summary", post(summary))
}
