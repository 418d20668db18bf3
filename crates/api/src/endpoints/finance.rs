//! Finance endpoints.

use axum::{Json, Router, extract::State, routing::post};
use campus_common::{AppError, AppResult};
use campus_core::IssueInvoiceInput;
use campus_db::entities::{
    invoice::{self, InvoiceStatus},
    user::Role,
};
use serde::{Deserialize, Serialize};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

const fn default_limit() -> u64 {
    50
}

/// Wire representation of an invoice.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceResponse {
    pub id: String,
    pub student_id: String,
    pub amount_cents: i64,
    pub status: InvoiceStatus,
    pub issued_on: String,
    pub due_on: String,
    pub paid_at: Option<String>,
}

impl From<invoice::Model> for InvoiceResponse {
    fn from(invoice: invoice::Model) -> Self {
        Self {
            id: invoice.id,
            student_id: invoice.student_id,
            amount_cents: invoice.amount_cents,
            status: invoice.status,
            issued_on: invoice.issued_on.to_string(),
            due_on: invoice.due_on.to_string(),
            paid_at: invoice.paid_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// Issue request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueRequest {
    pub student_id: String,
    pub amount_cents: i64,
    pub due_on: chrono::NaiveDate,
}

/// Issue an invoice (admin only).
async fn issue(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<IssueRequest>,
) -> AppResult<ApiResponse<InvoiceResponse>> {
    if user.role != Role::Admin {
        return Err(AppError::Forbidden(
            "Only admins can issue invoices".to_string(),
        ));
    }

    let invoice = state
        .finance_service
        .issue(IssueInvoiceInput {
            student_id: req.student_id,
            amount_cents: req.amount_cents,
            due_on: req.due_on,
        })
        .await?;

    Ok(ApiResponse::ok(invoice.into()))
}

/// List request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListInvoicesRequest {
    #[serde(default)]
    pub status: Option<InvoiceStatus>,
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

/// List invoices (admin only).
async fn list_invoices(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<ListInvoicesRequest>,
) -> AppResult<ApiResponse<Vec<InvoiceResponse>>> {
    if user.role != Role::Admin {
        return Err(AppError::Forbidden(
            "Only admins can list invoices".to_string(),
        ));
    }

    let invoices = state
        .finance_service
        .list(req.status, req.limit.min(100), req.offset)
        .await?;

    Ok(ApiResponse::ok(
        invoices.into_iter().map(Into::into).collect(),
    ))
}

/// The caller's own invoices (students).
async fn my_invoices(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<InvoiceResponse>>> {
    if user.role != Role::Student {
        return Err(AppError::Forbidden(
            "Only students have their own invoices".to_string(),
        ));
    }

    let invoices = state.finance_service.list_for_student(&user.id).await?;

    Ok(ApiResponse::ok(
        invoices.into_iter().map(Into::into).collect(),
    ))
}

/// Mark-paid request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkPaidRequest {
    pub invoice_id: String,
}

/// Mark an invoice paid (admin only).
async fn mark_paid(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<MarkPaidRequest>,
) -> AppResult<ApiResponse<InvoiceResponse>> {
    if user.role != Role::Admin {
        return Err(AppError::Forbidden(
            "Only admins can mark invoices paid".to_string(),
        ));
    }

    let invoice = state.finance_service.mark_paid(&req.invoice_id).await?;

    Ok(ApiResponse::ok(invoice.into()))
}

/// Overdue sweep response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepResponse {
    pub flipped: u64,
}

/// Flip pending invoices past due to overdue (admin only).
async fn sweep_overdue(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<SweepResponse>> {
    if user.role != Role::Admin {
        return Err(AppError::Forbidden(
            "Only admins can run the overdue sweep".to_string(),
        ));
    }

    let flipped = state.finance_service.sweep_overdue().await?;

    Ok(ApiResponse::ok(SweepResponse { flipped }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/issue", post(issue))
        .route("/list", post(list_invoices))
        .route("/mine", post(my_invoices))
        .route("/mark-paid", post(mark_paid))
        .route("/sweep-overdue", post(sweep_overdue))
}
