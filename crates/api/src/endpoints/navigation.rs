//! Navigation endpoints: the role-scoped route resolver for the shell.

use axum::{
    Json, Router,
    routing::{get, post},
};
use campus_common::AppResult;
use campus_core::{NavEntry, Resolution, nav_entries, resolve};
use serde::Deserialize;

use crate::{
    extractors::{AuthUser, MaybeAuthUser},
    middleware::AppState,
    response::ApiResponse,
};

/// The caller's navigation rail.
async fn entries(AuthUser(user): AuthUser) -> AppResult<ApiResponse<Vec<NavEntry>>> {
    Ok(ApiResponse::ok(nav_entries(user.role).to_vec()))
}

/// Resolve request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveRequest {
    pub path: String,
}

/// Resolve a path for the caller's role.
///
/// Works unauthenticated too: without a session every path resolves to
/// the login entry point.
async fn resolve_path(
    MaybeAuthUser(user): MaybeAuthUser,
    Json(req): Json<ResolveRequest>,
) -> AppResult<ApiResponse<Resolution>> {
    let role = user.map(|u| u.role);
    Ok(ApiResponse::ok(resolve(role, &req.path)))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/entries", get(entries))
        .route("/resolve", post(resolve_path))
}
