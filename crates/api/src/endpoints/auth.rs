//! Authentication endpoints.

use axum::{
    Json, Router,
    extract::State,
    http::HeaderMap,
    routing::{get, post},
};
use campus_common::{AppError, AppResult};
use campus_db::entities::user;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Wire representation of a user.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: user::Role,
    pub avatar_url: Option<String>,
}

impl From<user::Model> for UserResponse {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
            avatar_url: user.avatar_url,
        }
    }
}

/// Login request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1, max = 128))]
    pub password: String,

    /// The role tab selected on the login form.
    pub role: user::Role,
}

/// Login response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: UserResponse,
    pub token: String,
    pub expires_at: String,
}

/// Sign in and start a session.
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<ApiResponse<LoginResponse>> {
    req.validate()?;

    let (user, session) = state
        .account_service
        .login(&req.email, &req.password, req.role)
        .await?;

    Ok(ApiResponse::ok(LoginResponse {
        user: user.into(),
        token: session.token,
        expires_at: session.expires_at.to_rfc3339(),
    }))
}

/// Logout response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutResponse {
    pub ok: bool,
}

/// Sign out (invalidate the presented session token).
async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<ApiResponse<LogoutResponse>> {
    let token = bearer_token(&headers).ok_or(AppError::Unauthorized)?;

    state.account_service.logout(token).await?;

    Ok(ApiResponse::ok(LogoutResponse { ok: true }))
}

/// Session response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user: UserResponse,
    pub expires_at: String,
}

/// Current session, for the shell's session restore.
async fn session(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<ApiResponse<SessionResponse>> {
    let token = bearer_token(&headers).ok_or(AppError::Unauthorized)?;

    let (user, session) = state.account_service.current_session(token).await?;

    Ok(ApiResponse::ok(SessionResponse {
        user: user.into(),
        expires_at: session.expires_at.to_rfc3339(),
    }))
}

/// Update-profile request (the Settings screen).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar_url: Option<String>,
}

/// Update the caller's own name or avatar.
async fn update_profile(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<UpdateProfileRequest>,
) -> AppResult<ApiResponse<UserResponse>> {
    let updated = state
        .user_service
        .update(
            &user.id,
            campus_core::UpdateUserInput {
                first_name: req.first_name,
                last_name: req.last_name,
                avatar_url: req.avatar_url,
            },
        )
        .await?;

    Ok(ApiResponse::ok(updated.into()))
}

/// Extract the bearer token from the Authorization header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/session", get(session))
        .route("/update-profile", post(update_profile))
}
