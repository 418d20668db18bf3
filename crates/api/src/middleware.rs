//! API middleware.

#![allow(missing_docs)]

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use campus_core::{
    AccountService, AnnouncementService, AttendanceService, FinanceService, GradeService,
    ProgramService, QuizService, RegistrationService, UserService,
};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub account_service: AccountService,
    pub registration_service: RegistrationService,
    pub user_service: UserService,
    pub program_service: ProgramService,
    pub announcement_service: AnnouncementService,
    pub attendance_service: AttendanceService,
    pub finance_service: FinanceService,
    pub quiz_service: QuizService,
    pub grade_service: GradeService,
}

/// Authentication middleware.
///
/// Resolves a bearer token to its user and stores it in the request
/// extensions; handlers pull it back out through the `AuthUser` extractor.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
        && let Ok(user) = state.account_service.authenticate(token).await
    {
        req.extensions_mut().insert(user);
    }

    next.run(req).await
}
