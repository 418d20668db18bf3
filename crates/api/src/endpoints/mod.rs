//! API endpoints.

mod announcements;
mod attendance;
mod auth;
mod dashboard;
mod finance;
mod grades;
mod navigation;
mod programs;
mod quizzes;
mod registrations;
mod students;
mod teachers;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/dashboard", dashboard::router())
        .nest("/registrations", registrations::router())
        .nest("/navigation", navigation::router())
        .nest("/students", students::router())
        .nest("/teachers", teachers::router())
        .nest("/programs", programs::router())
        .nest("/announcements", announcements::router())
        .nest("/attendance", attendance::router())
        .nest("/finance", finance::router())
        .nest("/quizzes", quizzes::router())
        .nest("/grades", grades::router())
}
