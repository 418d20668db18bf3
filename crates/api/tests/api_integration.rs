//! API integration tests.
//!
//! These tests verify the API endpoints work correctly together.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use campus_api::{middleware::AppState, router as api_router};
use campus_common::config::{Config, DatabaseConfig, ServerConfig, SessionConfig};
use campus_core::{
    AccountService, AnnouncementService, AttendanceService, FinanceService, GradeService,
    ProgramService, QuizService, RegistrationService, UserService,
};
use campus_db::repositories::{
    AnnouncementRepository, AttendanceRepository, GradeRepository, InvoiceRepository,
    ProgramRepository, QuizRepository, SessionRepository, StudentProfileRepository,
    TeacherProfileRepository, UserRepository, UserProfileRepository,
};
use chrono::Utc;
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult};
use std::sync::Arc;
use tower::ServiceExt;

/// Create a test configuration.
fn create_test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            url: "https://campus.example.com".to_string(),
        },
        database: DatabaseConfig {
            url: "postgres://localhost/test".to_string(),
            max_connections: 10,
            min_connections: 1,
        },
        session: SessionConfig { ttl_secs: 3600 },
    }
}

/// Create test app state over a mock database.
fn create_test_state(db: DatabaseConnection) -> AppState {
    let db = Arc::new(db);
    let config = create_test_config();

    let user_repo = UserRepository::new(Arc::clone(&db));
    let user_profile_repo = UserProfileRepository::new(Arc::clone(&db));
    let session_repo = SessionRepository::new(Arc::clone(&db));
    let student_profile_repo = StudentProfileRepository::new(Arc::clone(&db));
    let teacher_profile_repo = TeacherProfileRepository::new(Arc::clone(&db));
    let program_repo = ProgramRepository::new(Arc::clone(&db));
    let announcement_repo = AnnouncementRepository::new(Arc::clone(&db));
    let attendance_repo = AttendanceRepository::new(Arc::clone(&db));
    let invoice_repo = InvoiceRepository::new(Arc::clone(&db));
    let quiz_repo = QuizRepository::new(Arc::clone(&db));
    let grade_repo = GradeRepository::new(Arc::clone(&db));

    AppState {
        account_service: AccountService::new(
            user_repo.clone(),
            user_profile_repo,
            session_repo.clone(),
            &config,
        ),
        registration_service: RegistrationService::new(Arc::clone(&db)),
        user_service: UserService::new(
            user_repo.clone(),
            student_profile_repo.clone(),
            teacher_profile_repo,
            session_repo,
        ),
        program_service: ProgramService::new(program_repo.clone(), student_profile_repo, user_repo),
        announcement_service: AnnouncementService::new(announcement_repo),
        attendance_service: AttendanceService::new(attendance_repo),
        finance_service: FinanceService::new(invoice_repo),
        quiz_service: QuizService::new(quiz_repo, program_repo),
        grade_service: GradeService::new(grade_repo),
    }
}

fn app(db: DatabaseConnection) -> Router {
    api_router().with_state(create_test_state(db))
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn test_program_row(id: &str) -> campus_db::entities::program::Model {
    campus_db::entities::program::Model {
        id: id.to_string(),
        name: "Web Development".to_string(),
        description: None,
        duration_months: 8,
        price_cents: 320_000,
        capacity: 80,
        enrolled_count: 0,
        is_active: true,
        created_at: Utc::now().into(),
        updated_at: None,
    }
}

fn test_application_row(
    id: &str,
    email: &str,
) -> campus_db::entities::registration_application::Model {
    use campus_db::entities::registration_application::{
        ApplicationStatus, Model, RequestedRole,
    };
    Model {
        id: id.to_string(),
        email: email.to_string(),
        email_lower: email.to_lowercase(),
        first_name: "Jordan".to_string(),
        last_name: "Diaz".to_string(),
        password: "$argon2id$stub".to_string(),
        requested_role: RequestedRole::Student,
        program_id: Some("prog1".to_string()),
        phone: None,
        date_of_birth: None,
        address: None,
        city: None,
        country: None,
        emergency_contact_name: None,
        emergency_contact_phone: None,
        specialization: None,
        qualifications: None,
        experience_years: None,
        status: ApplicationStatus::Pending,
        reviewed_by: None,
        reviewed_at: None,
        notes: None,
        created_at: Utc::now().into(),
    }
}

fn test_user_row(id: &str, email: &str) -> campus_db::entities::user::Model {
    campus_db::entities::user::Model {
        id: id.to_string(),
        email: email.to_string(),
        email_lower: email.to_lowercase(),
        first_name: "Jordan".to_string(),
        last_name: "Diaz".to_string(),
        role: campus_db::entities::user::Role::Student,
        avatar_url: None,
        is_suspended: false,
        created_at: Utc::now().into(),
        updated_at: None,
    }
}

#[tokio::test]
async fn test_protected_endpoint_without_token_is_unauthorized() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

    let response = app(db)
        .oneshot(post_json(
            "/registrations/list",
            serde_json::json!({ "status": "pending" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_navigation_resolve_unauthenticated_is_login() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

    let response = app(db)
        .oneshot(post_json(
            "/navigation/resolve",
            serde_json::json!({ "path": "/dashboard" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["kind"], "login");
}

#[tokio::test]
async fn test_apply_creates_pending_application() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        // No existing account with this email
        .append_query_results([Vec::<campus_db::entities::user::Model>::new()])
        // No pending application with this email
        .append_query_results(
            [Vec::<campus_db::entities::registration_application::Model>::new()],
        )
        // The requested program is active
        .append_query_results([[test_program_row("prog1")]])
        // The inserted application row
        .append_query_results([[test_application_row("app1", "j@x.com")]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();

    let response = app(db)
        .oneshot(post_json(
            "/registrations/apply",
            serde_json::json!({
                "email": "j@x.com",
                "firstName": "Jordan",
                "lastName": "Diaz",
                "password": "correct horse",
                "role": "student",
                "programId": "prog1",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["id"], "app1");
    assert_eq!(body["data"]["status"], "pending");
}

#[tokio::test]
async fn test_apply_duplicate_email_is_conflict() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        // The email already belongs to an account
        .append_query_results([[test_user_row("user1", "j@x.com")]])
        .into_connection();

    let response = app(db)
        .oneshot(post_json(
            "/registrations/apply",
            serde_json::json!({
                "email": "j@x.com",
                "firstName": "Jordan",
                "lastName": "Diaz",
                "password": "correct horse",
                "role": "student",
                "programId": "prog1",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "DUPLICATE_EMAIL");
}

#[tokio::test]
async fn test_login_rejects_unknown_email() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<campus_db::entities::user::Model>::new()])
        .into_connection();

    let response = app(db)
        .oneshot(post_json(
            "/auth/login",
            serde_json::json!({
                "email": "ghost@example.com",
                "password": "whatever",
                "role": "student",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "AUTH_FAILED");
}
