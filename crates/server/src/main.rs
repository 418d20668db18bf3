//! Campus server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Router, middleware};
use campus_api::{middleware::AppState, router as api_router};
use campus_common::Config;
use campus_core::{
    AccountService, AnnouncementService, AttendanceService, FinanceService, GradeService,
    ProgramService, QuizService, RegistrationService, UserService,
};
use campus_db::repositories::{
    AnnouncementRepository, AttendanceRepository, GradeRepository, InvoiceRepository,
    ProgramRepository, QuizRepository, SessionRepository, StudentProfileRepository,
    TeacherProfileRepository, UserProfileRepository, UserRepository,
};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "campus=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting campus server...");

    // Load configuration
    let config = Config::load()?;

    // Validate the public URL early; it ends up in emails and redirects
    let _ = Url::parse(&config.server.url)?;

    // Connect to database
    let db = campus_db::init(&config).await?;
    info!("Connected to database");

    // Run migrations
    info!("Running database migrations...");
    campus_db::migrate(&db).await?;
    info!("Migrations completed");

    // Initialize repositories
    let db = Arc::new(db);
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

    // Initialize services
    let account_service = AccountService::new(
        user_repo.clone(),
        user_profile_repo.clone(),
        session_repo.clone(),
        &config,
    );
    let registration_service = RegistrationService::new(Arc::clone(&db));
    let user_service = UserService::new(
        user_repo.clone(),
        student_profile_repo.clone(),
        teacher_profile_repo.clone(),
        session_repo.clone(),
    );
    let program_service = ProgramService::new(
        program_repo.clone(),
        student_profile_repo.clone(),
        user_repo.clone(),
    );
    let announcement_service = AnnouncementService::new(announcement_repo);
    let attendance_service = AttendanceService::new(attendance_repo);
    let finance_service = FinanceService::new(invoice_repo);
    let quiz_service = QuizService::new(quiz_repo, program_repo);
    let grade_service = GradeService::new(grade_repo);

    // Clean up stale sessions from previous runs
    let swept = account_service.sweep_expired_sessions().await?;
    if swept > 0 {
        info!(swept, "Removed expired sessions");
    }

    // Create app state
    let state = AppState {
        account_service,
        registration_service,
        user_service,
        program_service,
        announcement_service,
        attendance_service,
        finance_service,
        quiz_service,
        grade_service,
    };

    // Build router
    let app = Router::new()
        .nest("/api", api_router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            campus_api::middleware::auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server with graceful shutdown
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
