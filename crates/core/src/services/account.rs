//! Account service: login, logout, and bearer-token authentication.
//!
//! Sessions are explicit rows with an expiry. Login creates one, logout
//! deletes it, and the API middleware resolves a bearer token through
//! [`AccountService::authenticate`] on every request.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordVerifier},
};
use campus_common::{AppError, AppResult, Config, IdGenerator};
use campus_db::{
    entities::{session, user},
    repositories::{SessionRepository, UserProfileRepository, UserRepository},
};
use sea_orm::Set;

/// Account service for authentication and session management.
#[derive(Clone)]
pub struct AccountService {
    user_repo: UserRepository,
    profile_repo: UserProfileRepository,
    session_repo: SessionRepository,
    id_gen: IdGenerator,
    session_ttl: chrono::Duration,
}

impl AccountService {
    /// Create a new account service.
    #[must_use]
    pub fn new(
        user_repo: UserRepository,
        profile_repo: UserProfileRepository,
        session_repo: SessionRepository,
        config: &Config,
    ) -> Self {
        Self {
            user_repo,
            profile_repo,
            session_repo,
            id_gen: IdGenerator::new(),
            session_ttl: chrono::Duration::seconds(config.session.ttl_secs),
        }
    }

    /// Authenticate by email and password, and create a session.
    ///
    /// `expected_role` comes from the role selector on the login form; a
    /// mismatch with the stored role is an authentication failure, not a
    /// silent role switch.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        expected_role: user::Role,
    ) -> AppResult<(user::Model, session::Model)> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::Auth("Invalid email or password".to_string()))?;

        if user.is_suspended {
            return Err(AppError::Auth("Account is suspended".to_string()));
        }

        let profile = self
            .profile_repo
            .find_by_user_id(&user.id)
            .await?
            .ok_or_else(|| AppError::Auth("Invalid email or password".to_string()))?;

        if !verify_password(password, &profile.password)? {
            return Err(AppError::Auth("Invalid email or password".to_string()));
        }

        if user.role != expected_role {
            return Err(AppError::Auth(
                "Account does not have the selected role".to_string(),
            ));
        }

        let now = chrono::Utc::now();
        let session_model = session::ActiveModel {
            id: Set(crate::generate_id()),
            token: Set(self.id_gen.generate_token()),
            user_id: Set(user.id.clone()),
            created_at: Set(now.into()),
            expires_at: Set((now + self.session_ttl).into()),
        };

        let session = self.session_repo.create(session_model).await?;

        tracing::info!(user_id = %user.id, role = ?user.role, "User logged in");

        Ok((user, session))
    }

    /// Invalidate a session token. Idempotent.
    pub async fn logout(&self, token: &str) -> AppResult<()> {
        self.session_repo.delete_by_token(token).await?;
        tracing::debug!("Session invalidated");
        Ok(())
    }

    /// Resolve a bearer token to its user.
    ///
    /// Fails with `Unauthorized` for unknown or expired tokens and for
    /// suspended accounts.
    pub async fn authenticate(&self, token: &str) -> AppResult<user::Model> {
        let (user, _) = self.current_session(token).await?;
        Ok(user)
    }

    /// Resolve a bearer token to its user and session (for session-restore).
    pub async fn current_session(
        &self,
        token: &str,
    ) -> AppResult<(user::Model, session::Model)> {
        let session = self
            .session_repo
            .find_by_token(token)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if session.expires_at < chrono::Utc::now() {
            return Err(AppError::Unauthorized);
        }

        let user = self
            .user_repo
            .find_by_id(&session.user_id)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if user.is_suspended {
            return Err(AppError::Unauthorized);
        }

        Ok((user, session))
    }

    /// Delete sessions that expired before now; returns how many.
    pub async fn sweep_expired_sessions(&self) -> AppResult<u64> {
        let removed = self
            .session_repo
            .delete_expired(chrono::Utc::now())
            .await?;
        if removed > 0 {
            tracing::debug!(removed, "Swept expired sessions");
        }
        Ok(removed)
    }
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AppError::Internal(format!("Invalid hash: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use argon2::password_hash::{PasswordHasher, SaltString, rand_core::OsRng};
    use campus_common::config::{Config, DatabaseConfig, ServerConfig, SessionConfig};
    use campus_db::entities::user_profile;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn test_config() -> Config {
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

    fn hash(password: &str) -> String {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .unwrap()
            .to_string()
    }

    fn test_user(id: &str, role: user::Role) -> user::Model {
        user::Model {
            id: id.to_string(),
            email: "elena.r@example.com".to_string(),
            email_lower: "elena.r@example.com".to_string(),
            first_name: "Elena".to_string(),
            last_name: "Rodriguez".to_string(),
            role,
            avatar_url: None,
            is_suspended: false,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn test_profile(user_id: &str, password: &str) -> user_profile::Model {
        user_profile::Model {
            user_id: user_id.to_string(),
            password: hash(password),
            phone: None,
            locale: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn test_session(user_id: &str, expires_in_secs: i64) -> session::Model {
        let now = Utc::now();
        session::Model {
            id: "sess1".to_string(),
            token: "token1".to_string(),
            user_id: user_id.to_string(),
            created_at: now.into(),
            expires_at: (now + chrono::Duration::seconds(expires_in_secs)).into(),
        }
    }

    fn service(db: sea_orm::DatabaseConnection) -> AccountService {
        let db = Arc::new(db);
        AccountService::new(
            UserRepository::new(Arc::clone(&db)),
            UserProfileRepository::new(Arc::clone(&db)),
            SessionRepository::new(db),
            &test_config(),
        )
    }

    #[tokio::test]
    async fn test_login_success_creates_session() {
        let user = test_user("user1", user::Role::Student);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[user.clone()]])
            .append_query_results([[test_profile("user1", "correct horse")]])
            .append_query_results([[test_session("user1", 3600)]])
            .into_connection();

        let (logged_in, session) = service(db)
            .login("elena.r@example.com", "correct horse", user::Role::Student)
            .await
            .unwrap();

        assert_eq!(logged_in.id, "user1");
        assert_eq!(session.user_id, "user1");
    }

    #[tokio::test]
    async fn test_login_wrong_password_fails() {
        let user = test_user("user1", user::Role::Student);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[user]])
            .append_query_results([[test_profile("user1", "correct horse")]])
            .into_connection();

        let result = service(db)
            .login("elena.r@example.com", "wrong", user::Role::Student)
            .await;

        assert!(matches!(result, Err(AppError::Auth(_))));
    }

    #[tokio::test]
    async fn test_login_role_mismatch_fails() {
        // A student trying to enter through the admin door
        let user = test_user("user1", user::Role::Student);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[user]])
            .append_query_results([[test_profile("user1", "correct horse")]])
            .into_connection();

        let result = service(db)
            .login("elena.r@example.com", "correct horse", user::Role::Admin)
            .await;

        assert!(matches!(result, Err(AppError::Auth(_))));
    }

    #[tokio::test]
    async fn test_login_unknown_email_fails() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new()])
            .into_connection();

        let result = service(db)
            .login("ghost@example.com", "whatever", user::Role::Student)
            .await;

        assert!(matches!(result, Err(AppError::Auth(_))));
    }

    #[tokio::test]
    async fn test_login_suspended_account_fails() {
        let mut user = test_user("user1", user::Role::Student);
        user.is_suspended = true;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[user]])
            .into_connection();

        let result = service(db)
            .login("elena.r@example.com", "correct horse", user::Role::Student)
            .await;

        assert!(matches!(result, Err(AppError::Auth(_))));
    }

    #[tokio::test]
    async fn test_authenticate_expired_session_fails() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_session("user1", -60)]])
            .into_connection();

        let result = service(db).authenticate("token1").await;

        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_authenticate_valid_session_returns_user() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_session("user1", 3600)]])
            .append_query_results([[test_user("user1", user::Role::Teacher)]])
            .into_connection();

        let user = service(db).authenticate("token1").await.unwrap();

        assert_eq!(user.id, "user1");
        assert_eq!(user.role, user::Role::Teacher);
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let result = service(db).logout("unknown-token").await;

        assert!(result.is_ok());
    }
}
