//! Registration application service: the account approval workflow.
//!
//! Applications move through a two-transition state machine:
//! `pending -> approved` or `pending -> rejected`, both terminal. Approval
//! provisions the account (identity + credential profile + role extension)
//! in the same database transaction that claims the application, so a
//! half-provisioned account can never be observed.

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use campus_common::{AppError, AppResult};
use campus_db::entities::{
    program, registration_application,
    registration_application::{ApplicationStatus, RequestedRole},
    student_profile, teacher_profile, user, user_profile,
};
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait, Value,
    prelude::DateTimeWithTimeZone, sea_query::Expr,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

/// Input for submitting a registration application.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitApplicationInput {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1, max = 128))]
    pub first_name: String,

    #[validate(length(min = 1, max = 128))]
    pub last_name: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,

    pub requested_role: RequestedRole,

    /// Required for student applications.
    pub program_id: Option<String>,

    #[validate(length(max = 32))]
    pub phone: Option<String>,

    pub date_of_birth: Option<chrono::NaiveDate>,

    #[validate(length(max = 512))]
    pub address: Option<String>,

    #[validate(length(max = 128))]
    pub city: Option<String>,

    #[validate(length(max = 128))]
    pub country: Option<String>,

    #[validate(length(max = 256))]
    pub emergency_contact_name: Option<String>,

    #[validate(length(max = 32))]
    pub emergency_contact_phone: Option<String>,

    /// Required for teacher applications.
    #[validate(length(max = 256))]
    pub specialization: Option<String>,

    #[validate(length(max = 4096))]
    pub qualifications: Option<String>,

    #[validate(range(min = 0, max = 80))]
    pub experience_years: Option<i32>,
}

/// Registration application service.
///
/// Holds the raw connection rather than repositories: approval needs a
/// transaction spanning four tables.
#[derive(Clone)]
pub struct RegistrationService {
    db: Arc<DatabaseConnection>,
}

impl RegistrationService {
    /// Create a new registration service.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Submit a new registration application.
    ///
    /// The email must not belong to an existing account or another pending
    /// application. No identity is created here; applicants wait for review.
    pub async fn submit(
        &self,
        input: SubmitApplicationInput,
    ) -> AppResult<registration_application::Model> {
        input.validate()?;

        match input.requested_role {
            RequestedRole::Student => {
                if input.program_id.is_none() {
                    return Err(AppError::Validation(
                        "Student applications require a program".to_string(),
                    ));
                }
            }
            RequestedRole::Teacher => {
                if input
                    .specialization
                    .as_deref()
                    .is_none_or(|s| s.trim().is_empty())
                {
                    return Err(AppError::Validation(
                        "Teacher applications require a specialization".to_string(),
                    ));
                }
            }
        }

        let email_lower = input.email.to_lowercase();

        // A provisioned account always wins over a new application
        let existing_user = user::Entity::find()
            .filter(user::Column::EmailLower.eq(email_lower.clone()))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if existing_user.is_some() {
            return Err(AppError::DuplicateEmail(input.email));
        }

        let pending_application = registration_application::Entity::find()
            .filter(registration_application::Column::EmailLower.eq(email_lower.clone()))
            .filter(registration_application::Column::Status.eq(ApplicationStatus::Pending))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if pending_application.is_some() {
            return Err(AppError::DuplicateEmail(input.email));
        }

        if let Some(program_id) = &input.program_id {
            let program = program::Entity::find_by_id(program_id)
                .one(self.db.as_ref())
                .await
                .map_err(|e| AppError::Database(e.to_string()))?
                .ok_or_else(|| AppError::Validation(format!("Unknown program {program_id}")))?;

            if !program.is_active {
                return Err(AppError::Validation(format!(
                    "Program {} is not accepting applications",
                    program.name
                )));
            }
        }

        let password_hash = hash_password(&input.password)?;
        let now = chrono::Utc::now();
        let id = crate::generate_id();

        let model = registration_application::ActiveModel {
            id: Set(id),
            email: Set(input.email),
            email_lower: Set(email_lower),
            first_name: Set(input.first_name),
            last_name: Set(input.last_name),
            password: Set(password_hash),
            requested_role: Set(input.requested_role),
            program_id: Set(input.program_id),
            phone: Set(input.phone),
            date_of_birth: Set(input.date_of_birth),
            address: Set(input.address),
            city: Set(input.city),
            country: Set(input.country),
            emergency_contact_name: Set(input.emergency_contact_name),
            emergency_contact_phone: Set(input.emergency_contact_phone),
            specialization: Set(input.specialization),
            qualifications: Set(input.qualifications),
            experience_years: Set(input.experience_years),
            status: Set(ApplicationStatus::Pending),
            reviewed_by: Set(None),
            reviewed_at: Set(None),
            notes: Set(None),
            created_at: Set(now.into()),
        };

        let application = model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        tracing::info!(
            application_id = %application.id,
            requested_role = ?application.requested_role,
            "Registration application submitted"
        );

        Ok(application)
    }

    /// List applications with an optional status filter.
    ///
    /// Newest submission first; id breaks timestamp ties so the order is
    /// stable.
    pub async fn list(
        &self,
        status: Option<ApplicationStatus>,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<registration_application::Model>> {
        let mut query = registration_application::Entity::find()
            .order_by_desc(registration_application::Column::CreatedAt)
            .order_by_desc(registration_application::Column::Id);

        if let Some(s) = status {
            query = query.filter(registration_application::Column::Status.eq(s));
        }

        query
            .offset(offset)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get an application by ID.
    pub async fn get(&self, id: &str) -> AppResult<registration_application::Model> {
        registration_application::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .ok_or_else(|| AppError::ApplicationNotFound(id.to_string()))
    }

    /// Approve an application and provision the account.
    ///
    /// Claiming the application (a conditional update on `status = pending`)
    /// and creating the identity, credential profile and role extension all
    /// happen in one transaction. Losing the claim to a concurrent reviewer
    /// is `InvalidTransition`; any provisioning failure rolls everything
    /// back, leaving the application pending and retryable.
    pub async fn approve(
        &self,
        id: &str,
        reviewer_id: &str,
        notes: Option<&str>,
    ) -> AppResult<registration_application::Model> {
        let application = self.get(id).await?;

        if application.status != ApplicationStatus::Pending {
            return Err(AppError::InvalidTransition(format!(
                "Application {id} was already reviewed"
            )));
        }

        let now = chrono::Utc::now();
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let claimed = registration_application::Entity::update_many()
            .col_expr(
                registration_application::Column::Status,
                ApplicationStatus::Approved.as_enum(),
            )
            .col_expr(
                registration_application::Column::ReviewedBy,
                Expr::value(Value::from(Some(reviewer_id.to_string()))),
            )
            .col_expr(
                registration_application::Column::ReviewedAt,
                Expr::value(Value::from(Some(DateTimeWithTimeZone::from(now)))),
            )
            .col_expr(
                registration_application::Column::Notes,
                Expr::value(Value::from(notes.map(String::from))),
            )
            .filter(registration_application::Column::Id.eq(id))
            .filter(registration_application::Column::Status.eq(ApplicationStatus::Pending))
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if claimed.rows_affected == 0 {
            txn.rollback().await.ok();
            return Err(AppError::InvalidTransition(format!(
                "Application {id} was already reviewed"
            )));
        }

        let user_id = crate::generate_id();

        let user_model = user::ActiveModel {
            id: Set(user_id.clone()),
            email: Set(application.email.clone()),
            email_lower: Set(application.email_lower.clone()),
            first_name: Set(application.first_name.clone()),
            last_name: Set(application.last_name.clone()),
            role: Set(application.requested_role.as_role()),
            avatar_url: Set(None),
            is_suspended: Set(false),
            created_at: Set(now.into()),
            updated_at: Set(None),
        };

        if let Err(e) = user_model.insert(&txn).await {
            txn.rollback().await.ok();
            return Err(AppError::Provisioning(format!(
                "Identity creation failed for application {id}: {e}"
            )));
        }

        let profile_model = user_profile::ActiveModel {
            user_id: Set(user_id.clone()),
            password: Set(application.password.clone()),
            phone: Set(application.phone.clone()),
            locale: Set(None),
            created_at: Set(now.into()),
            updated_at: Set(None),
        };

        if let Err(e) = profile_model.insert(&txn).await {
            txn.rollback().await.ok();
            return Err(AppError::Provisioning(format!(
                "Profile creation failed for application {id}: {e}"
            )));
        }

        match application.requested_role {
            RequestedRole::Student => {
                let Some(program_id) = application.program_id.clone() else {
                    txn.rollback().await.ok();
                    return Err(AppError::Provisioning(format!(
                        "Student application {id} has no program"
                    )));
                };

                let extension = student_profile::ActiveModel {
                    user_id: Set(user_id.clone()),
                    program_id: Set(program_id.clone()),
                    enrollment_status: Set(student_profile::EnrollmentStatus::Active),
                    date_of_birth: Set(application.date_of_birth),
                    address: Set(application.address.clone()),
                    city: Set(application.city.clone()),
                    country: Set(application.country.clone()),
                    emergency_contact_name: Set(application.emergency_contact_name.clone()),
                    emergency_contact_phone: Set(application.emergency_contact_phone.clone()),
                    created_at: Set(now.into()),
                    updated_at: Set(None),
                };

                if let Err(e) = extension.insert(&txn).await {
                    txn.rollback().await.ok();
                    return Err(AppError::Provisioning(format!(
                        "Student extension creation failed for application {id}: {e}"
                    )));
                }

                // Keep the denormalized enrollment counter in step
                if let Err(e) = program::Entity::update_many()
                    .col_expr(
                        program::Column::EnrolledCount,
                        Expr::col(program::Column::EnrolledCount).add(1),
                    )
                    .filter(program::Column::Id.eq(program_id))
                    .exec(&txn)
                    .await
                {
                    txn.rollback().await.ok();
                    return Err(AppError::Provisioning(format!(
                        "Enrollment count update failed for application {id}: {e}"
                    )));
                }
            }
            RequestedRole::Teacher => {
                let Some(specialization) = application.specialization.clone() else {
                    txn.rollback().await.ok();
                    return Err(AppError::Provisioning(format!(
                        "Teacher application {id} has no specialization"
                    )));
                };

                let extension = teacher_profile::ActiveModel {
                    user_id: Set(user_id.clone()),
                    specialization: Set(specialization),
                    qualifications: Set(application.qualifications.clone()),
                    experience_years: Set(application.experience_years.unwrap_or(0)),
                    employment_status: Set(teacher_profile::EmploymentStatus::Active),
                    created_at: Set(now.into()),
                    updated_at: Set(None),
                };

                if let Err(e) = extension.insert(&txn).await {
                    txn.rollback().await.ok();
                    return Err(AppError::Provisioning(format!(
                        "Teacher extension creation failed for application {id}: {e}"
                    )));
                }
            }
        }

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        tracing::info!(
            application_id = %id,
            user_id = %user_id,
            reviewer_id = %reviewer_id,
            "Registration application approved, account provisioned"
        );

        self.get(id).await
    }

    /// Reject an application.
    ///
    /// Terminal, like approve, but provisions nothing. The rejection reason
    /// is stored verbatim in `notes`.
    pub async fn reject(
        &self,
        id: &str,
        reviewer_id: &str,
        notes: Option<&str>,
    ) -> AppResult<registration_application::Model> {
        let application = self.get(id).await?;

        if application.status != ApplicationStatus::Pending {
            return Err(AppError::InvalidTransition(format!(
                "Application {id} was already reviewed"
            )));
        }

        let now = chrono::Utc::now();

        let updated = registration_application::Entity::update_many()
            .col_expr(
                registration_application::Column::Status,
                ApplicationStatus::Rejected.as_enum(),
            )
            .col_expr(
                registration_application::Column::ReviewedBy,
                Expr::value(Value::from(Some(reviewer_id.to_string()))),
            )
            .col_expr(
                registration_application::Column::ReviewedAt,
                Expr::value(Value::from(Some(DateTimeWithTimeZone::from(now)))),
            )
            .col_expr(
                registration_application::Column::Notes,
                Expr::value(Value::from(notes.map(String::from))),
            )
            .filter(registration_application::Column::Id.eq(id))
            .filter(registration_application::Column::Status.eq(ApplicationStatus::Pending))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if updated.rows_affected == 0 {
            return Err(AppError::InvalidTransition(format!(
                "Application {id} was already reviewed"
            )));
        }

        tracing::info!(
            application_id = %id,
            reviewer_id = %reviewer_id,
            "Registration application rejected"
        );

        self.get(id).await
    }

    /// Count pending applications.
    pub async fn count_pending(&self) -> AppResult<u64> {
        registration_application::Entity::find()
            .filter(registration_application::Column::Status.eq(ApplicationStatus::Pending))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

/// Hash a password with Argon2.
fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn student_input(email: &str) -> SubmitApplicationInput {
        SubmitApplicationInput {
            email: email.to_string(),
            first_name: "Elena".to_string(),
            last_name: "Rodriguez".to_string(),
            password: "correct horse".to_string(),
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
        }
    }

    fn test_application(
        id: &str,
        email: &str,
        status: ApplicationStatus,
    ) -> registration_application::Model {
        registration_application::Model {
            id: id.to_string(),
            email: email.to_string(),
            email_lower: email.to_lowercase(),
            first_name: "Elena".to_string(),
            last_name: "Rodriguez".to_string(),
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
            status,
            reviewed_by: None,
            reviewed_at: None,
            notes: None,
            created_at: Utc::now().into(),
        }
    }

    fn test_program(id: &str, active: bool) -> program::Model {
        program::Model {
            id: id.to_string(),
            name: "Web Development".to_string(),
            description: None,
            duration_months: 8,
            price_cents: 320_000,
            capacity: 80,
            enrolled_count: 0,
            is_active: active,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn test_user(id: &str, email: &str) -> user::Model {
        user::Model {
            id: id.to_string(),
            email: email.to_string(),
            email_lower: email.to_lowercase(),
            first_name: "Elena".to_string(),
            last_name: "Rodriguez".to_string(),
            role: user::Role::Student,
            avatar_url: None,
            is_suspended: false,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn test_user_profile(user_id: &str) -> user_profile::Model {
        user_profile::Model {
            user_id: user_id.to_string(),
            password: "$argon2id$stub".to_string(),
            phone: None,
            locale: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn test_student_profile(user_id: &str) -> student_profile::Model {
        student_profile::Model {
            user_id: user_id.to_string(),
            program_id: "prog1".to_string(),
            enrollment_status: student_profile::EnrollmentStatus::Active,
            date_of_birth: None,
            address: None,
            city: None,
            country: None,
            emergency_contact_name: None,
            emergency_contact_phone: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_submit_rejects_malformed_email() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
        );
        let service = RegistrationService::new(db);

        let result = service.submit(student_input("not-an-email")).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_submit_student_without_program_fails() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
        );
        let service = RegistrationService::new(db);

        let mut input = student_input("j@x.com");
        input.program_id = None;

        let result = service.submit(input).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_submit_teacher_without_specialization_fails() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
        );
        let service = RegistrationService::new(db);

        let mut input = student_input("t@x.com");
        input.requested_role = RequestedRole::Teacher;
        input.program_id = None;
        input.specialization = None;

        let result = service.submit(input).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_submit_rejects_email_of_existing_account() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_user("user1", "j@x.com")]])
                .into_connection(),
        );
        let service = RegistrationService::new(db);

        let result = service.submit(student_input("j@x.com")).await;

        assert!(matches!(result, Err(AppError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_submit_rejects_email_of_pending_application() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                // No existing user
                .append_query_results([Vec::<user::Model>::new()])
                // A pending application holds the email
                .append_query_results([[test_application(
                    "app1",
                    "j@x.com",
                    ApplicationStatus::Pending,
                )]])
                .into_connection(),
        );
        let service = RegistrationService::new(db);

        let result = service.submit(student_input("j@x.com")).await;

        assert!(matches!(result, Err(AppError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_submit_creates_pending_application() {
        let created = test_application("app1", "j@x.com", ApplicationStatus::Pending);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new()])
                .append_query_results([Vec::<registration_application::Model>::new()])
                .append_query_results([[test_program("prog1", true)]])
                .append_query_results([[created.clone()]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );
        let service = RegistrationService::new(db);

        let result = service.submit(student_input("j@x.com")).await.unwrap();

        assert_eq!(result.id, "app1");
        assert_eq!(result.status, ApplicationStatus::Pending);
        assert!(result.reviewed_by.is_none());
        assert!(result.reviewed_at.is_none());
    }

    #[tokio::test]
    async fn test_submit_rejects_inactive_program() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new()])
                .append_query_results([Vec::<registration_application::Model>::new()])
                .append_query_results([[test_program("prog1", false)]])
                .into_connection(),
        );
        let service = RegistrationService::new(db);

        let result = service.submit(student_input("j@x.com")).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_approve_provisions_identity_and_extension() {
        let pending = test_application("app1", "j@x.com", ApplicationStatus::Pending);
        let mut approved = pending.clone();
        approved.status = ApplicationStatus::Approved;
        approved.reviewed_by = Some("admin-1".to_string());
        approved.reviewed_at = Some(Utc::now().into());

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                // Load before review
                .append_query_results([[pending]])
                // Provisioning inserts return their rows
                .append_query_results([[test_user("user1", "j@x.com")]])
                .append_query_results([[test_user_profile("user1")]])
                .append_query_results([[test_student_profile("user1")]])
                // Reload after commit
                .append_query_results([[approved]])
                .append_exec_results([
                    // Claim succeeds
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 1,
                    },
                    // Enrollment counter bump
                    MockExecResult {
                        last_insert_id: 0,
                        rows_affected: 1,
                    },
                ])
                .into_connection(),
        );
        let service = RegistrationService::new(db);

        let result = service.approve("app1", "admin-1", None).await.unwrap();

        assert_eq!(result.status, ApplicationStatus::Approved);
        assert_eq!(result.reviewed_by.as_deref(), Some("admin-1"));
        assert!(result.reviewed_at.is_some());
    }

    #[tokio::test]
    async fn test_approve_already_reviewed_fails() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_application(
                    "app1",
                    "j@x.com",
                    ApplicationStatus::Approved,
                )]])
                .into_connection(),
        );
        let service = RegistrationService::new(db);

        let result = service.approve("app1", "admin-1", None).await;

        assert!(matches!(result, Err(AppError::InvalidTransition(_))));
    }

    #[tokio::test]
    async fn test_approve_lost_race_is_invalid_transition() {
        // The load still sees pending, but the conditional update claims
        // nothing: a concurrent reviewer got there first.
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_application(
                    "app1",
                    "j@x.com",
                    ApplicationStatus::Pending,
                )]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                }])
                .into_connection(),
        );
        let service = RegistrationService::new(db);

        let result = service.approve("app1", "admin-1", None).await;

        assert!(matches!(result, Err(AppError::InvalidTransition(_))));
    }

    #[tokio::test]
    async fn test_approve_missing_application_fails() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<registration_application::Model>::new()])
                .into_connection(),
        );
        let service = RegistrationService::new(db);

        let result = service.approve("ghost", "admin-1", None).await;

        assert!(matches!(result, Err(AppError::ApplicationNotFound(_))));
    }

    #[tokio::test]
    async fn test_reject_sets_terminal_state_and_notes() {
        let pending = test_application("app1", "j@x.com", ApplicationStatus::Pending);
        let mut rejected = pending.clone();
        rejected.status = ApplicationStatus::Rejected;
        rejected.reviewed_by = Some("admin-1".to_string());
        rejected.reviewed_at = Some(Utc::now().into());
        rejected.notes = Some("insufficient docs".to_string());

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[pending]])
                .append_query_results([[rejected]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );
        let service = RegistrationService::new(db);

        let result = service
            .reject("app1", "admin-1", Some("insufficient docs"))
            .await
            .unwrap();

        assert_eq!(result.status, ApplicationStatus::Rejected);
        assert_eq!(result.notes.as_deref(), Some("insufficient docs"));
        assert_eq!(result.reviewed_by.as_deref(), Some("admin-1"));
    }

    #[tokio::test]
    async fn test_reject_already_reviewed_fails() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_application(
                    "app1",
                    "j@x.com",
                    ApplicationStatus::Rejected,
                )]])
                .into_connection(),
        );
        let service = RegistrationService::new(db);

        let result = service.reject("app1", "admin-1", None).await;

        assert!(matches!(result, Err(AppError::InvalidTransition(_))));
    }

    #[tokio::test]
    async fn test_list_with_status_filter() {
        let app1 = test_application("app1", "a@x.com", ApplicationStatus::Pending);
        let app2 = test_application("app2", "b@x.com", ApplicationStatus::Pending);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[app1, app2]])
                .into_connection(),
        );
        let service = RegistrationService::new(db);

        let result = service
            .list(Some(ApplicationStatus::Pending), 50, 0)
            .await
            .unwrap();

        assert_eq!(result.len(), 2);
    }

    #[tokio::test]
    async fn test_count_pending() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[maplit::btreemap! {
                    "num_items" => sea_orm::Value::BigInt(Some(3))
                }]])
                .into_connection(),
        );
        let service = RegistrationService::new(db);

        let count = service.count_pending().await.unwrap();

        assert_eq!(count, 3);
    }
}
