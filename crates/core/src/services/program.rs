//! Program service.

use campus_common::{AppError, AppResult};
use campus_db::{
    entities::{program, student_profile, user},
    repositories::{ProgramRepository, StudentProfileRepository, UserRepository},
};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Input for creating a program.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProgramInput {
    #[validate(length(min = 1, max = 256))]
    pub name: String,

    #[validate(length(max = 4096))]
    pub description: Option<String>,

    #[validate(range(min = 1, max = 72))]
    pub duration_months: i32,

    #[validate(range(min = 0))]
    pub price_cents: i64,

    #[validate(range(min = 1))]
    pub capacity: i32,
}

/// Input for updating a program.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProgramInput {
    #[validate(length(min = 1, max = 256))]
    pub name: Option<String>,

    #[validate(length(max = 4096))]
    pub description: Option<String>,

    #[validate(range(min = 1, max = 72))]
    pub duration_months: Option<i32>,

    #[validate(range(min = 0))]
    pub price_cents: Option<i64>,

    #[validate(range(min = 1))]
    pub capacity: Option<i32>,
}

/// A program roster entry: an enrolled student and their extension.
#[derive(Debug, Clone)]
pub struct RosterEntry {
    pub user: user::Model,
    pub profile: student_profile::Model,
}

/// Program service.
#[derive(Clone)]
pub struct ProgramService {
    program_repo: ProgramRepository,
    student_repo: StudentProfileRepository,
    user_repo: UserRepository,
}

impl ProgramService {
    /// Create a new program service.
    #[must_use]
    pub const fn new(
        program_repo: ProgramRepository,
        student_repo: StudentProfileRepository,
        user_repo: UserRepository,
    ) -> Self {
        Self {
            program_repo,
            student_repo,
            user_repo,
        }
    }

    /// Get a program by ID.
    pub async fn get(&self, id: &str) -> AppResult<program::Model> {
        self.program_repo.get_by_id(id).await
    }

    /// List programs.
    pub async fn list(
        &self,
        active_only: bool,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<program::Model>> {
        self.program_repo.find_all(active_only, limit, offset).await
    }

    /// Create a new program.
    pub async fn create(&self, input: CreateProgramInput) -> AppResult<program::Model> {
        input.validate()?;

        if self.program_repo.find_by_name(&input.name).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Program {} already exists",
                input.name
            )));
        }

        let model = program::ActiveModel {
            id: Set(crate::generate_id()),
            name: Set(input.name),
            description: Set(input.description),
            duration_months: Set(input.duration_months),
            price_cents: Set(input.price_cents),
            capacity: Set(input.capacity),
            enrolled_count: Set(0),
            is_active: Set(true),
            created_at: Set(chrono::Utc::now().into()),
            updated_at: Set(None),
        };

        let program = self.program_repo.create(model).await?;

        tracing::info!(program_id = %program.id, name = %program.name, "Program created");

        Ok(program)
    }

    /// Update a program.
    pub async fn update(&self, id: &str, input: UpdateProgramInput) -> AppResult<program::Model> {
        input.validate()?;

        let program = self.program_repo.get_by_id(id).await?;
        let mut active: program::ActiveModel = program.into();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(description) = input.description {
            active.description = Set(Some(description));
        }
        if let Some(duration_months) = input.duration_months {
            active.duration_months = Set(duration_months);
        }
        if let Some(price_cents) = input.price_cents {
            active.price_cents = Set(price_cents);
        }
        if let Some(capacity) = input.capacity {
            active.capacity = Set(capacity);
        }

        active.updated_at = Set(Some(chrono::Utc::now().into()));

        self.program_repo.update(active).await
    }

    /// The students enrolled in a program, with their extensions.
    pub async fn roster(&self, id: &str) -> AppResult<Vec<RosterEntry>> {
        // Make sure the program exists before walking its roster
        self.program_repo.get_by_id(id).await?;

        let profiles = self.student_repo.find_by_program(id).await?;

        let mut entries = Vec::with_capacity(profiles.len());
        for profile in profiles {
            let user = self.user_repo.get_by_id(&profile.user_id).await?;
            entries.push(RosterEntry { user, profile });
        }

        Ok(entries)
    }

    /// Deactivate a program.
    ///
    /// Programs with enrolled students are never deleted; they stop
    /// accepting applications instead.
    pub async fn deactivate(&self, id: &str) -> AppResult<program::Model> {
        let program = self.program_repo.get_by_id(id).await?;

        let enrolled = self.student_repo.count_by_program(id).await?;

        let mut active: program::ActiveModel = program.into();
        active.is_active = Set(false);
        active.updated_at = Set(Some(chrono::Utc::now().into()));

        let updated = self.program_repo.update(active).await?;

        tracing::info!(program_id = %id, enrolled, "Program deactivated");

        Ok(updated)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn test_program(id: &str, name: &str) -> program::Model {
        program::Model {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            duration_months: 8,
            price_cents: 320_000,
            capacity: 80,
            enrolled_count: 12,
            is_active: true,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn service(db: sea_orm::DatabaseConnection) -> ProgramService {
        let db = Arc::new(db);
        ProgramService::new(
            ProgramRepository::new(Arc::clone(&db)),
            StudentProfileRepository::new(Arc::clone(&db)),
            UserRepository::new(db),
        )
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_name() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_program("prog1", "Web Development")]])
            .into_connection();

        let result = service(db)
            .create(CreateProgramInput {
                name: "Web Development".to_string(),
                description: None,
                duration_months: 8,
                price_cents: 320_000,
                capacity: 80,
            })
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_create_program() {
        let created = test_program("prog1", "Cybersecurity");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<program::Model>::new()])
            .append_query_results([[created.clone()]])
            .into_connection();

        let result = service(db)
            .create(CreateProgramInput {
                name: "Cybersecurity".to_string(),
                description: None,
                duration_months: 12,
                price_cents: 400_000,
                capacity: 40,
            })
            .await
            .unwrap();

        assert_eq!(result.name, "Cybersecurity");
    }
}
