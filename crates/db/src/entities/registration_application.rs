//! Registration application entity for the account approval workflow.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Review status of a registration application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum ApplicationStatus {
    #[sea_orm(string_value = "pending")]
    #[default]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// Role an applicant can request. Admin accounts are never self-requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum RequestedRole {
    #[sea_orm(string_value = "teacher")]
    Teacher,
    #[sea_orm(string_value = "student")]
    Student,
}

impl RequestedRole {
    /// The account role provisioned on approval.
    #[must_use]
    pub const fn as_role(self) -> super::user::Role {
        match self {
            Self::Teacher => super::user::Role::Teacher,
            Self::Student => super::user::Role::Student,
        }
    }
}

/// A pending request to become a teacher or student account holder.
///
/// Intake fields are immutable after submission; only the review fields
/// (`status`, `reviewed_by`, `reviewed_at`, `notes`) change, exactly once.
/// Applications are never deleted: they are the audit trail.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "registration_application")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub email: String,

    /// Lowercased email, used for duplicate checks
    pub email_lower: String,

    pub first_name: String,

    pub last_name: String,

    /// Argon2 password hash, consumed when the account is provisioned
    #[sea_orm(column_type = "Text")]
    pub password: String,

    pub requested_role: RequestedRole,

    /// Program the applicant wants to enroll in (students only)
    #[sea_orm(nullable)]
    pub program_id: Option<String>,

    #[sea_orm(nullable)]
    pub phone: Option<String>,

    #[sea_orm(nullable)]
    pub date_of_birth: Option<Date>,

    #[sea_orm(nullable)]
    pub address: Option<String>,

    #[sea_orm(nullable)]
    pub city: Option<String>,

    #[sea_orm(nullable)]
    pub country: Option<String>,

    #[sea_orm(nullable)]
    pub emergency_contact_name: Option<String>,

    #[sea_orm(nullable)]
    pub emergency_contact_phone: Option<String>,

    /// Subject specialization (teachers only)
    #[sea_orm(nullable)]
    pub specialization: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub qualifications: Option<String>,

    #[sea_orm(nullable)]
    pub experience_years: Option<i32>,

    /// Current review status
    pub status: ApplicationStatus,

    /// Admin who reviewed the application
    #[sea_orm(nullable)]
    pub reviewed_by: Option<String>,

    /// When the application was reviewed
    #[sea_orm(nullable)]
    pub reviewed_at: Option<DateTimeWithTimeZone>,

    /// Reviewer note (e.g. rejection reason)
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,

    /// When the application was submitted
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ReviewedBy",
        to = "super::user::Column::Id"
    )]
    Reviewer,
    #[sea_orm(
        belongs_to = "super::program::Entity",
        from = "Column::ProgramId",
        to = "super::program::Column::Id"
    )]
    Program,
}

impl Related<super::program::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Program.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
