//! Attendance repository.

use std::sync::Arc;

use crate::entities::{AttendanceRecord, attendance_record};
use campus_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

/// Attendance repository for database operations.
#[derive(Clone)]
pub struct AttendanceRepository {
    db: Arc<DatabaseConnection>,
}

impl AttendanceRepository {
    /// Create a new attendance repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find the record for a student on a given day, if any.
    pub async fn find_by_student_and_date(
        &self,
        student_id: &str,
        date: chrono::NaiveDate,
    ) -> AppResult<Option<attendance_record::Model>> {
        AttendanceRecord::find()
            .filter(attendance_record::Column::StudentId.eq(student_id))
            .filter(attendance_record::Column::Date.eq(date))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List all records for a given day.
    pub async fn find_by_date(
        &self,
        date: chrono::NaiveDate,
    ) -> AppResult<Vec<attendance_record::Model>> {
        AttendanceRecord::find()
            .filter(attendance_record::Column::Date.eq(date))
            .order_by_asc(attendance_record::Column::StudentId)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List a student's history, newest day first (paginated).
    pub async fn find_by_student(
        &self,
        student_id: &str,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<attendance_record::Model>> {
        AttendanceRecord::find()
            .filter(attendance_record::Column::StudentId.eq(student_id))
            .order_by_desc(attendance_record::Column::Date)
            .offset(offset)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count a student's records with a given status.
    pub async fn count_for_student(
        &self,
        student_id: &str,
        status: attendance_record::AttendanceStatus,
    ) -> AppResult<u64> {
        AttendanceRecord::find()
            .filter(attendance_record::Column::StudentId.eq(student_id))
            .filter(attendance_record::Column::Status.eq(status))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new record.
    pub async fn create(
        &self,
        model: attendance_record::ActiveModel,
    ) -> AppResult<attendance_record::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update an existing record.
    pub async fn update(
        &self,
        model: attendance_record::ActiveModel,
    ) -> AppResult<attendance_record::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
