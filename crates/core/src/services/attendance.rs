//! Attendance service.

use campus_common::AppResult;
use campus_db::{
    entities::{attendance_record, attendance_record::AttendanceStatus},
    repositories::AttendanceRepository,
};
use sea_orm::Set;
use serde::{Deserialize, Serialize};

/// Input for marking one student's attendance on a day.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkAttendanceInput {
    pub student_id: String,
    pub date: chrono::NaiveDate,
    pub status: AttendanceStatus,
    pub check_in: Option<chrono::NaiveTime>,
    pub check_out: Option<chrono::NaiveTime>,
    pub notes: Option<String>,
}

/// Per-student attendance tallies.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummary {
    pub present: u64,
    pub absent: u64,
    pub late: u64,
    pub excused: u64,
}

/// Attendance service.
#[derive(Clone)]
pub struct AttendanceService {
    attendance_repo: AttendanceRepository,
}

impl AttendanceService {
    /// Create a new attendance service.
    #[must_use]
    pub const fn new(attendance_repo: AttendanceRepository) -> Self {
        Self { attendance_repo }
    }

    /// Mark a student's attendance for a day.
    ///
    /// One record per student per day: marking again replaces the earlier
    /// status instead of adding a second row.
    pub async fn mark(&self, input: MarkAttendanceInput) -> AppResult<attendance_record::Model> {
        let existing = self
            .attendance_repo
            .find_by_student_and_date(&input.student_id, input.date)
            .await?;

        let record = match existing {
            Some(record) => {
                let mut active: attendance_record::ActiveModel = record.into();
                active.status = Set(input.status);
                active.check_in = Set(input.check_in);
                active.check_out = Set(input.check_out);
                active.notes = Set(input.notes);
                active.updated_at = Set(Some(chrono::Utc::now().into()));
                self.attendance_repo.update(active).await?
            }
            None => {
                let model = attendance_record::ActiveModel {
                    id: Set(crate::generate_id()),
                    student_id: Set(input.student_id),
                    date: Set(input.date),
                    status: Set(input.status),
                    check_in: Set(input.check_in),
                    check_out: Set(input.check_out),
                    notes: Set(input.notes),
                    created_at: Set(chrono::Utc::now().into()),
                    updated_at: Set(None),
                };
                self.attendance_repo.create(model).await?
            }
        };

        tracing::debug!(
            student_id = %record.student_id,
            date = %record.date,
            status = ?record.status,
            "Attendance marked"
        );

        Ok(record)
    }

    /// Mark a whole class for a day.
    ///
    /// Records are written one by one; the first failure aborts and is
    /// returned, leaving earlier marks in place (re-marking is an upsert,
    /// so retrying the batch is safe).
    pub async fn mark_bulk(
        &self,
        inputs: Vec<MarkAttendanceInput>,
    ) -> AppResult<Vec<attendance_record::Model>> {
        let mut records = Vec::with_capacity(inputs.len());

        for input in inputs {
            records.push(self.mark(input).await?);
        }

        Ok(records)
    }

    /// The attendance sheet for a day.
    pub async fn sheet_for_date(
        &self,
        date: chrono::NaiveDate,
    ) -> AppResult<Vec<attendance_record::Model>> {
        self.attendance_repo.find_by_date(date).await
    }

    /// A student's attendance history, newest first.
    pub async fn history(
        &self,
        student_id: &str,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<attendance_record::Model>> {
        self.attendance_repo
            .find_by_student(student_id, limit, offset)
            .await
    }

    /// Per-status tallies for a student.
    pub async fn summary(&self, student_id: &str) -> AppResult<AttendanceSummary> {
        Ok(AttendanceSummary {
            present: self
                .attendance_repo
                .count_for_student(student_id, AttendanceStatus::Present)
                .await?,
            absent: self
                .attendance_repo
                .count_for_student(student_id, AttendanceStatus::Absent)
                .await?,
            late: self
                .attendance_repo
                .count_for_student(student_id, AttendanceStatus::Late)
                .await?,
            excused: self
                .attendance_repo
                .count_for_student(student_id, AttendanceStatus::Excused)
                .await?,
        })
    }

    /// Whether a user may read a student's attendance.
    ///
    /// Admins and teachers see everyone; students only themselves.
    #[must_use]
    pub fn may_view(
        viewer_id: &str,
        viewer_role: campus_db::entities::user::Role,
        student_id: &str,
    ) -> bool {
        use campus_db::entities::user::Role;
        match viewer_role {
            Role::Admin | Role::Teacher => true,
            Role::Student => viewer_id == student_id,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use campus_db::entities::user::Role;
    use chrono::{NaiveDate, Utc};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn test_record(id: &str, status: AttendanceStatus) -> attendance_record::Model {
        attendance_record::Model {
            id: id.to_string(),
            student_id: "stu1".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 2, 23).unwrap(),
            status,
            check_in: None,
            check_out: None,
            notes: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn mark_input(status: AttendanceStatus) -> MarkAttendanceInput {
        MarkAttendanceInput {
            student_id: "stu1".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 2, 23).unwrap(),
            status,
            check_in: None,
            check_out: None,
            notes: None,
        }
    }

    fn service(db: sea_orm::DatabaseConnection) -> AttendanceService {
        AttendanceService::new(AttendanceRepository::new(Arc::new(db)))
    }

    #[tokio::test]
    async fn test_mark_creates_record_when_none_exists() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<attendance_record::Model>::new()])
            .append_query_results([[test_record("att1", AttendanceStatus::Present)]])
            .into_connection();

        let record = service(db)
            .mark(mark_input(AttendanceStatus::Present))
            .await
            .unwrap();

        assert_eq!(record.status, AttendanceStatus::Present);
    }

    #[tokio::test]
    async fn test_mark_twice_updates_in_place() {
        // First mark exists as present; re-marking as late must update the
        // same row rather than inserting a second one.
        let mut updated = test_record("att1", AttendanceStatus::Late);
        updated.updated_at = Some(Utc::now().into());

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_record("att1", AttendanceStatus::Present)]])
            .append_query_results([[updated]])
            .into_connection();

        let record = service(db)
            .mark(mark_input(AttendanceStatus::Late))
            .await
            .unwrap();

        assert_eq!(record.id, "att1");
        assert_eq!(record.status, AttendanceStatus::Late);
        assert!(record.updated_at.is_some());
    }

    #[test]
    fn test_students_only_view_their_own_attendance() {
        assert!(AttendanceService::may_view("admin1", Role::Admin, "stu1"));
        assert!(AttendanceService::may_view("t1", Role::Teacher, "stu1"));
        assert!(AttendanceService::may_view("stu1", Role::Student, "stu1"));
        assert!(!AttendanceService::may_view("stu2", Role::Student, "stu1"));
    }
}
