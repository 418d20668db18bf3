//! Finance service: invoice issuing and payment tracking.

use campus_common::{AppError, AppResult};
use campus_db::{
    entities::{invoice, invoice::InvoiceStatus},
    repositories::InvoiceRepository,
};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Input for issuing an invoice.
#[derive(Debug, Deserialize, Validate)]
pub struct IssueInvoiceInput {
    pub student_id: String,

    #[validate(range(min = 1))]
    pub amount_cents: i64,

    pub due_on: chrono::NaiveDate,
}

/// Finance service.
#[derive(Clone)]
pub struct FinanceService {
    invoice_repo: InvoiceRepository,
}

impl FinanceService {
    /// Create a new finance service.
    #[must_use]
    pub const fn new(invoice_repo: InvoiceRepository) -> Self {
        Self { invoice_repo }
    }

    /// Issue a new invoice to a student.
    pub async fn issue(&self, input: IssueInvoiceInput) -> AppResult<invoice::Model> {
        input.validate()?;

        let today = chrono::Utc::now().date_naive();

        if input.due_on < today {
            return Err(AppError::Validation(
                "Due date cannot be in the past".to_string(),
            ));
        }

        let model = invoice::ActiveModel {
            id: Set(crate::generate_id()),
            student_id: Set(input.student_id),
            amount_cents: Set(input.amount_cents),
            status: Set(InvoiceStatus::Pending),
            issued_on: Set(today),
            due_on: Set(input.due_on),
            paid_at: Set(None),
            created_at: Set(chrono::Utc::now().into()),
            updated_at: Set(None),
        };

        let invoice = self.invoice_repo.create(model).await?;

        tracing::info!(
            invoice_id = %invoice.id,
            student_id = %invoice.student_id,
            amount_cents = invoice.amount_cents,
            "Invoice issued"
        );

        Ok(invoice)
    }

    /// List invoices with an optional status filter.
    pub async fn list(
        &self,
        status: Option<InvoiceStatus>,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<invoice::Model>> {
        self.invoice_repo.find_all(status, limit, offset).await
    }

    /// List a student's invoices.
    pub async fn list_for_student(&self, student_id: &str) -> AppResult<Vec<invoice::Model>> {
        self.invoice_repo.find_by_student(student_id).await
    }

    /// Mark an invoice paid.
    pub async fn mark_paid(&self, id: &str) -> AppResult<invoice::Model> {
        let invoice = self.invoice_repo.get_by_id(id).await?;

        if invoice.status == InvoiceStatus::Paid {
            return Err(AppError::Conflict(format!("Invoice {id} is already paid")));
        }

        let mut active: invoice::ActiveModel = invoice.into();
        active.status = Set(InvoiceStatus::Paid);
        active.paid_at = Set(Some(chrono::Utc::now().into()));
        active.updated_at = Set(Some(chrono::Utc::now().into()));

        let updated = self.invoice_repo.update(active).await?;

        tracing::info!(invoice_id = %id, "Invoice paid");

        Ok(updated)
    }

    /// Flip pending invoices past their due date to overdue.
    pub async fn sweep_overdue(&self) -> AppResult<u64> {
        let flipped = self
            .invoice_repo
            .mark_overdue(chrono::Utc::now().date_naive())
            .await?;

        if flipped > 0 {
            tracing::info!(flipped, "Invoices marked overdue");
        }

        Ok(flipped)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn test_invoice(id: &str, status: InvoiceStatus) -> invoice::Model {
        let today = Utc::now().date_naive();
        invoice::Model {
            id: id.to_string(),
            student_id: "stu1".to_string(),
            amount_cents: 120_000,
            status,
            issued_on: today,
            due_on: today + chrono::Duration::days(30),
            paid_at: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn service(db: sea_orm::DatabaseConnection) -> FinanceService {
        FinanceService::new(InvoiceRepository::new(Arc::new(db)))
    }

    #[tokio::test]
    async fn test_issue_rejects_past_due_date() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let result = service(db)
            .issue(IssueInvoiceInput {
                student_id: "stu1".to_string(),
                amount_cents: 120_000,
                due_on: Utc::now().date_naive() - chrono::Duration::days(1),
            })
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_mark_paid_twice_conflicts() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_invoice("inv1", InvoiceStatus::Paid)]])
            .into_connection();

        let result = service(db).mark_paid("inv1").await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_mark_paid_sets_paid_at() {
        let mut paid = test_invoice("inv1", InvoiceStatus::Paid);
        paid.paid_at = Some(Utc::now().into());

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_invoice("inv1", InvoiceStatus::Pending)]])
            .append_query_results([[paid]])
            .into_connection();

        let result = service(db).mark_paid("inv1").await.unwrap();

        assert_eq!(result.status, InvoiceStatus::Paid);
        assert!(result.paid_at.is_some());
    }

    #[tokio::test]
    async fn test_sweep_overdue_reports_count() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 4,
            }])
            .into_connection();

        let flipped = service(db).sweep_overdue().await.unwrap();

        assert_eq!(flipped, 4);
    }
}
