//! Invoice repository.

use std::sync::Arc;

use crate::entities::{Invoice, invoice};
use campus_common::{AppError, AppResult};
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

/// Invoice repository for database operations.
#[derive(Clone)]
pub struct InvoiceRepository {
    db: Arc<DatabaseConnection>,
}

impl InvoiceRepository {
    /// Create a new invoice repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an invoice by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<invoice::Model>> {
        Invoice::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find an invoice by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<invoice::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Invoice {id} not found")))
    }

    /// List invoices, optionally by status, newest first (paginated).
    pub async fn find_all(
        &self,
        status: Option<invoice::InvoiceStatus>,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<invoice::Model>> {
        let mut query = Invoice::find()
            .order_by_desc(invoice::Column::IssuedOn)
            .order_by_desc(invoice::Column::Id);

        if let Some(s) = status {
            query = query.filter(invoice::Column::Status.eq(s));
        }

        query
            .offset(offset)
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List a student's invoices, newest first.
    pub async fn find_by_student(&self, student_id: &str) -> AppResult<Vec<invoice::Model>> {
        Invoice::find()
            .filter(invoice::Column::StudentId.eq(student_id))
            .order_by_desc(invoice::Column::IssuedOn)
            .order_by_desc(invoice::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new invoice.
    pub async fn create(&self, model: invoice::ActiveModel) -> AppResult<invoice::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update an invoice.
    pub async fn update(&self, model: invoice::ActiveModel) -> AppResult<invoice::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Flip pending invoices past their due date to overdue.
    ///
    /// Single conditional UPDATE; returns the number of invoices flipped.
    pub async fn mark_overdue(&self, today: chrono::NaiveDate) -> AppResult<u64> {
        let result = Invoice::update_many()
            .col_expr(
                invoice::Column::Status,
                invoice::InvoiceStatus::Overdue.as_enum(),
            )
            .filter(invoice::Column::Status.eq(invoice::InvoiceStatus::Pending))
            .filter(invoice::Column::DueOn.lt(today))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected)
    }
}
