//! Expense repository implementation.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use spendtrack_core::error::{AppError, ErrorKind};
use spendtrack_core::result::AppResult;
use spendtrack_core::types::pagination::{PageRequest, PageResponse};
use spendtrack_entity::expense::model::{CreateExpense, UpdateExpense};
use spendtrack_entity::expense::{Expense, ExpenseCategory, ExpenseStatus};

/// Filter parameters for expense list queries.
///
/// `owner_id` is the row-level security filter: services set it to the
/// caller's id for employees and leave it `None` for admins.
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    /// Restrict to expenses owned by this user.
    pub owner_id: Option<Uuid>,
    /// Restrict to this category.
    pub category: Option<ExpenseCategory>,
    /// Restrict to this status.
    pub status: Option<ExpenseStatus>,
    /// Inclusive lower bound on `expense_date`.
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound on `expense_date`.
    pub end_date: Option<NaiveDate>,
}

impl ExpenseFilter {
    fn where_clause(&self) -> (String, u32) {
        let mut conditions = Vec::new();
        let mut param_idx = 1u32;

        if self.owner_id.is_some() {
            conditions.push(format!("user_id = ${param_idx}"));
            param_idx += 1;
        }
        if self.category.is_some() {
            conditions.push(format!("category = ${param_idx}"));
            param_idx += 1;
        }
        if self.status.is_some() {
            conditions.push(format!("status = ${param_idx}"));
            param_idx += 1;
        }
        if self.start_date.is_some() {
            conditions.push(format!("expense_date >= ${param_idx}"));
            param_idx += 1;
        }
        if self.end_date.is_some() {
            conditions.push(format!("expense_date <= ${param_idx}"));
            param_idx += 1;
        }

        let clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };
        (clause, param_idx)
    }
}

/// Repository for expense CRUD and query operations.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    pool: PgPool,
}

impl ExpenseRepository {
    /// Create a new expense repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an expense by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Expense>> {
        sqlx::query_as::<_, Expense>("SELECT * FROM expenses WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find expense", e))
    }

    /// Search expenses with filters and pagination.
    pub async fn search(
        &self,
        filter: &ExpenseFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Expense>> {
        let (where_clause, param_idx) = filter.where_clause();

        let count_sql = format!("SELECT COUNT(*) FROM expenses {where_clause}");
        let select_sql = format!(
            "SELECT * FROM expenses {where_clause} \
             ORDER BY expense_date DESC, created_at DESC LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        let mut select_query = sqlx::query_as::<_, Expense>(&select_sql);

        if let Some(owner) = filter.owner_id {
            count_query = count_query.bind(owner);
            select_query = select_query.bind(owner);
        }
        if let Some(category) = filter.category {
            count_query = count_query.bind(category);
            select_query = select_query.bind(category);
        }
        if let Some(status) = filter.status {
            count_query = count_query.bind(status);
            select_query = select_query.bind(status);
        }
        if let Some(start) = filter.start_date {
            count_query = count_query.bind(start);
            select_query = select_query.bind(start);
        }
        if let Some(end) = filter.end_date {
            count_query = count_query.bind(end);
            select_query = select_query.bind(end);
        }

        let total = count_query.fetch_one(&self.pool).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count expenses", e)
        })?;

        let expenses = select_query
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to search expenses", e)
            })?;

        Ok(PageResponse::new(
            expenses,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Fetch every expense matching the filter, without pagination.
    ///
    /// Used by the CSV export path.
    pub async fn find_all_filtered(&self, filter: &ExpenseFilter) -> AppResult<Vec<Expense>> {
        let (where_clause, _) = filter.where_clause();
        let select_sql = format!(
            "SELECT * FROM expenses {where_clause} ORDER BY expense_date DESC, created_at DESC"
        );

        let mut select_query = sqlx::query_as::<_, Expense>(&select_sql);

        if let Some(owner) = filter.owner_id {
            select_query = select_query.bind(owner);
        }
        if let Some(category) = filter.category {
            select_query = select_query.bind(category);
        }
        if let Some(status) = filter.status {
            select_query = select_query.bind(status);
        }
        if let Some(start) = filter.start_date {
            select_query = select_query.bind(start);
        }
        if let Some(end) = filter.end_date {
            select_query = select_query.bind(end);
        }

        select_query.fetch_all(&self.pool).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to export expenses", e)
        })
    }

    /// Create a new expense in `pending` status.
    pub async fn create(&self, data: &CreateExpense) -> AppResult<Expense> {
        sqlx::query_as::<_, Expense>(
            "INSERT INTO expenses (user_id, amount, category, expense_date, notes, receipt_path) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING *",
        )
        .bind(data.user_id)
        .bind(data.amount)
        .bind(data.category)
        .bind(data.expense_date)
        .bind(&data.notes)
        .bind(&data.receipt_path)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create expense", e))
    }

    /// Apply a content update.
    ///
    /// The status is unconditionally reset to `pending` and any previous
    /// rejection reason is cleared, regardless of which fields changed.
    pub async fn update_content(&self, id: Uuid, data: &UpdateExpense) -> AppResult<Expense> {
        sqlx::query_as::<_, Expense>(
            "UPDATE expenses SET amount = COALESCE($2, amount), \
                                 category = COALESCE($3, category), \
                                 expense_date = COALESCE($4, expense_date), \
                                 notes = COALESCE($5, notes), \
                                 receipt_path = COALESCE($6, receipt_path), \
                                 status = 'pending', \
                                 rejection_reason = NULL, \
                                 updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(data.amount)
        .bind(data.category)
        .bind(data.expense_date)
        .bind(&data.notes)
        .bind(&data.receipt_path)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update expense", e))?
        .ok_or_else(|| AppError::not_found(format!("Expense {id} not found")))
    }

    /// Apply an admin decision to a pending expense.
    ///
    /// The `status = 'pending'` guard makes the transition atomic: a
    /// decision racing with a content edit or another decision affects
    /// zero rows instead of overwriting.
    pub async fn update_status(
        &self,
        id: Uuid,
        status: ExpenseStatus,
        rejection_reason: Option<&str>,
    ) -> AppResult<Option<Expense>> {
        sqlx::query_as::<_, Expense>(
            "UPDATE expenses SET status = $2, rejection_reason = $3, updated_at = NOW() \
             WHERE id = $1 AND status = 'pending' RETURNING *",
        )
        .bind(id)
        .bind(status)
        .bind(rejection_reason)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update expense status", e)
        })
    }

    /// Count total expenses.
    pub async fn count(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM expenses")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count expenses", e)
            })?;
        Ok(count as u64)
    }
}
