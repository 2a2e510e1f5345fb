//! Read-only SQL aggregations backing the analytics endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use spendtrack_core::error::{AppError, ErrorKind};
use spendtrack_core::result::AppResult;
use spendtrack_entity::expense::ExpenseCategory;

/// Spend totals and per-status counts over a time window.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SpendSummary {
    /// Sum of all matching expense amounts.
    pub total_amount: Decimal,
    /// Number of matching expenses.
    pub expense_count: i64,
    /// Number of pending expenses.
    pub pending_count: i64,
    /// Number of approved expenses.
    pub approved_count: i64,
    /// Number of rejected expenses.
    pub rejected_count: i64,
}

/// Per-category aggregation row.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CategoryBreakdown {
    /// The expense category.
    pub category: ExpenseCategory,
    /// Sum of amounts in this category.
    pub total_amount: Decimal,
    /// Number of expenses in this category.
    pub expense_count: i64,
}

/// Monthly spend aggregation row.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MonthlyTrend {
    /// First day of the month.
    pub month: NaiveDate,
    /// Sum of amounts in this month.
    pub total_amount: Decimal,
    /// Number of expenses in this month.
    pub expense_count: i64,
}

/// Top-spender aggregation row, ranked by approved total.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TopSpender {
    /// The spending user.
    pub user_id: Uuid,
    /// The user's display name.
    pub display_name: String,
    /// The user's email.
    pub email: String,
    /// Sum of approved expense amounts.
    pub approved_total: Decimal,
    /// Number of approved expenses.
    pub approved_count: i64,
}

/// Repository for analytics aggregation queries.
#[derive(Debug, Clone)]
pub struct AnalyticsRepository {
    pool: PgPool,
}

impl AnalyticsRepository {
    /// Create a new analytics repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Spend summary over the last `days` days.
    ///
    /// When `owner_id` is set, only that user's expenses are counted.
    pub async fn summary(&self, days: i64, owner_id: Option<Uuid>) -> AppResult<SpendSummary> {
        sqlx::query_as::<_, SpendSummary>(
            "SELECT COALESCE(SUM(amount), 0) AS total_amount, \
                    COUNT(*) AS expense_count, \
                    COUNT(*) FILTER (WHERE status = 'pending') AS pending_count, \
                    COUNT(*) FILTER (WHERE status = 'approved') AS approved_count, \
                    COUNT(*) FILTER (WHERE status = 'rejected') AS rejected_count \
             FROM expenses \
             WHERE expense_date >= CURRENT_DATE - $1::INT \
               AND ($2::UUID IS NULL OR user_id = $2)",
        )
        .bind(days)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to compute summary", e))
    }

    /// Totals and counts per category, largest total first.
    pub async fn category_breakdown(&self) -> AppResult<Vec<CategoryBreakdown>> {
        sqlx::query_as::<_, CategoryBreakdown>(
            "SELECT category, \
                    COALESCE(SUM(amount), 0) AS total_amount, \
                    COUNT(*) AS expense_count \
             FROM expenses \
             GROUP BY category \
             ORDER BY total_amount DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to compute category breakdown", e)
        })
    }

    /// Monthly spend totals for the last `months` months, oldest first.
    pub async fn monthly_trend(&self, months: i64) -> AppResult<Vec<MonthlyTrend>> {
        sqlx::query_as::<_, MonthlyTrend>(
            "SELECT DATE_TRUNC('month', expense_date)::DATE AS month, \
                    COALESCE(SUM(amount), 0) AS total_amount, \
                    COUNT(*) AS expense_count \
             FROM expenses \
             WHERE expense_date >= DATE_TRUNC('month', CURRENT_DATE) \
                                   - make_interval(months => $1::INT) \
             GROUP BY month \
             ORDER BY month ASC",
        )
        .bind(months)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to compute monthly trend", e)
        })
    }

    /// Users ranked by approved expense total.
    pub async fn top_spenders(&self, limit: i64) -> AppResult<Vec<TopSpender>> {
        sqlx::query_as::<_, TopSpender>(
            "SELECT u.id AS user_id, \
                    u.display_name, \
                    u.email, \
                    COALESCE(SUM(e.amount), 0) AS approved_total, \
                    COUNT(e.id) AS approved_count \
             FROM users u \
             JOIN expenses e ON e.user_id = u.id AND e.status = 'approved' \
             GROUP BY u.id, u.display_name, u.email \
             ORDER BY approved_total DESC \
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to compute top spenders", e)
        })
    }
}
