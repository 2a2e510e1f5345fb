//! Expense entity model.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::category::ExpenseCategory;
use super::status::ExpenseStatus;

/// A submitted expense claim.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Expense {
    /// Unique expense identifier.
    pub id: Uuid,
    /// The employee who owns this expense.
    pub user_id: Uuid,
    /// Claimed amount. Fixed-point decimal, never floating point.
    pub amount: Decimal,
    /// Expense category.
    pub category: ExpenseCategory,
    /// The date the expense was incurred (not the submission date).
    pub expense_date: NaiveDate,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Review status.
    pub status: ExpenseStatus,
    /// Reason supplied by the reviewing admin on rejection.
    pub rejection_reason: Option<String>,
    /// Relative path of the uploaded receipt file, if any.
    pub receipt_path: Option<String>,
    /// When the expense was created.
    pub created_at: DateTime<Utc>,
    /// When the expense was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new expense.
///
/// New expenses always start in [`ExpenseStatus::Pending`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateExpense {
    /// The owning employee.
    pub user_id: Uuid,
    /// Claimed amount.
    pub amount: Decimal,
    /// Expense category.
    pub category: ExpenseCategory,
    /// Date the expense was incurred.
    pub expense_date: NaiveDate,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Relative path of the uploaded receipt file.
    pub receipt_path: Option<String>,
}

/// Content update for an existing expense.
///
/// Applying any content update resets the expense to
/// [`ExpenseStatus::Pending`] and clears the rejection reason, forcing
/// re-review. `None` fields are left unchanged, except `receipt_path`
/// which is only replaced when a new receipt was uploaded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateExpense {
    /// New amount.
    pub amount: Option<Decimal>,
    /// New category.
    pub category: Option<ExpenseCategory>,
    /// New expense date.
    pub expense_date: Option<NaiveDate>,
    /// New notes.
    pub notes: Option<String>,
    /// New receipt path.
    pub receipt_path: Option<String>,
}
