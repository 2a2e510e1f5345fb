//! Expense review status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Review status of an expense.
///
/// The workflow is `Pending -> Approved | Rejected` by an admin decision,
/// and `Approved | Rejected -> Pending` implicitly whenever the owner (or
/// an admin) edits the expense content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "expense_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ExpenseStatus {
    /// Awaiting review.
    Pending,
    /// Approved by an admin.
    Approved,
    /// Rejected by an admin, optionally with a reason.
    Rejected,
}

impl ExpenseStatus {
    /// Check whether an admin decision can be applied to this status.
    ///
    /// Only pending expenses can be decided; re-deciding an already
    /// decided expense requires the owner to edit it back to pending
    /// first.
    pub fn is_decidable(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ExpenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExpenseStatus {
    type Err = spendtrack_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(spendtrack_core::AppError::validation(format!(
                "Invalid expense status: '{s}'. Expected one of: pending, approved, rejected"
            ))),
        }
    }
}
