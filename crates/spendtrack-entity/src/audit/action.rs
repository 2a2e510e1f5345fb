//! Audit action enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of action recorded in an audit entry.
///
/// Closed but designed for extension: adding a variant only requires a
/// new enum value here and in the `audit_action` PostgreSQL type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "audit_action", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Login,
    Logout,
    ExpenseCreated,
    ExpenseUpdated,
    ExpenseStatusChanged,
    UserCreated,
    UserUpdated,
    UserDeleted,
    DataExported,
}

impl AuditAction {
    /// Return the action as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Logout => "logout",
            Self::ExpenseCreated => "expense_created",
            Self::ExpenseUpdated => "expense_updated",
            Self::ExpenseStatusChanged => "expense_status_changed",
            Self::UserCreated => "user_created",
            Self::UserUpdated => "user_updated",
            Self::UserDeleted => "user_deleted",
            Self::DataExported => "data_exported",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AuditAction {
    type Err = spendtrack_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "login" => Ok(Self::Login),
            "logout" => Ok(Self::Logout),
            "expense_created" => Ok(Self::ExpenseCreated),
            "expense_updated" => Ok(Self::ExpenseUpdated),
            "expense_status_changed" => Ok(Self::ExpenseStatusChanged),
            "user_created" => Ok(Self::UserCreated),
            "user_updated" => Ok(Self::UserUpdated),
            "user_deleted" => Ok(Self::UserDeleted),
            "data_exported" => Ok(Self::DataExported),
            _ => Err(spendtrack_core::AppError::validation(format!(
                "Invalid audit action: '{s}'"
            ))),
        }
    }
}
