//! Request DTOs with validation rules.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use spendtrack_core::error::AppError;
use spendtrack_database::repositories::audit::AuditFilter;
use spendtrack_database::repositories::expense::ExpenseFilter;
use spendtrack_entity::user::UserRole;

/// POST /api/auth/login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login email.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// POST /api/users
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Login email (unique).
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Initial password. The minimum length is enforced against
    /// configuration in the service layer.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// Display name.
    #[validate(length(min = 1, max = 100, message = "Display name must be 1-100 characters"))]
    pub display_name: String,
    /// Role assignment.
    pub role: UserRole,
}

/// PUT /api/users/{id}
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    /// New login email.
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    /// New display name.
    #[validate(length(min = 1, max = 100, message = "Display name must be 1-100 characters"))]
    pub display_name: Option<String>,
    /// New role.
    pub role: Option<UserRole>,
    /// New password.
    pub password: Option<String>,
}

/// PUT /api/expenses/{id}/status
#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    /// Target status, `"approved"` or `"rejected"`.
    pub status: String,
    /// Rejection reason, only meaningful for rejections.
    pub reason: Option<String>,
}

/// Query parameters for expense list and export endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ExpenseQueryParams {
    /// Restrict to a single owner (admin only; employees are always
    /// scoped to themselves).
    pub user_id: Option<Uuid>,
    /// Restrict to a category.
    pub category: Option<String>,
    /// Restrict to a status.
    pub status: Option<String>,
    /// Inclusive lower bound on the expense date.
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound on the expense date.
    pub end_date: Option<NaiveDate>,
}

impl ExpenseQueryParams {
    /// Parses the string-typed parameters into a repository filter.
    pub fn into_filter(self) -> Result<ExpenseFilter, AppError> {
        Ok(ExpenseFilter {
            owner_id: self.user_id,
            category: self.category.as_deref().map(str::parse).transpose()?,
            status: self.status.as_deref().map(str::parse).transpose()?,
            start_date: self.start_date,
            end_date: self.end_date,
        })
    }
}

/// Query parameters for audit log list and export endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct AuditQueryParams {
    /// Restrict to entries recorded by this actor.
    pub actor_id: Option<Uuid>,
    /// Restrict to this action kind.
    pub action: Option<String>,
    /// Inclusive lower bound on the entry timestamp.
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on the entry timestamp.
    pub to: Option<DateTime<Utc>>,
}

impl AuditQueryParams {
    /// Parses the string-typed parameters into a repository filter.
    pub fn into_filter(self) -> Result<AuditFilter, AppError> {
        Ok(AuditFilter {
            actor_id: self.actor_id,
            action: self.action.as_deref().map(str::parse).transpose()?,
            from: self.from,
            to: self.to,
        })
    }
}

/// Query parameters for GET /api/analytics/summary.
#[derive(Debug, Default, Deserialize)]
pub struct SummaryQueryParams {
    /// Window size in days.
    pub days: Option<i64>,
}

/// Query parameters for GET /api/analytics/trends.
#[derive(Debug, Default, Deserialize)]
pub struct TrendQueryParams {
    /// Window size in months.
    pub months: Option<i64>,
}
