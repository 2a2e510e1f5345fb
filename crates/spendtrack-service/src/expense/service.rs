//! Expense CRUD and the approval workflow.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use spendtrack_auth::rbac::ownership::can_access_owned;
use spendtrack_auth::rbac::policies::SystemPermission;
use spendtrack_auth::rbac::RbacEnforcer;
use spendtrack_core::error::AppError;
use spendtrack_core::types::pagination::{PageRequest, PageResponse};
use spendtrack_database::repositories::expense::{ExpenseFilter, ExpenseRepository};
use spendtrack_entity::audit::AuditAction;
use spendtrack_entity::expense::model::{CreateExpense, UpdateExpense};
use spendtrack_entity::expense::{Expense, ExpenseStatus};

use crate::audit::AuditService;
use crate::context::RequestContext;

/// Smallest accepted expense amount.
const MIN_AMOUNT: Decimal = Decimal::from_parts(1, 0, 0, false, 2); // 0.01
/// Largest accepted expense amount.
const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// An admin decision on a pending expense.
#[derive(Debug, Clone)]
pub enum ExpenseDecision {
    /// Approve the expense.
    Approve,
    /// Reject the expense with an optional reason.
    Reject(Option<String>),
}

impl ExpenseDecision {
    /// Parses a wire-format decision. The status value is matched
    /// case-insensitively; the reason only applies to rejections.
    pub fn parse(status: &str, reason: Option<String>) -> Result<Self, AppError> {
        match status.parse::<ExpenseStatus>() {
            Ok(ExpenseStatus::Approved) => Ok(Self::Approve),
            Ok(ExpenseStatus::Rejected) => Ok(Self::Reject(reason)),
            _ => Err(AppError::validation(format!(
                "Invalid decision status: '{status}'. Expected 'approved' or 'rejected'"
            ))),
        }
    }

    fn status(&self) -> ExpenseStatus {
        match self {
            Self::Approve => ExpenseStatus::Approved,
            Self::Reject(_) => ExpenseStatus::Rejected,
        }
    }

    fn reason(&self) -> Option<&str> {
        match self {
            Self::Approve => None,
            Self::Reject(reason) => reason.as_deref(),
        }
    }
}

/// Implements the expense lifecycle: submit, edit, list, decide.
#[derive(Debug, Clone)]
pub struct ExpenseService {
    /// Expense repository.
    pub(crate) expense_repo: Arc<ExpenseRepository>,
    /// RBAC enforcer.
    pub(crate) rbac: Arc<RbacEnforcer>,
    /// Audit recorder.
    pub(crate) audit: Arc<AuditService>,
}

impl ExpenseService {
    /// Creates a new expense service.
    pub fn new(
        expense_repo: Arc<ExpenseRepository>,
        rbac: Arc<RbacEnforcer>,
        audit: Arc<AuditService>,
    ) -> Self {
        Self {
            expense_repo,
            rbac,
            audit,
        }
    }

    /// Submit a new expense. It always starts pending.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        mut data: CreateExpense,
    ) -> Result<Expense, AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::ExpenseCreate)?;

        validate_amount(data.amount)?;
        // Expenses are always submitted on the caller's own behalf.
        data.user_id = ctx.user_id;

        let expense = self.expense_repo.create(&data).await?;

        self.audit
            .record(
                ctx.user_id,
                AuditAction::ExpenseCreated,
                format!(
                    "Created expense {} ({} {})",
                    expense.id,
                    expense.amount,
                    expense.category.label()
                ),
            )
            .await;

        info!(
            user_id = %ctx.user_id,
            expense_id = %expense.id,
            amount = %expense.amount,
            category = %expense.category,
            "Expense created"
        );

        Ok(expense)
    }

    /// Fetch a single expense, subject to row-level ownership.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<Expense, AppError> {
        let expense = self
            .expense_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Expense not found"))?;

        if !can_access_owned(ctx.user_id, ctx.role, expense.user_id) {
            return Err(AppError::forbidden("Insufficient permissions"));
        }

        Ok(expense)
    }

    /// List expenses with filters and pagination.
    ///
    /// Employees are always scoped to their own rows; any `owner_id` the
    /// caller supplied is overwritten.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        mut filter: ExpenseFilter,
        page: PageRequest,
    ) -> Result<PageResponse<Expense>, AppError> {
        if !ctx.is_admin() {
            filter.owner_id = Some(ctx.user_id);
        }

        self.expense_repo.search(&filter, &page).await
    }

    /// Edit expense content. Owner or admin only.
    ///
    /// Any content edit resets the status to pending, even from a
    /// decided state, so the expense goes back through review.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        data: UpdateExpense,
    ) -> Result<Expense, AppError> {
        let existing = self
            .expense_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Expense not found"))?;

        if !can_access_owned(ctx.user_id, ctx.role, existing.user_id) {
            return Err(AppError::forbidden("Insufficient permissions"));
        }

        if let Some(amount) = data.amount {
            validate_amount(amount)?;
        }

        let expense = self.expense_repo.update_content(id, &data).await?;

        self.audit
            .record(
                ctx.user_id,
                AuditAction::ExpenseUpdated,
                format!("Updated expense {id}, status reset to pending"),
            )
            .await;

        info!(user_id = %ctx.user_id, expense_id = %id, "Expense updated");

        Ok(expense)
    }

    /// Apply an admin decision to a pending expense.
    pub async fn decide(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        decision: ExpenseDecision,
    ) -> Result<Expense, AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::ExpenseDecide)?;

        let status = decision.status();
        let updated = self
            .expense_repo
            .update_status(id, status, decision.reason())
            .await?;

        let expense = match updated {
            Some(expense) => expense,
            // Zero rows: the expense is missing or no longer pending.
            None => {
                return match self.expense_repo.find_by_id(id).await? {
                    Some(existing) if !existing.status.is_decidable() => Err(AppError::conflict(
                        "Only pending expenses can be approved or rejected",
                    )),
                    Some(_) => Err(AppError::conflict(
                        "Expense changed concurrently, retry the decision",
                    )),
                    None => Err(AppError::not_found("Expense not found")),
                };
            }
        };

        let description = match decision.reason() {
            Some(reason) => format!("Expense {id} changed to {status}: {reason}"),
            None => format!("Expense {id} changed to {status}"),
        };
        self.audit
            .record(ctx.user_id, AuditAction::ExpenseStatusChanged, description)
            .await;

        info!(
            admin_id = %ctx.user_id,
            expense_id = %id,
            status = %status,
            "Expense decided"
        );

        Ok(expense)
    }
}

/// Validate the claimed amount against the accepted range.
pub fn validate_amount(amount: Decimal) -> Result<(), AppError> {
    if amount < MIN_AMOUNT {
        return Err(AppError::validation("Amount must be at least 0.01"));
    }
    if amount > MAX_AMOUNT {
        return Err(AppError::validation("Amount must not exceed 1000000.00"));
    }
    Ok(())
}
