//! CSV export of expense data.

use spendtrack_auth::rbac::policies::SystemPermission;
use spendtrack_core::error::AppError;
use spendtrack_database::repositories::expense::ExpenseFilter;
use spendtrack_entity::audit::AuditAction;
use spendtrack_entity::expense::Expense;

use crate::context::RequestContext;
use crate::csv::write_row;

use super::service::ExpenseService;

impl ExpenseService {
    /// Export the filtered expense set as CSV (admin only).
    ///
    /// The export is itself audited with a `DataExported` entry that
    /// records the number of rows written.
    pub async fn export_csv(
        &self,
        ctx: &RequestContext,
        filter: ExpenseFilter,
    ) -> Result<String, AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::ExpenseExport)?;

        let expenses = self.expense_repo.find_all_filtered(&filter).await?;
        let out = render_csv(&expenses);

        self.audit
            .record(
                ctx.user_id,
                AuditAction::DataExported,
                format!("Exported {} expenses as CSV", expenses.len()),
            )
            .await;

        Ok(out)
    }
}

/// Render expenses as a flat CSV table.
fn render_csv(expenses: &[Expense]) -> String {
    let mut out = String::new();
    write_row(
        &mut out,
        &[
            "id",
            "user_id",
            "amount",
            "category",
            "expense_date",
            "status",
            "notes",
            "rejection_reason",
            "created_at",
        ],
    );

    for expense in expenses {
        write_row(
            &mut out,
            &[
                &expense.id.to_string(),
                &expense.user_id.to_string(),
                &expense.amount.to_string(),
                expense.category.as_str(),
                &expense.expense_date.to_string(),
                expense.status.as_str(),
                expense.notes.as_deref().unwrap_or(""),
                expense.rejection_reason.as_deref().unwrap_or(""),
                &expense.created_at.to_rfc3339(),
            ],
        );
    }

    out
}
