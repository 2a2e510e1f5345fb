//! Audit trail service — records entries and serves the admin query API.

use std::sync::Arc;

use tracing::error;
use uuid::Uuid;

use spendtrack_auth::rbac::RbacEnforcer;
use spendtrack_auth::rbac::policies::SystemPermission;
use spendtrack_core::error::AppError;
use spendtrack_core::types::pagination::{PageRequest, PageResponse};
use spendtrack_database::repositories::audit::{AuditFilter, AuditLogRepository};
use spendtrack_entity::audit::model::{AuditLogEntry, CreateAuditLogEntry};
use spendtrack_entity::audit::AuditAction;

use crate::context::RequestContext;
use crate::csv::write_row;

/// Records and queries the append-only audit trail.
#[derive(Debug, Clone)]
pub struct AuditService {
    /// Audit log repository.
    audit_repo: Arc<AuditLogRepository>,
    /// RBAC enforcer.
    rbac: Arc<RbacEnforcer>,
}

impl AuditService {
    /// Creates a new audit service.
    pub fn new(audit_repo: Arc<AuditLogRepository>, rbac: Arc<RbacEnforcer>) -> Self {
        Self { audit_repo, rbac }
    }

    /// Record an audit entry for a committed mutation.
    ///
    /// Audit recording never fails the primary operation: a failed write
    /// is logged and swallowed. The mutation has already committed at
    /// this point, so rolling it back is not an option.
    pub async fn record(&self, actor_id: Uuid, action: AuditAction, description: impl Into<String>) {
        let entry = CreateAuditLogEntry {
            actor_id,
            action,
            description: description.into(),
        };

        if let Err(e) = self.audit_repo.create(&entry).await {
            error!(
                actor_id = %actor_id,
                action = %action,
                error = %e,
                "Failed to record audit entry"
            );
        }
    }

    /// Search the audit log with filters (admin only).
    pub async fn search(
        &self,
        ctx: &RequestContext,
        filter: AuditFilter,
        page: PageRequest,
    ) -> Result<PageResponse<AuditLogEntry>, AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::AuditView)?;

        self.audit_repo.search(&filter, &page).await
    }

    /// Export the filtered audit log as CSV (admin only).
    ///
    /// The export itself is audited: one `DataExported` entry recording
    /// the number of rows written.
    pub async fn export_csv(
        &self,
        ctx: &RequestContext,
        filter: AuditFilter,
    ) -> Result<String, AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::AuditExport)?;

        let entries = self.audit_repo.find_all_filtered(&filter).await?;

        let mut out = String::new();
        write_row(&mut out, &["id", "actor_id", "action", "description", "created_at"]);
        for entry in &entries {
            write_row(
                &mut out,
                &[
                    &entry.id.to_string(),
                    &entry.actor_id.to_string(),
                    entry.action.as_str(),
                    &entry.description,
                    &entry.created_at.to_rfc3339(),
                ],
            );
        }

        self.record(
            ctx.user_id,
            AuditAction::DataExported,
            format!("Exported {} audit log entries as CSV", entries.len()),
        )
        .await;

        Ok(out)
    }
}
