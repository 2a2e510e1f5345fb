//! Audit log repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use spendtrack_core::error::{AppError, ErrorKind};
use spendtrack_core::result::AppResult;
use spendtrack_core::types::pagination::{PageRequest, PageResponse};
use spendtrack_entity::audit::model::{AuditLogEntry, CreateAuditLogEntry};
use spendtrack_entity::audit::AuditAction;

/// Filter parameters for audit log queries.
#[derive(Debug, Clone, Default)]
pub struct AuditFilter {
    /// Restrict to entries recorded by this actor.
    pub actor_id: Option<Uuid>,
    /// Restrict to this action kind.
    pub action: Option<AuditAction>,
    /// Inclusive lower bound on `created_at`.
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `created_at`.
    pub to: Option<DateTime<Utc>>,
}

impl AuditFilter {
    fn where_clause(&self) -> (String, u32) {
        let mut conditions = Vec::new();
        let mut param_idx = 1u32;

        if self.actor_id.is_some() {
            conditions.push(format!("actor_id = ${param_idx}"));
            param_idx += 1;
        }
        if self.action.is_some() {
            conditions.push(format!("action = ${param_idx}"));
            param_idx += 1;
        }
        if self.from.is_some() {
            conditions.push(format!("created_at >= ${param_idx}"));
            param_idx += 1;
        }
        if self.to.is_some() {
            conditions.push(format!("created_at <= ${param_idx}"));
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

/// Repository for the append-only audit log.
///
/// Deliberately exposes no update or delete operations.
#[derive(Debug, Clone)]
pub struct AuditLogRepository {
    pool: PgPool,
}

impl AuditLogRepository {
    /// Create a new audit log repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create an audit log entry.
    pub async fn create(&self, data: &CreateAuditLogEntry) -> AppResult<AuditLogEntry> {
        sqlx::query_as::<_, AuditLogEntry>(
            "INSERT INTO audit_log (actor_id, action, description) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(data.actor_id)
        .bind(data.action)
        .bind(&data.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create audit entry", e))
    }

    /// Search the audit log with filters, newest first.
    pub async fn search(
        &self,
        filter: &AuditFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<AuditLogEntry>> {
        let (where_clause, param_idx) = filter.where_clause();

        let count_sql = format!("SELECT COUNT(*) FROM audit_log {where_clause}");
        let select_sql = format!(
            "SELECT * FROM audit_log {where_clause} \
             ORDER BY created_at DESC LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        let mut select_query = sqlx::query_as::<_, AuditLogEntry>(&select_sql);

        if let Some(actor) = filter.actor_id {
            count_query = count_query.bind(actor);
            select_query = select_query.bind(actor);
        }
        if let Some(action) = filter.action {
            count_query = count_query.bind(action);
            select_query = select_query.bind(action);
        }
        if let Some(from) = filter.from {
            count_query = count_query.bind(from);
            select_query = select_query.bind(from);
        }
        if let Some(to) = filter.to {
            count_query = count_query.bind(to);
            select_query = select_query.bind(to);
        }

        let total = count_query.fetch_one(&self.pool).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count audit entries", e)
        })?;

        let entries = select_query
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to search audit log", e)
            })?;

        Ok(PageResponse::new(
            entries,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Fetch every audit entry matching the filter, newest first.
    ///
    /// Used by the CSV export path.
    pub async fn find_all_filtered(&self, filter: &AuditFilter) -> AppResult<Vec<AuditLogEntry>> {
        let (where_clause, _) = filter.where_clause();
        let select_sql =
            format!("SELECT * FROM audit_log {where_clause} ORDER BY created_at DESC");

        let mut select_query = sqlx::query_as::<_, AuditLogEntry>(&select_sql);

        if let Some(actor) = filter.actor_id {
            select_query = select_query.bind(actor);
        }
        if let Some(action) = filter.action {
            select_query = select_query.bind(action);
        }
        if let Some(from) = filter.from {
            select_query = select_query.bind(from);
        }
        if let Some(to) = filter.to {
            select_query = select_query.bind(to);
        }

        select_query.fetch_all(&self.pool).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to export audit log", e)
        })
    }
}
