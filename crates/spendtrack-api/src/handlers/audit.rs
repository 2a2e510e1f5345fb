//! Audit log handlers.

use axum::Json;
use axum::extract::{Query, State};
use axum::response::Response;

use spendtrack_core::types::pagination::PageResponse;
use spendtrack_entity::audit::model::AuditLogEntry;

use crate::dto::request::AuditQueryParams;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::handlers::expense::csv_attachment;
use crate::state::AppState;

/// GET /api/audit (also mounted as GET /api/logs)
pub async fn search_audit(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(pagination): Query<PaginationParams>,
    Query(params): Query<AuditQueryParams>,
) -> Result<Json<ApiResponse<PageResponse<AuditLogEntry>>>, ApiError> {
    let filter = params.into_filter()?;
    let page = pagination.into_page_request();

    let result = state.audit_service.search(&auth, filter, page).await?;

    Ok(Json(ApiResponse::ok(result)))
}

/// GET /api/audit/export — CSV download
pub async fn export_audit(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<AuditQueryParams>,
) -> Result<Response, ApiError> {
    let filter = params.into_filter()?;
    let csv = state.audit_service.export_csv(&auth, filter).await?;

    csv_attachment(csv, "audit-log.csv")
}
