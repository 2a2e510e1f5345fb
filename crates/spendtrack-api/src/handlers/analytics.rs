//! Analytics handlers.

use axum::Json;
use axum::extract::{Query, State};

use spendtrack_database::repositories::analytics::{
    CategoryBreakdown, MonthlyTrend, SpendSummary, TopSpender,
};

use crate::dto::request::{SummaryQueryParams, TrendQueryParams};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/analytics/summary
pub async fn summary(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<SummaryQueryParams>,
) -> Result<Json<ApiResponse<SpendSummary>>, ApiError> {
    let summary = state.analytics_service.summary(&auth, params.days).await?;

    Ok(Json(ApiResponse::ok(summary)))
}

/// GET /api/analytics/categories
pub async fn categories(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<CategoryBreakdown>>>, ApiError> {
    let breakdown = state.analytics_service.categories(&auth).await?;

    Ok(Json(ApiResponse::ok(breakdown)))
}

/// GET /api/analytics/trends
pub async fn trends(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<TrendQueryParams>,
) -> Result<Json<ApiResponse<Vec<MonthlyTrend>>>, ApiError> {
    let trend = state.analytics_service.trends(&auth, params.months).await?;

    Ok(Json(ApiResponse::ok(trend)))
}

/// GET /api/analytics/top-spenders
pub async fn top_spenders(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<TopSpender>>>, ApiError> {
    let spenders = state.analytics_service.top_spenders(&auth).await?;

    Ok(Json(ApiResponse::ok(spenders)))
}
