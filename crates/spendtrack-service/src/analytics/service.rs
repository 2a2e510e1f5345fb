//! Analytics service — read-only aggregations over expense data.

use std::sync::Arc;

use spendtrack_auth::rbac::RbacEnforcer;
use spendtrack_auth::rbac::policies::SystemPermission;
use spendtrack_core::error::AppError;
use spendtrack_database::repositories::analytics::{
    AnalyticsRepository, CategoryBreakdown, MonthlyTrend, SpendSummary, TopSpender,
};

use crate::context::RequestContext;

/// Default summary window in days.
const DEFAULT_SUMMARY_DAYS: i64 = 30;
/// Default trend window in months.
const DEFAULT_TREND_MONTHS: i64 = 6;
/// Number of users in the top-spenders ranking.
const TOP_SPENDER_LIMIT: i64 = 10;

/// Serves the analytics endpoints.
#[derive(Debug, Clone)]
pub struct AnalyticsService {
    /// Analytics repository.
    analytics_repo: Arc<AnalyticsRepository>,
    /// RBAC enforcer.
    rbac: Arc<RbacEnforcer>,
}

impl AnalyticsService {
    /// Creates a new analytics service.
    pub fn new(analytics_repo: Arc<AnalyticsRepository>, rbac: Arc<RbacEnforcer>) -> Self {
        Self {
            analytics_repo,
            rbac,
        }
    }

    /// Spend summary over the last `days` days.
    ///
    /// Available to every authenticated user, but employees only see
    /// their own data.
    pub async fn summary(
        &self,
        ctx: &RequestContext,
        days: Option<i64>,
    ) -> Result<SpendSummary, AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::AnalyticsViewOwn)?;

        let days = normalize_window(days, DEFAULT_SUMMARY_DAYS, 365)?;
        let owner = if ctx.is_admin() {
            None
        } else {
            Some(ctx.user_id)
        };

        self.analytics_repo.summary(days, owner).await
    }

    /// Per-category totals across the whole organisation (admin only).
    pub async fn categories(&self, ctx: &RequestContext) -> Result<Vec<CategoryBreakdown>, AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::AnalyticsViewAll)?;

        self.analytics_repo.category_breakdown().await
    }

    /// Monthly spend trend over the last `months` months (admin only).
    pub async fn trends(
        &self,
        ctx: &RequestContext,
        months: Option<i64>,
    ) -> Result<Vec<MonthlyTrend>, AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::AnalyticsViewAll)?;

        let months = normalize_window(months, DEFAULT_TREND_MONTHS, 36)?;
        self.analytics_repo.monthly_trend(months).await
    }

    /// Users ranked by approved spend (admin only).
    pub async fn top_spenders(&self, ctx: &RequestContext) -> Result<Vec<TopSpender>, AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::AnalyticsViewAll)?;

        self.analytics_repo.top_spenders(TOP_SPENDER_LIMIT).await
    }
}

/// Apply the default and reject out-of-range windows.
fn normalize_window(value: Option<i64>, default: i64, max: i64) -> Result<i64, AppError> {
    let value = value.unwrap_or(default);
    if value < 1 || value > max {
        return Err(AppError::validation(format!(
            "Window must be between 1 and {max}"
        )));
    }
    Ok(value)
}
