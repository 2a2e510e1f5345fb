//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use spendtrack_auth::jwt::decoder::JwtDecoder;
use spendtrack_auth::jwt::encoder::JwtEncoder;
use spendtrack_auth::password::PasswordHasher;
use spendtrack_auth::rbac::RbacEnforcer;
use spendtrack_core::config::AppConfig;

use spendtrack_database::DatabasePool;
use spendtrack_database::repositories::analytics::AnalyticsRepository;
use spendtrack_database::repositories::audit::AuditLogRepository;
use spendtrack_database::repositories::expense::ExpenseRepository;
use spendtrack_database::repositories::user::UserRepository;

use spendtrack_service::analytics::AnalyticsService;
use spendtrack_service::audit::AuditService;
use spendtrack_service::auth::AuthService;
use spendtrack_service::expense::ExpenseService;
use spendtrack_service::user::AdminUserService;

use crate::receipt::ReceiptStore;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool handle
    pub db: DatabasePool,
    /// Receipt file storage
    pub receipt_store: Arc<ReceiptStore>,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT token encoder
    pub jwt_encoder: Arc<JwtEncoder>,
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Password hasher (Argon2id)
    pub password_hasher: Arc<PasswordHasher>,
    /// Role-based access control enforcer
    pub rbac_enforcer: Arc<RbacEnforcer>,

    // ── Repositories ─────────────────────────────────────────
    /// User repository
    pub user_repo: Arc<UserRepository>,
    /// Expense repository
    pub expense_repo: Arc<ExpenseRepository>,
    /// Audit log repository
    pub audit_repo: Arc<AuditLogRepository>,
    /// Analytics repository
    pub analytics_repo: Arc<AnalyticsRepository>,

    // ── Services ─────────────────────────────────────────────
    /// Login, logout, current user
    pub auth_service: Arc<AuthService>,
    /// Expense lifecycle and export
    pub expense_service: Arc<ExpenseService>,
    /// Admin user management
    pub user_service: Arc<AdminUserService>,
    /// Analytics aggregations
    pub analytics_service: Arc<AnalyticsService>,
    /// Audit trail recording and queries
    pub audit_service: Arc<AuditService>,
}
