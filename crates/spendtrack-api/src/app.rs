//! Application builder — wires repositories, services, and the router
//! into a running Axum server.

use std::sync::Arc;

use spendtrack_auth::jwt::decoder::JwtDecoder;
use spendtrack_auth::jwt::encoder::JwtEncoder;
use spendtrack_auth::password::PasswordHasher;
use spendtrack_auth::rbac::RbacEnforcer;
use spendtrack_core::config::AppConfig;
use spendtrack_core::error::AppError;

use spendtrack_database::DatabasePool;
use spendtrack_database::repositories::analytics::AnalyticsRepository;
use spendtrack_database::repositories::audit::AuditLogRepository;
use spendtrack_database::repositories::expense::ExpenseRepository;
use spendtrack_database::repositories::user::UserRepository;

use spendtrack_service::analytics::AnalyticsService;
use spendtrack_service::audit::AuditService;
use spendtrack_service::auth::AuthService;
use spendtrack_service::expense::ExpenseService;
use spendtrack_service::user::{AdminUserService, ensure_bootstrap_admin};

use crate::receipt::ReceiptStore;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the full application state from configuration and a connected
/// database pool.
pub fn build_state(config: AppConfig, db: DatabasePool) -> AppState {
    // ── Infrastructure ───────────────────────────────────────────
    let receipt_store = Arc::new(ReceiptStore::new(&config.storage));

    // ── Auth system ──────────────────────────────────────────────
    let password_hasher = Arc::new(PasswordHasher::new());
    let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
    let rbac_enforcer = Arc::new(RbacEnforcer::new());

    // ── Repositories ─────────────────────────────────────────────
    let user_repo = Arc::new(UserRepository::new(db.pool().clone()));
    let expense_repo = Arc::new(ExpenseRepository::new(db.pool().clone()));
    let audit_repo = Arc::new(AuditLogRepository::new(db.pool().clone()));
    let analytics_repo = Arc::new(AnalyticsRepository::new(db.pool().clone()));

    // ── Services ─────────────────────────────────────────────────
    let audit_service = Arc::new(AuditService::new(
        Arc::clone(&audit_repo),
        Arc::clone(&rbac_enforcer),
    ));
    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&user_repo),
        Arc::clone(&password_hasher),
        Arc::clone(&jwt_encoder),
        Arc::clone(&audit_service),
    ));
    let expense_service = Arc::new(ExpenseService::new(
        Arc::clone(&expense_repo),
        Arc::clone(&rbac_enforcer),
        Arc::clone(&audit_service),
    ));
    let user_service = Arc::new(AdminUserService::new(
        Arc::clone(&user_repo),
        Arc::clone(&password_hasher),
        Arc::clone(&rbac_enforcer),
        Arc::clone(&audit_service),
        config.auth.password_min_length,
    ));
    let analytics_service = Arc::new(AnalyticsService::new(
        Arc::clone(&analytics_repo),
        Arc::clone(&rbac_enforcer),
    ));

    AppState {
        config: Arc::new(config),
        db,
        receipt_store,
        jwt_encoder,
        jwt_decoder,
        password_hasher,
        rbac_enforcer,
        user_repo,
        expense_repo,
        audit_repo,
        analytics_repo,
        auth_service,
        expense_service,
        user_service,
        analytics_service,
        audit_service,
    }
}

/// Runs the SpendTrack server with the given configuration and database
/// pool. Blocks until a shutdown signal is received.
pub async fn run_server(config: AppConfig, db: DatabasePool) -> Result<(), AppError> {
    let state = build_state(config, db);

    // ── Receipt directory ────────────────────────────────────────
    state.receipt_store.ensure_root().await?;

    // ── Bootstrap admin ──────────────────────────────────────────
    ensure_bootstrap_admin(
        &state.user_repo,
        &state.password_hasher,
        state.config.auth.bootstrap_admin.as_ref(),
    )
    .await?;

    // ── HTTP server ──────────────────────────────────────────────
    let addr = format!("{}:{}", state.config.server.host, state.config.server.port);
    let db = state.db.clone();
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("SpendTrack server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    db.close().await;
    tracing::info!("SpendTrack server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
