//! Route definitions for the SpendTrack HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via
//! Axum's `State` extractor.

use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Slack on top of the receipt limit for the other multipart fields.
const BODY_LIMIT_SLACK_BYTES: u64 = 64 * 1024;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let body_limit = (state.config.storage.max_receipt_size_bytes + BODY_LIMIT_SLACK_BYTES) as usize;
    let request_timeout = Duration::from_secs(state.config.server.request_timeout_seconds);

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(expense_routes())
        .merge(user_routes())
        .merge(analytics_routes())
        .merge(audit_routes())
        .merge(health_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Auth endpoints: login, logout, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
}

/// Expense CRUD, decision, export
fn expense_routes() -> Router<AppState> {
    Router::new()
        .route("/expenses", get(handlers::expense::list_expenses))
        .route("/expenses", post(handlers::expense::create_expense))
        .route("/expenses/export", get(handlers::expense::export_expenses))
        .route("/expenses/{id}", get(handlers::expense::get_expense))
        .route("/expenses/{id}", put(handlers::expense::update_expense))
        .route(
            "/expenses/{id}/receipt",
            get(handlers::expense::download_receipt),
        )
        .route(
            "/expenses/{id}/status",
            put(handlers::expense::decide_expense),
        )
}

/// Admin user management
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(handlers::user::list_users))
        .route("/users", post(handlers::user::create_user))
        .route("/users/{id}", get(handlers::user::get_user))
        .route("/users/{id}", put(handlers::user::update_user))
        .route("/users/{id}", delete(handlers::user::delete_user))
}

/// Analytics aggregations
fn analytics_routes() -> Router<AppState> {
    Router::new()
        .route("/analytics/summary", get(handlers::analytics::summary))
        .route(
            "/analytics/categories",
            get(handlers::analytics::categories),
        )
        .route("/analytics/trends", get(handlers::analytics::trends))
        .route(
            "/analytics/top-spenders",
            get(handlers::analytics::top_spenders),
        )
}

/// Audit log queries. `/logs` is a legacy alias for `/audit`.
fn audit_routes() -> Router<AppState> {
    Router::new()
        .route("/audit", get(handlers::audit::search_audit))
        .route("/audit/export", get(handlers::audit::export_audit))
        .route("/logs", get(handlers::audit::search_audit))
}

/// Health check endpoint (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}
