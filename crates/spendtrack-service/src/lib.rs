//! # spendtrack-service
//!
//! Business logic service layer for SpendTrack. Each service orchestrates
//! repositories and authentication to implement application-level use
//! cases.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references.

pub mod analytics;
pub mod audit;
pub mod auth;
pub mod context;
pub mod csv;
pub mod expense;
pub mod user;

pub use analytics::AnalyticsService;
pub use audit::AuditService;
pub use auth::AuthService;
pub use context::RequestContext;
pub use expense::ExpenseService;
pub use user::AdminUserService;
