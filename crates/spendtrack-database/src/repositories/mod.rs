//! Repository implementations for all SpendTrack entities.

pub mod analytics;
pub mod audit;
pub mod expense;
pub mod user;

pub use analytics::AnalyticsRepository;
pub use audit::{AuditFilter, AuditLogRepository};
pub use expense::{ExpenseFilter, ExpenseRepository};
pub use user::UserRepository;
