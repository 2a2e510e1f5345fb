//! Audit trail recording and querying.

pub mod service;

pub use service::AuditService;
