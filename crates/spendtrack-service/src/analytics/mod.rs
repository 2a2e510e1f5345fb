//! Analytics aggregations.

pub mod service;

pub use service::AnalyticsService;
