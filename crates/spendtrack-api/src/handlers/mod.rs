//! HTTP request handlers, organized by domain.

pub mod analytics;
pub mod audit;
pub mod auth;
pub mod expense;
pub mod health;
pub mod user;
