//! Expense submission, review workflow, and export.

pub mod export;
pub mod service;

pub use service::{ExpenseDecision, ExpenseService};
