//! # spendtrack-api
//!
//! HTTP API layer for SpendTrack. Defines the Axum router, request
//! extractors, DTOs, and handlers, and wires the full application
//! together in [`app::run_server`].

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod receipt;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use state::AppState;
