//! Core type definitions used across the SpendTrack workspace.

pub mod pagination;

pub use pagination::{PageRequest, PageResponse};
