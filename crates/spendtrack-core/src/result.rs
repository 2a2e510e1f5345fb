//! Convenience result type alias for SpendTrack.

use crate::error::AppError;

/// A specialized `Result` type for SpendTrack operations.
pub type AppResult<T> = Result<T, AppError>;
