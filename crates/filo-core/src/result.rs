//! Convenience result type alias for Filo.

use crate::error::AppError;

/// A specialized `Result` type for Filo operations.
pub type AppResult<T> = Result<T, AppError>;
