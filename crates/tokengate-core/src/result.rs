//! Convenience result type alias for Tokengate.

use crate::error::AppError;

/// A specialized `Result` type for Tokengate operations.
pub type AppResult<T> = Result<T, AppError>;
