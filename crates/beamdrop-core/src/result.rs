//! Application result alias.

use crate::error::AppError;

/// Result type used throughout the Beamdrop crates.
pub type AppResult<T> = Result<T, AppError>;
