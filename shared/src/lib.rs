//! Shared types for the Fantastic Restaurant back office
//!
//! Entity models, validation rules and the error code system used by the
//! data-access layer and the console front end.

pub mod error;
pub mod models;
pub mod util;
pub mod validation;

// Re-exports
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use serde::{Deserialize, Serialize};
pub use validation::ValidationError;
