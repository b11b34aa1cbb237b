//! Utility module
//!
//! - [`logger`] - tracing setup and the audit/security log macros
//! - re-exports of the shared error types

pub mod logger;

pub use shared::error::{AppError, AppResult, ErrorCategory, ErrorCode};
