//! Data models
//!
//! Shared between the repositories and the console front end.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (auto-increment integer primary keys).
//!
//! Role and status columns are stored as lowercase strings and decoded
//! through `TryFrom<String>`, so an unknown value in the database fails the
//! row instead of silently becoming a default.

pub mod dining_table;
pub mod inventory;
pub mod menu;
pub mod menu_item;
pub mod reservation;
pub mod staff_task;
pub mod user;

// Re-exports
pub use dining_table::*;
pub use inventory::*;
pub use menu::*;
pub use menu_item::*;
pub use reservation::*;
pub use staff_task::*;
pub use user::*;

use crate::error::ErrorCode;
use thiserror::Error;

/// A role or status value outside its domain
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {domain} '{value}'")]
pub struct ParseEnumError {
    /// Which domain was being parsed (e.g. `"role"`)
    pub domain: &'static str,
    /// The rejected input
    pub value: String,
    /// Error code reported to the user
    pub code: ErrorCode,
}

impl ParseEnumError {
    pub(crate) fn new(domain: &'static str, value: impl Into<String>, code: ErrorCode) -> Self {
        Self {
            domain,
            value: value.into(),
            code,
        }
    }
}
