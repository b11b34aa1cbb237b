//! Fantastic Restaurant back office
//!
//! Data access for the restaurant's relational store plus a small console
//! front end.
//!
//! # Module layout
//!
//! ```text
//! back-office/src/
//! ├── core/      # configuration
//! ├── db/        # pool, migrations, one repository per table
//! ├── auth/      # argon2 passwords, login, admin check
//! ├── console/   # clap commands, text output, error translation
//! └── utils/     # logging
//! ```

pub mod auth;
pub mod console;
pub mod core;
pub mod db;
pub mod utils;

// Re-export public types
pub use core::Config;
pub use db::DbService;
pub use utils::{AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
