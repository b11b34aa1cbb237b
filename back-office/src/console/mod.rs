//! Console front end
//!
//! `cli` declares the subcommands, `commands` runs them against the
//! repositories, `messages` turns errors into operator-facing text.

pub mod cli;
pub mod commands;
pub mod messages;
pub mod render;

pub use cli::{Cli, Command};
pub use commands::execute;
pub use messages::user_message;
