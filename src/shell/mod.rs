//! External program execution and platform detection.

pub mod command;
pub mod platform;

pub use command::{display_command, execute_quiet, CommandResult};
pub use platform::{is_ci, is_ci_with};
