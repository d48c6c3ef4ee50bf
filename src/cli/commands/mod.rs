//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. This allows:
//! - Single binary with subcommands (`venv-doctor repair`, `venv-doctor diagnose`)
//! - Config loading and flag overrides in one place

pub mod completions;
pub mod diagnose;
pub mod dispatcher;
pub mod repair;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
