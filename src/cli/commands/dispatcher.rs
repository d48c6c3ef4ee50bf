//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands, RepairArgs};
use crate::config::{load_config, validate, ConfigOverrides, DoctorConfig};
use crate::error::Result;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    working_dir: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher; `working_dir` is searched for a config file.
    pub fn new(working_dir: PathBuf) -> Self {
        Self { working_dir }
    }

    /// Get the working directory.
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Load the config file and apply command-line overrides.
    pub fn resolve_config(&self, cli: &Cli, search_root: Option<PathBuf>) -> Result<DoctorConfig> {
        let overrides = ConfigOverrides {
            search_root,
            ..cli.overrides()
        };
        let config =
            load_config(cli.config.as_deref(), &self.working_dir)?.with_overrides(&overrides);
        validate(&config)?;
        Ok(config)
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it. No subcommand means `repair` with default flags.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Repair(args)) => self.repair(cli, args.clone(), ui),
            Some(Commands::Diagnose(_)) => {
                let config = self.resolve_config(cli, None)?;
                let cmd = super::diagnose::DiagnoseCommand::new(cli.venv.clone(), config);
                cmd.execute(ui)
            }
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
            None => self.repair(cli, RepairArgs::default(), ui),
        }
    }

    fn repair(
        &self,
        cli: &Cli,
        args: RepairArgs,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let config = self.resolve_config(cli, args.search_root.clone())?;
        let cmd = super::repair::RepairCommand::new(cli.venv.clone(), config, args);
        cmd.execute(ui)
    }
}
