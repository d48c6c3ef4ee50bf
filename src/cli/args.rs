//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::builder::OsStringValueParser;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::config::ConfigOverrides;
use crate::environment::MARKER_VARIABLE;

/// venv-doctor - Diagnose and repair native extension loading in a virtual environment.
#[derive(Debug, Parser)]
#[command(name = "venv-doctor")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Root of the active virtual environment
    ///
    /// Empty values are accepted here and rejected by the environment guard.
    #[arg(
        long,
        global = true,
        env = MARKER_VARIABLE,
        value_name = "PATH",
        value_parser = OsStringValueParser::new()
    )]
    pub venv: Option<OsString>,

    /// Interpreter to query and import with
    #[arg(long, global = true, value_name = "PROG")]
    pub python: Option<String>,

    /// Package manager used for listing and reinstalling
    #[arg(long, global = true, value_name = "PROG")]
    pub pip: Option<String>,

    /// Path to config file (overrides ./venv-doctor.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Interpreter and package manager overrides from global flags.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            python: self.python.clone(),
            pip: self.pip.clone(),
            search_root: None,
        }
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Link the system OpenCV module, reinstall MediaPipe if missing, and test imports (default)
    Repair(RepairArgs),

    /// Report interpreter, library and import status without changing anything
    Diagnose(DiagnoseArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `repair` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RepairArgs {
    /// Directory searched for the native library
    #[arg(long, value_name = "DIR")]
    pub search_root: Option<PathBuf>,

    /// Report a missing MediaPipe module without reinstalling it
    #[arg(long)]
    pub skip_reinstall: bool,
}

/// Arguments for the `diagnose` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct DiagnoseArgs {}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
