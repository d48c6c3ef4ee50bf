//! Dependency presence check and reinstall.

use std::fs;
use std::path::{Path, PathBuf};

use crate::shell::{display_command, execute_quiet, CommandResult};

/// Result of the dependency check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReinstallOutcome {
    /// A matching directory was already present; nothing was installed.
    AlreadyPresent { dir: PathBuf },
    /// The check was disabled for this run.
    Skipped,
    /// The install command exited successfully.
    Installed { command: String },
    /// The install command ran and exited non-zero.
    InstallFailed {
        command: String,
        code: Option<i32>,
        detail: Option<String>,
    },
    /// The package manager could not be launched.
    LaunchFailed { command: String },
}

/// Arguments passed to the package manager for a cache-less install.
pub fn install_args(package: &str) -> [&str; 3] {
    ["install", "--no-cache-dir", package]
}

/// The first directory in `site_packages` whose name starts with `prefix`.
///
/// Entries are compared in sorted order so the reported directory is stable.
pub fn find_module_dir(site_packages: &Path, prefix: &str) -> Option<PathBuf> {
    let entries = match fs::read_dir(site_packages) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!("Cannot read {}: {}", site_packages.display(), e);
            return None;
        }
    };

    let mut dirs: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.starts_with(prefix))
        })
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();

    dirs.sort();
    dirs.into_iter().next()
}

/// Install `package` with the package manager, caching disabled.
///
/// The returned command result is kept for verbose output; the outcome is
/// never an error.
pub fn reinstall(pip: &str, package: &str) -> (ReinstallOutcome, Option<CommandResult>) {
    let args = install_args(package);
    let command = display_command(pip, &args);

    match execute_quiet(pip, &args) {
        Ok(result) if result.success => (ReinstallOutcome::Installed { command }, Some(result)),
        Ok(result) => (
            ReinstallOutcome::InstallFailed {
                command,
                code: result.exit_code,
                detail: result.last_error_line().map(str::to_string),
            },
            Some(result),
        ),
        Err(_) => (ReinstallOutcome::LaunchFailed { command }, None),
    }
}
