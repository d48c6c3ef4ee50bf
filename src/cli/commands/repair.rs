//! Repair command implementation.
//!
//! The `venv-doctor repair` command (also the default) links the system
//! OpenCV module into the active environment, reinstalls MediaPipe when its
//! package directory is missing, and runs the import smoke test.

use std::ffi::OsString;

use crate::cli::args::RepairArgs;
use crate::config::DoctorConfig;
use crate::environment::ActiveEnvironment;
use crate::error::Result;
use crate::repair::{run_repair, RepairOptions};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The repair command implementation.
pub struct RepairCommand {
    venv: Option<OsString>,
    config: DoctorConfig,
    args: RepairArgs,
}

impl RepairCommand {
    /// Create a new repair command.
    pub fn new(venv: Option<OsString>, config: DoctorConfig, args: RepairArgs) -> Self {
        Self { venv, config, args }
    }
}

impl Command for RepairCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        ui.show_header("Virtual environment repair");

        let env = match ActiveEnvironment::from_marker(self.venv.as_deref()) {
            Ok(env) => env,
            Err(e) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(1));
            }
        };

        let options = RepairOptions {
            skip_reinstall: self.args.skip_reinstall,
        };
        let report = run_repair(&env, &self.config, &options, ui)?;
        tracing::debug!(
            "Repair finished: linked={}, imports ok={}",
            report.link.is_linked(),
            report.all_imported()
        );

        Ok(CommandResult::success())
    }
}
