//! Diagnose command implementation.
//!
//! The `venv-doctor diagnose` command reports without changing anything.

use std::ffi::OsString;

use crate::config::DoctorConfig;
use crate::diagnose::{run_diagnose, DiagnoseOptions};
use crate::environment::ActiveEnvironment;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The diagnose command implementation.
pub struct DiagnoseCommand {
    venv: Option<OsString>,
    config: DoctorConfig,
}

impl DiagnoseCommand {
    /// Create a new diagnose command.
    pub fn new(venv: Option<OsString>, config: DoctorConfig) -> Self {
        Self { venv, config }
    }
}

impl Command for DiagnoseCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        ui.show_header("Environment diagnostic");

        let env = ActiveEnvironment::from_marker(self.venv.as_deref()).ok();
        let report = run_diagnose(env.as_ref(), &self.config, &DiagnoseOptions::default(), ui)?;
        tracing::debug!("Diagnose found {} problem(s)", report.problem_count());

        Ok(CommandResult::success())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::testing::fake_program;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    #[test]
    fn runs_without_marker() {
        let temp = TempDir::new().unwrap();
        let python = fake_program(
            temp.path(),
            "python",
            r#"case "$2" in *sys.executable*) printf '/usr/bin/python3\n3.11.2\n/usr\n/usr\n' ;; *) exit 0 ;; esac"#,
        );
        let config = DoctorConfig {
            python: python.to_string_lossy().into_owned(),
            ..Default::default()
        };
        let mut ui = MockUI::new();

        let result = DiagnoseCommand::new(None, config).execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_warning("Not running inside a virtual environment"));
        assert!(ui.has_success("numpy imported"));
    }

    #[test]
    fn unusable_interpreter_propagates() {
        let config = DoctorConfig {
            python: "venv-doctor-no-such-python".into(),
            ..Default::default()
        };
        let mut ui = MockUI::new();

        assert!(DiagnoseCommand::new(None, config).execute(&mut ui).is_err());
    }
}
