//! Import smoke test.
//!
//! Each module is imported in its own interpreter process, so a crash or
//! import error in one module cannot hide the result of the next.

use crate::shell::execute_quiet;

/// Outcome of importing one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    Imported,
    Failed { reason: String },
}

/// Result of importing one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportCheck {
    pub module: String,
    pub outcome: ImportOutcome,
}

impl ImportCheck {
    pub fn is_imported(&self) -> bool {
        self.outcome == ImportOutcome::Imported
    }

    /// One-line description, e.g. `cv2 imported` or `cv2 import failed: ...`.
    pub fn describe(&self) -> String {
        match &self.outcome {
            ImportOutcome::Imported => format!("{} imported", self.module),
            ImportOutcome::Failed { reason } => {
                format!("{} import failed: {}", self.module, reason)
            }
        }
    }
}

/// Import `module` with the interpreter.
pub fn check_import(python: &str, module: &str) -> ImportCheck {
    let script = format!("import {}", module);
    let outcome = match execute_quiet(python, &["-c", script.as_str()]) {
        Ok(result) if result.success => ImportOutcome::Imported,
        Ok(result) => ImportOutcome::Failed {
            reason: result
                .last_error_line()
                .map(str::to_string)
                .unwrap_or_else(|| format!("interpreter exited with {:?}", result.exit_code)),
        },
        Err(_) => ImportOutcome::Failed {
            reason: format!("could not launch '{}'", python),
        },
    };

    ImportCheck {
        module: module.to_string(),
        outcome,
    }
}

/// Import every module in order, independently.
pub fn run_import_checks(python: &str, modules: &[String]) -> Vec<ImportCheck> {
    modules
        .iter()
        .map(|module| check_import(python, module))
        .collect()
}
