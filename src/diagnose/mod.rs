//! Read-only environment diagnostics.
//!
//! Reports what the interpreter says about itself, the version of its own
//! package manager, its module search path, shared libraries in the linker cache, well-known directories and
//! the import smoke test. Unlike [`crate::repair`], no marker is required
//! and nothing is created or changed.

pub mod system;

use crate::config::DoctorConfig;
use crate::environment::{query_sys_path, ActiveEnvironment, InterpreterInfo};
use crate::error::Result;
use crate::repair::{run_import_checks, ImportCheck};
use crate::shell::execute_quiet;
use crate::ui::UserInterface;

pub use system::{
    check_libraries, check_paths, critical_directories, linker_cache_listing,
    package_search_paths, LibraryCheck, PathCheck, LDCONFIG_CANDIDATES,
};

/// Per-run switches for [`run_diagnose`].
#[derive(Debug, Clone)]
pub struct DiagnoseOptions {
    /// Programs tried for `-p`, first success wins.
    pub ldconfig: Vec<String>,
}

impl Default for DiagnoseOptions {
    fn default() -> Self {
        Self {
            ldconfig: LDCONFIG_CANDIDATES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Everything a diagnose run observed.
#[derive(Debug, Clone)]
pub struct DiagnoseReport {
    pub interpreter: InterpreterInfo,
    pub pip_version: Option<String>,
    /// `None` when the interpreter could not list its search path.
    pub sys_path: Option<Vec<String>>,
    pub libraries: Vec<LibraryCheck>,
    pub directories: Vec<PathCheck>,
    pub search_paths: Vec<PathCheck>,
    pub imports: Vec<ImportCheck>,
}

impl DiagnoseReport {
    /// Number of checks that did not pass.
    pub fn problem_count(&self) -> usize {
        let libraries = self
            .libraries
            .iter()
            .filter(|l| l.available != Some(true))
            .count();
        let directories = self.directories.iter().filter(|d| !d.exists).count();
        let imports = self.imports.iter().filter(|i| !i.is_imported()).count();
        libraries + directories + imports + usize::from(self.pip_version.is_none())
    }
}

/// First line of `<python> -m pip --version`, if it runs.
///
/// Asking the interpreter for its own pip avoids reporting a `pip` on
/// `PATH` that belongs to a different installation.
pub fn pip_version(python: &str) -> Option<String> {
    let result = execute_quiet(python, &["-m", "pip", "--version"]).ok()?;
    if !result.success {
        tracing::debug!("{} -m pip --version exited with {:?}", python, result.exit_code);
        return None;
    }
    result
        .stdout
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map(str::to_string)
}

/// Run every read-only check and report through `ui`.
///
/// # Errors
///
/// Returns [`crate::DoctorError::VersionQuery`] if the interpreter cannot
/// describe itself.
pub fn run_diagnose(
    env: Option<&ActiveEnvironment>,
    config: &DoctorConfig,
    options: &DiagnoseOptions,
    ui: &mut dyn UserInterface,
) -> Result<DiagnoseReport> {
    match env {
        Some(env) => ui.success(&format!("Virtual environment: {}", env.root().display())),
        None => ui.warning("No virtual environment marker set"),
    }

    ui.show_section("🐍 Interpreter");
    let interpreter = InterpreterInfo::query(&config.python)?;
    ui.message(&format!("   Executable: {}", interpreter.executable.display()));
    ui.message(&format!("   Version: {}", interpreter.version));
    ui.message(&format!("   Prefix: {}", interpreter.prefix.display()));
    ui.message(&format!("   Base prefix: {}", interpreter.base_prefix.display()));
    if interpreter.in_virtualenv() {
        ui.success("Running inside a virtual environment");
    } else {
        ui.warning("Not running inside a virtual environment");
    }

    ui.show_section("📦 Package manager");
    let pip_version = pip_version(&config.python);
    match &pip_version {
        Some(version) => ui.success(version),
        None => ui.error(&format!("{} -m pip --version failed", config.python)),
    }

    ui.show_section("📚 Module search path");
    let sys_path = query_sys_path(&config.python);
    match &sys_path {
        Some(entries) => {
            for entry in entries {
                let shown = if entry.is_empty() {
                    "(current directory)"
                } else {
                    entry.as_str()
                };
                ui.message(&format!("   {}", shown));
            }
        }
        None => ui.warning("Could not read sys.path from the interpreter"),
    }

    ui.show_section("🔧 System libraries");
    let candidates: Vec<&str> = options.ldconfig.iter().map(String::as_str).collect();
    let listing = linker_cache_listing(&candidates);
    if listing.is_none() {
        ui.warning("ldconfig could not be run; library availability unknown");
    }
    let libraries = check_libraries(listing.as_deref(), &config.system_libraries);
    for library in &libraries {
        match library.available {
            Some(true) => ui.success(&format!("{}: available", library.name)),
            Some(false) => ui.error(&format!("{}: missing", library.name)),
            None => ui.warning(&format!("{}: unknown", library.name)),
        }
    }

    ui.show_section("📁 Critical directories");
    let directories = check_paths(critical_directories(&interpreter.prefix));
    show_path_checks(ui, &directories, true);

    ui.show_section("🔎 Package search paths");
    let version = interpreter.short_version();
    let search_paths = check_paths(package_search_paths(&interpreter.prefix, version.as_ref()));
    show_path_checks(ui, &search_paths, false);

    ui.show_section("🧪 Import test");
    let imports = run_import_checks(&config.python, &config.smoke_modules);
    for check in &imports {
        if check.is_imported() {
            ui.success(&check.describe());
        } else {
            ui.error(&check.describe());
        }
    }

    let report = DiagnoseReport {
        interpreter,
        pip_version,
        sys_path,
        libraries,
        directories,
        search_paths,
        imports,
    };

    match report.problem_count() {
        0 => ui.success("Diagnostic complete, no problems found"),
        n => ui.warning(&format!("Diagnostic complete, {} problem(s) found", n)),
    }

    Ok(report)
}

/// Missing critical directories are errors; missing search paths are
/// informational since most systems only have some of them.
fn show_path_checks(ui: &mut dyn UserInterface, checks: &[PathCheck], required: bool) {
    for check in checks {
        let path = check.path.display();
        if check.exists {
            ui.success(&format!("{}: exists", path));
        } else if required {
            ui.error(&format!("{}: missing", path));
        } else {
            ui.message(&format!("   {}: missing", path));
        }
    }
}
