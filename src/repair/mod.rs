//! The repair procedure.
//!
//! Stages run once each, in order:
//!
//! 1. Guard: the caller supplies an [`ActiveEnvironment`], so a missing
//!    marker never reaches this module
//! 2. Path resolution: [`query_version`] and [`ActiveEnvironment::site_packages`]
//! 3. Package listing: [`packages`]
//! 4. Native library linking: [`linker`]
//! 5. Dependency check, reinstall and import test: [`verifier`], [`smoke`]
//!
//! Only path resolution can fail the run. Everything after it is reported
//! and the procedure continues.

pub mod linker;
pub mod packages;
pub mod smoke;
pub mod verifier;

use std::path::PathBuf;

use crate::config::DoctorConfig;
use crate::environment::{query_version, ActiveEnvironment, PythonVersion};
use crate::error::Result;
use crate::ui::UserInterface;

pub use linker::{find_native_library, link_native_library, replace_symlink, LinkOutcome};
pub use packages::{filter_package_lines, list_packages};
pub use smoke::{check_import, run_import_checks, ImportCheck, ImportOutcome};
pub use verifier::{find_module_dir, reinstall, ReinstallOutcome};

/// Per-run switches that are not part of the configuration file.
#[derive(Debug, Clone, Default)]
pub struct RepairOptions {
    /// Report a missing module directory without reinstalling.
    pub skip_reinstall: bool,
}

/// Everything a repair run found and did.
#[derive(Debug, Clone)]
pub struct RepairReport {
    pub version: PythonVersion,
    pub site_packages: PathBuf,
    pub packages: Vec<String>,
    pub link: LinkOutcome,
    pub reinstall: ReinstallOutcome,
    pub imports: Vec<ImportCheck>,
}

impl RepairReport {
    /// Whether every smoke-test module imported.
    pub fn all_imported(&self) -> bool {
        self.imports.iter().all(ImportCheck::is_imported)
    }

    /// Names of modules that failed to import.
    pub fn failed_imports(&self) -> Vec<&str> {
        self.imports
            .iter()
            .filter(|c| !c.is_imported())
            .map(|c| c.module.as_str())
            .collect()
    }
}

/// Run every stage against `env` and report progress through `ui`.
///
/// # Errors
///
/// Returns [`crate::DoctorError::VersionQuery`] when the interpreter
/// version cannot be determined, since no package directory can be derived
/// without it. Later stages never return errors.
pub fn run_repair(
    env: &ActiveEnvironment,
    config: &DoctorConfig,
    options: &RepairOptions,
    ui: &mut dyn UserInterface,
) -> Result<RepairReport> {
    ui.success(&format!("Virtual environment: {}", env.root().display()));

    ui.show_section("🐍 Interpreter");
    let version = query_version(&config.python)?;
    let site_packages = env.site_packages(&version);
    ui.message(&format!("   Python {} ({})", version, config.python));
    ui.message(&format!("   Package directory: {}", site_packages.display()));

    ui.show_section("📦 Installed packages");
    let packages = list_packages(&config.pip, &config.package_filters);
    if packages.is_empty() {
        ui.message(&format!(
            "   No packages matching {} listed by {}",
            config.package_filters.join(", "),
            config.pip
        ));
    }
    for line in &packages {
        ui.message(&format!("   {}", line));
    }

    ui.show_section("🔗 Native library");
    let link = link_native_library(
        &site_packages,
        &config.search_root,
        &config.library_prefix,
        &config.link_name,
    );
    show_link_outcome(ui, &link, &config.library_prefix);

    ui.show_section("🧩 Dependencies");
    let reinstall = verify_dependency(&site_packages, config, options, ui);

    ui.show_section("🧪 Import test");
    let imports = run_import_checks(&config.python, &config.smoke_modules);
    show_import_checks(ui, &imports);

    let report = RepairReport {
        version,
        site_packages,
        packages,
        link,
        reinstall,
        imports,
    };

    let failed = report.failed_imports();
    if failed.is_empty() {
        ui.success(&format!("All {} modules imported", report.imports.len()));
    } else {
        ui.warning(&format!(
            "{} of {} modules failed to import: {}",
            failed.len(),
            report.imports.len(),
            failed.join(", ")
        ));
    }

    Ok(report)
}

fn show_link_outcome(ui: &mut dyn UserInterface, outcome: &LinkOutcome, prefix: &str) {
    match outcome {
        LinkOutcome::Linked { source, link } => {
            ui.success(&format!("Linked {} -> {}", link.display(), source.display()));
        }
        LinkOutcome::LibraryNotFound { search_root } => {
            ui.warning(&format!(
                "{}* not found under {}",
                prefix,
                search_root.display()
            ));
        }
        LinkOutcome::PackageDirUnavailable { dir, reason } => {
            ui.warning(&format!("Could not create {}: {}", dir.display(), reason));
        }
        LinkOutcome::Failed {
            source,
            link,
            reason,
        } => {
            ui.warning(&format!(
                "Could not link {} -> {}: {}",
                link.display(),
                source.display(),
                reason
            ));
        }
    }
}

fn verify_dependency(
    site_packages: &std::path::Path,
    config: &DoctorConfig,
    options: &RepairOptions,
    ui: &mut dyn UserInterface,
) -> ReinstallOutcome {
    if let Some(dir) = find_module_dir(site_packages, &config.module_dir_prefix) {
        ui.success(&format!(
            "{} found at {}",
            config.module_dir_prefix,
            dir.display()
        ));
        return ReinstallOutcome::AlreadyPresent { dir };
    }

    ui.warning(&format!(
        "{} missing from {}",
        config.module_dir_prefix,
        site_packages.display()
    ));

    if options.skip_reinstall {
        let mut spinner = ui.start_spinner(&format!("Reinstall {}", config.reinstall_package));
        spinner.finish_skipped(&format!(
            "Skipped reinstall of {} (--skip-reinstall)",
            config.reinstall_package
        ));
        return ReinstallOutcome::Skipped;
    }

    let mut spinner = ui.start_spinner(&format!("Installing {}...", config.reinstall_package));
    let (outcome, result) = reinstall(&config.pip, &config.reinstall_package);

    match &outcome {
        ReinstallOutcome::Installed { .. } => {
            spinner.finish_success(&format!("Installed {}", config.reinstall_package));
        }
        ReinstallOutcome::InstallFailed {
            command,
            code,
            detail,
        } => {
            let detail = detail.as_deref().unwrap_or("no output");
            spinner.finish_error(&format!(
                "'{}' exited with {:?}: {}",
                command, code, detail
            ));
        }
        ReinstallOutcome::LaunchFailed { command } => {
            spinner.finish_error(&format!("Could not run '{}'", command));
        }
        ReinstallOutcome::AlreadyPresent { .. } | ReinstallOutcome::Skipped => {}
    }
    drop(spinner);

    if ui.output_mode().shows_command_output() {
        if let Some(result) = result {
            for line in result.stdout.lines().chain(result.stderr.lines()) {
                ui.message(&format!("   {}", line));
            }
        }
    }

    outcome
}

fn show_import_checks(ui: &mut dyn UserInterface, checks: &[ImportCheck]) {
    for check in checks {
        if check.is_imported() {
            ui.success(&check.describe());
        } else {
            ui.error(&check.describe());
        }
    }
}
