//! Installed package listing.
//!
//! Informational only: the listing shows which of the interesting
//! distributions the package manager believes are installed, which often
//! disagrees with what the interpreter can actually import.

use crate::shell::execute_quiet;

/// Keep listing lines that mention any of `filters` (case-insensitive).
pub fn filter_package_lines(listing: &str, filters: &[String]) -> Vec<String> {
    let needles: Vec<String> = filters.iter().map(|f| f.to_lowercase()).collect();

    listing
        .lines()
        .map(str::trim_end)
        .filter(|line| {
            let lower = line.to_lowercase();
            needles.iter().any(|n| lower.contains(n.as_str()))
        })
        .map(str::to_string)
        .collect()
}

/// Run `<pip> list` and return the lines matching `filters`.
///
/// A package manager that is missing or fails yields no lines.
pub fn list_packages(pip: &str, filters: &[String]) -> Vec<String> {
    match execute_quiet(pip, &["list"]) {
        Ok(result) if result.success => filter_package_lines(&result.stdout, filters),
        Ok(result) => {
            tracing::debug!(
                "'{} list' exited with {:?}; no packages listed",
                pip,
                result.exit_code
            );
            Vec::new()
        }
        Err(e) => {
            tracing::debug!("Package listing unavailable: {}", e);
            Vec::new()
        }
    }
}
