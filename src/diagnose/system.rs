//! Read-only checks of the host system.
//!
//! Nothing here modifies the filesystem. Each check returns plain values so
//! the report can be rendered or asserted on.

use std::path::{Path, PathBuf};

use crate::environment::PythonVersion;
use crate::shell::execute_quiet;

/// Programs tried, in order, for the shared-library cache listing.
///
/// `ldconfig` lives in `/sbin` on Debian-based systems, which is often not on
/// an unprivileged user's `PATH`.
pub const LDCONFIG_CANDIDATES: &[&str] = &["ldconfig", "/sbin/ldconfig", "/usr/sbin/ldconfig"];

/// Whether a path exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathCheck {
    pub path: PathBuf,
    pub exists: bool,
}

impl PathCheck {
    pub fn inspect(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let exists = path.exists();
        Self { path, exists }
    }
}

/// Availability of a shared library in the linker cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryCheck {
    pub name: String,
    /// `None` when the linker cache could not be listed.
    pub available: Option<bool>,
}

/// Run `ldconfig -p` and return its listing, or `None` if no candidate runs.
pub fn linker_cache_listing(candidates: &[&str]) -> Option<String> {
    for program in candidates {
        match execute_quiet(program, &["-p"]) {
            Ok(result) if result.success => return Some(result.stdout),
            Ok(result) => {
                tracing::debug!("{} -p exited with {:?}", program, result.exit_code);
            }
            Err(e) => tracing::debug!("{}", e),
        }
    }
    None
}

/// Check each library name against a linker cache listing.
///
/// A library counts as available when any line of the listing mentions it,
/// so `libatlas.so` matches `libatlas.so.3 (libc6,hard-float) => ...`.
pub fn check_libraries(listing: Option<&str>, libraries: &[String]) -> Vec<LibraryCheck> {
    libraries
        .iter()
        .map(|name| LibraryCheck {
            name: name.clone(),
            available: listing.map(|text| text.lines().any(|line| line.contains(name.as_str()))),
        })
        .collect()
}

/// Directories the dynamic loader and extension modules commonly rely on.
pub fn critical_directories(prefix: &Path) -> Vec<PathBuf> {
    vec![
        PathBuf::from("/usr/lib"),
        PathBuf::from("/usr/local/lib"),
        prefix.join("lib"),
        PathBuf::from("/lib"),
    ]
}

/// Locations where system and environment packages are installed.
pub fn package_search_paths(prefix: &Path, version: Option<&PythonVersion>) -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("/usr/lib/python3/dist-packages")];
    if let Some(version) = version {
        paths.push(PathBuf::from(format!(
            "/usr/local/lib/python{}/dist-packages",
            version
        )));
        paths.push(
            prefix
                .join("lib")
                .join(format!("python{}", version))
                .join("site-packages"),
        );
    }
    paths.push(prefix.join("lib/python3/site-packages"));
    paths
}

/// Check every path in `paths`.
pub fn check_paths(paths: Vec<PathBuf>) -> Vec<PathCheck> {
    paths.into_iter().map(PathCheck::inspect).collect()
}
