//! Native library discovery and linking.
//!
//! System packages install OpenCV's extension module outside the virtual
//! environment (for example under `/usr/lib/python3/dist-packages`). A
//! symlink with a fixed name inside the environment's package directory
//! makes it importable there.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Result of the linking stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    /// The link now points at `source`.
    Linked { source: PathBuf, link: PathBuf },
    /// No file under the search root matched the prefix.
    LibraryNotFound { search_root: PathBuf },
    /// The package directory could not be created.
    PackageDirUnavailable { dir: PathBuf, reason: String },
    /// The library was found but the link could not be created.
    Failed {
        source: PathBuf,
        link: PathBuf,
        reason: String,
    },
}

impl LinkOutcome {
    /// Whether the link exists after the stage.
    pub fn is_linked(&self) -> bool {
        matches!(self, Self::Linked { .. })
    }
}

/// Whether `path` is a regular file or a symlink that resolves to one.
fn is_file_like(entry: &walkdir::DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_file()
        || (file_type.is_symlink()
            && fs::metadata(entry.path())
                .map(|m| m.is_file())
                .unwrap_or(false))
}

/// All files under `root` whose name starts with `prefix`, sorted by path.
///
/// Directory symlinks are not followed and unreadable directories are
/// skipped.
pub fn find_candidates(root: &Path, prefix: &str) -> Vec<PathBuf> {
    let mut matches: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.starts_with(prefix))
        })
        .filter(is_file_like)
        .map(walkdir::DirEntry::into_path)
        .collect();

    matches.sort();
    matches
}

/// The first file under `root` whose name starts with `prefix`.
///
/// "First" is lexicographic by full path, so the result does not depend on
/// directory iteration order. `existing_link` is never returned: a search
/// root above the environment would otherwise find the link left by a
/// previous run and point it at itself.
pub fn find_native_library(
    root: &Path,
    prefix: &str,
    existing_link: Option<&Path>,
) -> Option<PathBuf> {
    let mut candidates = find_candidates(root, prefix);
    if let Some(link) = existing_link {
        candidates.retain(|candidate| {
            let own = is_own_link(candidate, link);
            if own {
                tracing::debug!("Skipping existing link {}", candidate.display());
            }
            !own
        });
    }
    if candidates.len() > 1 {
        tracing::debug!(
            "{} candidates for '{}' under {}; using {}",
            candidates.len(),
            prefix,
            root.display(),
            candidates[0].display()
        );
    }
    candidates.into_iter().next()
}

/// Whether `candidate` is the link this stage manages.
///
/// Parents are compared after canonicalization since the search root and
/// the package directory may be spelled differently.
fn is_own_link(candidate: &Path, link: &Path) -> bool {
    if candidate == link {
        return true;
    }
    if candidate.file_name() != link.file_name() {
        return false;
    }
    match (candidate.parent(), link.parent()) {
        (Some(a), Some(b)) => match (fs::canonicalize(a), fs::canonicalize(b)) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        },
        _ => false,
    }
}

/// Create or replace the symlink `dir/link_name` pointing at `source`.
///
/// An existing file or symlink at the link path is replaced. An existing
/// directory is left alone and reported as an error.
pub fn replace_symlink(source: &Path, dir: &Path, link_name: &str) -> io::Result<PathBuf> {
    let link = dir.join(link_name);

    match fs::symlink_metadata(&link) {
        Ok(meta) if meta.is_dir() => {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} is a directory", link.display()),
            ));
        }
        Ok(_) => fs::remove_file(&link)?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }

    create_symlink(source, &link)?;
    Ok(link)
}

#[cfg(unix)]
fn create_symlink(source: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(source, link)
}

#[cfg(not(unix))]
fn create_symlink(_source: &Path, _link: &Path) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "symlinks are only supported on Unix",
    ))
}

/// Ensure `site_packages` exists, then link the first matching library into it.
///
/// Every failure is reported through the outcome; nothing here aborts a run.
pub fn link_native_library(
    site_packages: &Path,
    search_root: &Path,
    prefix: &str,
    link_name: &str,
) -> LinkOutcome {
    if let Err(e) = fs::create_dir_all(site_packages) {
        tracing::warn!("Could not create {}: {}", site_packages.display(), e);
        return LinkOutcome::PackageDirUnavailable {
            dir: site_packages.to_path_buf(),
            reason: e.to_string(),
        };
    }

    let link = site_packages.join(link_name);
    let Some(source) = find_native_library(search_root, prefix, Some(&link)) else {
        return LinkOutcome::LibraryNotFound {
            search_root: search_root.to_path_buf(),
        };
    };

    match replace_symlink(&source, site_packages, link_name) {
        Ok(link) => {
            tracing::debug!("Linked {} -> {}", link.display(), source.display());
            LinkOutcome::Linked { source, link }
        }
        Err(e) => {
            tracing::warn!(
                "Could not link {} into {}: {}",
                source.display(),
                site_packages.display(),
                e
            );
            LinkOutcome::Failed {
                link,
                source,
                reason: e.to_string(),
            }
        }
    }
}
