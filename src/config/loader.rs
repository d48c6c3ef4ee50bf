//! Configuration file discovery and loading.
//!
//! An explicitly requested file must exist. Without one, `venv-doctor.yml`
//! in the working directory is used when present, otherwise defaults.

use crate::config::schema::DoctorConfig;
use crate::config::validator::validate;
use crate::error::{DoctorError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "venv-doctor.yml";

/// Find the default config file in `dir`.
pub fn find_config(dir: &Path) -> Option<PathBuf> {
    let path = dir.join(CONFIG_FILE_NAME);
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

/// Load a single config file and parse it into DoctorConfig.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<DoctorConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DoctorError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            DoctorError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into DoctorConfig.
///
/// An empty document yields the defaults.
pub fn parse_config(content: &str, source_path: &Path) -> Result<DoctorConfig> {
    if content.trim().is_empty() {
        return Ok(DoctorConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| DoctorError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Resolve and validate the configuration for a run.
///
/// # Arguments
///
/// * `explicit` - Path given with `--config`; must exist
/// * `working_dir` - Directory searched for [`CONFIG_FILE_NAME`]
pub fn load_config(explicit: Option<&Path>, working_dir: &Path) -> Result<DoctorConfig> {
    let config = match explicit {
        Some(path) => load_config_file(path)?,
        None => match find_config(working_dir) {
            Some(path) => {
                tracing::debug!("Using config file {}", path.display());
                load_config_file(&path)?
            }
            None => DoctorConfig::default(),
        },
    };

    validate(&config)?;
    Ok(config)
}
