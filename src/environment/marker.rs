//! Active virtual environment marker.
//!
//! The marker is the root directory of the active virtual environment,
//! normally exported as `VIRTUAL_ENV` by the environment's `activate`
//! script. Every repair stage derives its paths from it, so an unset or
//! empty marker stops the run before anything touches the filesystem.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::error::{DoctorError, Result};

use super::interpreter::PythonVersion;

/// Environment variable set by virtualenv/venv activation scripts.
pub const MARKER_VARIABLE: &str = "VIRTUAL_ENV";

/// The root of an active virtual environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveEnvironment {
    root: PathBuf,
}

impl ActiveEnvironment {
    /// Build from an explicit marker value.
    ///
    /// # Errors
    ///
    /// Returns [`DoctorError::NoActiveEnvironment`] when the value is
    /// missing or empty.
    ///
    /// # Example
    ///
    /// ```
    /// use std::ffi::OsStr;
    /// use venv_doctor::environment::ActiveEnvironment;
    ///
    /// let env = ActiveEnvironment::from_marker(Some(OsStr::new("/opt/env"))).unwrap();
    /// assert_eq!(env.root(), std::path::Path::new("/opt/env"));
    ///
    /// assert!(ActiveEnvironment::from_marker(Some(OsStr::new(""))).is_err());
    /// assert!(ActiveEnvironment::from_marker(None).is_err());
    /// ```
    pub fn from_marker(value: Option<&OsStr>) -> Result<Self> {
        match value {
            Some(v) if !v.is_empty() => Ok(Self {
                root: PathBuf::from(v),
            }),
            _ => Err(DoctorError::NoActiveEnvironment {
                variable: MARKER_VARIABLE.to_string(),
            }),
        }
    }

    /// Read the marker from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(|key: &str| std::env::var(key))
    }

    /// Read the marker with a custom env var lookup.
    ///
    /// This allows testing without modifying actual environment variables.
    pub fn from_env_with<F>(env_fn: F) -> Result<Self>
    where
        F: Fn(&str) -> std::result::Result<String, std::env::VarError>,
    {
        let value = env_fn(MARKER_VARIABLE).ok();
        Self::from_marker(value.as_deref().map(OsStr::new))
    }

    /// Root directory of the environment.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The package directory for a given interpreter version:
    /// `<root>/lib/python<major>.<minor>/site-packages`.
    pub fn site_packages(&self, version: &PythonVersion) -> PathBuf {
        self.root
            .join("lib")
            .join(format!("python{}", version))
            .join("site-packages")
    }
}
