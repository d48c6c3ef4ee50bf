//! Configuration schema for venv-doctor.
//!
//! Maps to the optional `venv-doctor.yml` file. Every field has a default
//! tuned for a Raspberry Pi with OpenCV installed from the system package
//! manager, so an empty file (or no file) is a valid configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for venv-doctor.yml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DoctorConfig {
    /// Interpreter used for version queries and import tests
    pub python: String,

    /// Package manager used to list and install packages
    pub pip: String,

    /// Directory tree searched for the system native library
    pub search_root: PathBuf,

    /// File name prefix of the native library to link
    pub library_prefix: String,

    /// Name of the symlink created in the package directory
    pub link_name: String,

    /// Directory name prefix whose absence triggers a reinstall
    pub module_dir_prefix: String,

    /// Distribution installed when the module directory is missing
    pub reinstall_package: String,

    /// Substrings selecting lines of the package listing
    pub package_filters: Vec<String>,

    /// Modules imported by the smoke test
    pub smoke_modules: Vec<String>,

    /// Shared libraries looked up in the linker cache by `diagnose`
    pub system_libraries: Vec<String>,
}

impl Default for DoctorConfig {
    fn default() -> Self {
        Self {
            python: "python3".to_string(),
            pip: "pip".to_string(),
            search_root: PathBuf::from("/usr/lib"),
            library_prefix: "cv2".to_string(),
            link_name: "cv2.so".to_string(),
            module_dir_prefix: "mediapipe".to_string(),
            reinstall_package: "mediapipe-rpi3".to_string(),
            package_filters: strings(&["opencv", "mediapipe", "numpy"]),
            smoke_modules: strings(&["cv2", "mediapipe", "numpy"]),
            system_libraries: strings(&[
                "libopenblas.so",
                "libatlas.so",
                "libgfortran.so",
                "libquadmath.so",
            ]),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Values given on the command line, taking precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub python: Option<String>,
    pub pip: Option<String>,
    pub search_root: Option<PathBuf>,
}

impl DoctorConfig {
    /// Apply command-line overrides.
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(python) = &overrides.python {
            self.python = python.clone();
        }
        if let Some(pip) = &overrides.pip {
            self.pip = pip.clone();
        }
        if let Some(root) = &overrides.search_root {
            self.search_root = root.clone();
        }
        self
    }
}
