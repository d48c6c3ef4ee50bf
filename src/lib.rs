//! venv-doctor - Diagnose and repair native extension loading in Python
//! virtual environments.
//!
//! On systems where OpenCV comes from the distribution's package manager
//! (typically a Raspberry Pi), a virtual environment cannot import `cv2`
//! until the system extension module is linked into its package directory.
//! venv-doctor performs that link, reinstalls MediaPipe when it is missing,
//! and reports which native modules import.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, parsing, and validation
//! - [`diagnose`] - Read-only environment report
//! - [`environment`] - Active environment marker and interpreter queries
//! - [`error`] - Error types and result aliases
//! - [`repair`] - The staged repair procedure
//! - [`shell`] - External program execution
//! - [`ui`] - Spinners and terminal output
//!
//! # Example
//!
//! ```
//! use std::ffi::OsStr;
//! use venv_doctor::environment::{ActiveEnvironment, PythonVersion};
//!
//! let env = ActiveEnvironment::from_marker(Some(OsStr::new("/opt/env"))).unwrap();
//! let site = env.site_packages(&PythonVersion::new(3, 11));
//! assert_eq!(site, std::path::Path::new("/opt/env/lib/python3.11/site-packages"));
//! ```

pub mod cli;
pub mod config;
pub mod diagnose;
pub mod environment;
pub mod error;
pub mod repair;
pub mod shell;
pub mod ui;

#[cfg(test)]
mod testing;

pub use error::{DoctorError, Result};
