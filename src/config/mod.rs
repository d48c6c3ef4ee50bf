//! Configuration loading, parsing, and validation.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use venv_doctor::config::{load_config, CONFIG_FILE_NAME};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join(CONFIG_FILE_NAME), "reinstall_package: mediapipe").unwrap();
//!
//! let config = load_config(None, temp.path()).unwrap();
//! assert_eq!(config.reinstall_package, "mediapipe");
//! assert_eq!(config.library_prefix, "cv2");
//! ```

pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::{find_config, load_config, load_config_file, parse_config, CONFIG_FILE_NAME};
pub use schema::{ConfigOverrides, DoctorConfig};
pub use validator::{validate, validate_config, ValidationError};
