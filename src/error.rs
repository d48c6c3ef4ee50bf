//! Error types for venv-doctor operations.
//!
//! This module defines [`DoctorError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `DoctorError` for fatal conditions that stop a command
//! - Soft failures (missing library, failed import) are values, not errors;
//!   see [`crate::repair`]
//! - Use `anyhow::Error` (via `DoctorError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for venv-doctor operations.
#[derive(Debug, Error)]
pub enum DoctorError {
    /// The active-environment marker is unset or empty.
    #[error("No active virtual environment (set {variable} or pass --venv)")]
    NoActiveEnvironment { variable: String },

    /// Configuration file not found at an explicitly requested location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// The interpreter could not report a `major.minor` version.
    #[error("Could not determine version of '{interpreter}': {message}")]
    VersionQuery {
        interpreter: String,
        message: String,
    },

    /// A program could not be launched.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for venv-doctor operations.
pub type Result<T> = std::result::Result<T, DoctorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_active_environment_names_variable() {
        let err = DoctorError::NoActiveEnvironment {
            variable: "VIRTUAL_ENV".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("VIRTUAL_ENV"));
        assert!(msg.contains("--venv"));
    }

    #[test]
    fn config_not_found_displays_path() {
        let err = DoctorError::ConfigNotFound {
            path: PathBuf::from("/foo/venv-doctor.yml"),
        };
        assert!(err.to_string().contains("/foo/venv-doctor.yml"));
    }

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = DoctorError::ConfigParseError {
            path: PathBuf::from("/config.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/config.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn version_query_displays_interpreter_and_message() {
        let err = DoctorError::VersionQuery {
            interpreter: "python3".into(),
            message: "unexpected output 'abc'".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("python3"));
        assert!(msg.contains("unexpected output"));
    }

    #[test]
    fn command_failed_displays_command_and_code() {
        let err = DoctorError::CommandFailed {
            command: "pip list".into(),
            code: Some(2),
        };
        let msg = err.to_string();
        assert!(msg.contains("pip list"));
        assert!(msg.contains("2"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: DoctorError = io_err.into();
        assert!(matches!(err, DoctorError::Io(_)));
    }
}
