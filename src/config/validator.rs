//! Configuration validation rules.
//!
//! This module validates configuration for correctness:
//! - Program names and prefixes must not be empty
//! - The link name must be a plain file name
//! - The smoke test must name at least one module

use crate::config::schema::DoctorConfig;
use crate::error::{DoctorError, Result};

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Configuration key the error refers to
    pub field: String,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    fn new(rule: &str, field: &str, message: impl Into<String>) -> Self {
        Self {
            rule: rule.to_string(),
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Validate a configuration and return all errors.
///
/// This function collects all validation errors rather than stopping
/// at the first one, allowing users to fix multiple issues at once.
pub fn validate_config(config: &DoctorConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (field, value) in [
        ("python", &config.python),
        ("pip", &config.pip),
        ("library_prefix", &config.library_prefix),
        ("module_dir_prefix", &config.module_dir_prefix),
        ("reinstall_package", &config.reinstall_package),
    ] {
        if value.trim().is_empty() {
            errors.push(ValidationError::new(
                "empty-value",
                field,
                format!("'{}' must not be empty", field),
            ));
        }
    }

    errors.extend(validate_link_name(&config.link_name));

    if config.smoke_modules.is_empty() {
        errors.push(ValidationError::new(
            "no-smoke-modules",
            "smoke_modules",
            "'smoke_modules' must name at least one module",
        ));
    }

    if let Some(bad) = config
        .smoke_modules
        .iter()
        .find(|m| !is_module_name(m))
    {
        errors.push(ValidationError::new(
            "invalid-module",
            "smoke_modules",
            format!("'{}' is not an importable module name", bad),
        ));
    }

    errors
}

fn validate_link_name(name: &str) -> Option<ValidationError> {
    if name.is_empty() || name == "." || name == ".." || name.contains('/') {
        Some(ValidationError::new(
            "invalid-link-name",
            "link_name",
            format!("'link_name' must be a plain file name, got '{}'", name),
        ))
    } else {
        None
    }
}

/// Dotted identifier such as `numpy` or `mediapipe.python`.
fn is_module_name(name: &str) -> bool {
    !name.is_empty()
        && name.split('.').all(|part| {
            let mut chars = part.chars();
            matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_')
                && chars.all(|c| c.is_alphanumeric() || c == '_')
        })
}

/// Validate configuration, returning an error if invalid.
pub fn validate(config: &DoctorConfig) -> Result<()> {
    let errors = validate_config(config);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(DoctorError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}
