//! Configuration validation rules.

use crate::config::schema::Config;
use crate::error::{Result, TkctlError};

/// Validation error with context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Offending field
    pub field: String,
    /// Human-readable error message
    pub message: String,
}

/// Validate a configuration and return all errors.
pub fn validate_config(config: &Config) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.namespace.trim().is_empty() {
        errors.push(ValidationError {
            field: "namespace".to_string(),
            message: "namespace must not be empty".to_string(),
        });
    }

    if !(config.api_uri.starts_with("http://") || config.api_uri.starts_with("https://")) {
        errors.push(ValidationError {
            field: "api_uri".to_string(),
            message: format!(
                "api_uri '{}' must start with http:// or https://",
                config.api_uri
            ),
        });
    }

    if config.timeout_secs == 0 {
        errors.push(ValidationError {
            field: "timeout_secs".to_string(),
            message: "timeout_secs must be greater than zero".to_string(),
        });
    }

    errors
}

/// Validate a configuration, joining every problem into one error.
pub fn validate(config: &Config) -> Result<()> {
    let errors = validate_config(config);
    if errors.is_empty() {
        return Ok(());
    }

    let message = errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ");
    Err(TkctlError::ConfigValidationError { message })
}
