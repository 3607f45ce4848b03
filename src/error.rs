//! Error types for tkctl operations.
//!
//! This module defines [`TkctlError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `TkctlError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `TkctlError::Other`) for unexpected errors
//! - Check actions return `anyhow::Result` so any collaborator error can be
//!   recorded as a failed check
//! - All errors should provide actionable messages for users

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for tkctl operations.
#[derive(Debug, Error)]
pub enum TkctlError {
    /// A version string was empty or not a valid semantic version.
    #[error("Invalid version '{version}': {message}")]
    InvalidVersion { version: String, message: String },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// External command failed.
    #[error("Command failed with exit code {code:?}: {command}{}", format_stderr(.stderr))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// Request to the API server failed.
    #[error("API request to {url} failed: {message}")]
    ApiRequest { url: String, message: String },

    /// A check suite name that is not part of the catalog.
    #[error("Unknown check suite: {name}")]
    UnknownCheckSuite { name: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML (de)serialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn format_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(" ({})", trimmed)
    }
}

/// Result type alias for tkctl operations.
pub type Result<T> = std::result::Result<T, TkctlError>;
