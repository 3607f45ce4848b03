//! Configuration loading, parsing, and validation for tkctl.
//!
//! - Schema definitions in [`schema`]
//! - File discovery, loading and environment overrides in [`loader`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use tkctl::config::{load_config, validate};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let path = temp.path().join("config.yml");
//! fs::write(&path, "namespace: staging").unwrap();
//!
//! let config = load_config(Some(&path)).unwrap();
//! validate(&config).unwrap();
//! assert_eq!(config.release, "testkube");
//! ```

pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::{
    apply_env_overrides, default_config_path, load_config, load_config_file, parse_config,
    resolve_config_path, API_URI_ENV, CONFIG_ENV, LEGACY_KEYS, NAMESPACE_ENV,
};
pub use schema::{CheckSettings, Config};
pub use validator::{validate, validate_config, ValidationError};
