//! Configuration file discovery and loading.
//!
//! Resolution order for the config file (first match wins):
//! 1. Explicit `--config` flag
//! 2. `TKCTL_CONFIG` environment variable
//! 3. `~/.tkctl/config.yml`
//!
//! Values then layer as: defaults, file, `TKCTL_*` environment variables,
//! and finally command-line flags (applied by the caller).

use crate::config::schema::Config;
use crate::error::{Result, TkctlError};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR_NAME: &str = ".tkctl";
const CONFIG_FILE_NAME: &str = "config.yml";

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "TKCTL_CONFIG";
/// Environment variable overriding `namespace`.
pub const NAMESPACE_ENV: &str = "TKCTL_NAMESPACE";
/// Environment variable overriding `api_uri`.
pub const API_URI_ENV: &str = "TKCTL_API_URI";

/// Keys written by older clients, paired with their current name.
///
/// They are read as a fallback until `tkctl migrate` rewrites the file.
pub const LEGACY_KEYS: &[(&str, &str)] = &[("apiURI", "api_uri"), ("kubeNamespace", "namespace")];

/// Default config path: `~/.tkctl/config.yml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Resolve which config file to use.
///
/// Returns `None` only when no override is given and the home directory
/// cannot be determined.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }
    default_config_path()
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            TkctlError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            TkctlError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into a [`Config`].
///
/// An empty document yields the defaults. A [`LEGACY_KEYS`] entry is used
/// when its current key is absent.
pub fn parse_config(content: &str, source_path: &Path) -> Result<Config> {
    if content.trim().is_empty() {
        return Ok(Config::default());
    }
    let parse_error = |e: serde_yaml::Error| TkctlError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    };

    let mut value: Value = serde_yaml::from_str(content).map_err(parse_error)?;
    if let Value::Mapping(mapping) = &mut value {
        apply_legacy_keys(mapping, source_path);
    }
    serde_yaml::from_value(value).map_err(parse_error)
}

fn apply_legacy_keys(mapping: &mut Mapping, source_path: &Path) {
    for (legacy, current) in LEGACY_KEYS {
        if mapping.contains_key(*current) {
            continue;
        }
        if let Some(value) = mapping.get(*legacy).cloned() {
            tracing::debug!(
                "Reading legacy key '{}' as '{}' in {}; run `tkctl migrate` to rewrite it",
                legacy,
                current,
                source_path.display()
            );
            mapping.insert(Value::String((*current).to_string()), value);
        }
    }
}

/// Apply `TKCTL_*` overrides using `lookup` to read variables.
pub fn apply_env_overrides(config: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(namespace) = lookup(NAMESPACE_ENV).filter(|v| !v.is_empty()) {
        config.namespace = namespace;
    }
    if let Some(api_uri) = lookup(API_URI_ENV).filter(|v| !v.is_empty()) {
        config.api_uri = api_uri;
    }
}

/// Load configuration, falling back to defaults when the file is missing.
///
/// A missing file is only tolerated for the implicit locations; an explicit
/// `--config` path that does not exist is an error.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let mut config = match resolve_config_path(explicit) {
        Some(path) => match load_config_file(&path) {
            Ok(config) => {
                tracing::debug!("Loaded config from {}", path.display());
                config
            }
            Err(TkctlError::ConfigNotFound { .. }) if explicit.is_none() => {
                tracing::debug!("No config at {}, using defaults", path.display());
                Config::default()
            }
            Err(e) => return Err(e),
        },
        None => Config::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}
