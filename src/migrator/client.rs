//! Built-in client migrations for the CLI config file.
//!
//! Older clients wrote camelCase keys and a `telemetry` block that current
//! releases no longer read. These migrations rewrite the raw YAML in place so
//! the typed [`Config`](crate::config::Config) loads cleanly. A missing or
//! empty config file is left alone.

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};

use crate::error::{Result, TkctlError};

use super::migration::{Migration, MigrationKind};
use super::runner::Migrator;

/// Register every built-in client migration for the config at `config_path`.
pub fn builtin_migrations(config_path: &Path) -> Migrator {
    let mut migrator = Migrator::new();
    migrator.register(Box::new(RenameKey::new(
        "1.0.0",
        "Rename legacy apiURI key to api_uri",
        config_path,
        "apiURI",
        "api_uri",
    )));
    migrator.register(Box::new(RenameKey::new(
        "1.0.0",
        "Rename legacy kubeNamespace key to namespace",
        config_path,
        "kubeNamespace",
        "namespace",
    )));
    migrator.register(Box::new(RemoveKey::new(
        "1.2.0",
        "Remove deprecated telemetry key",
        config_path,
        "telemetry",
    )));
    migrator
}

/// Renames a top-level key. If both keys exist the new one wins.
#[derive(Debug, Clone)]
pub struct RenameKey {
    version: String,
    description: String,
    path: PathBuf,
    from: String,
    to: String,
}

impl RenameKey {
    pub fn new(version: &str, description: &str, path: &Path, from: &str, to: &str) -> Self {
        Self {
            version: version.to_string(),
            description: description.to_string(),
            path: path.to_path_buf(),
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

impl Migration for RenameKey {
    fn version(&self) -> &str {
        &self.version
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn kind(&self) -> MigrationKind {
        MigrationKind::Client
    }

    fn migrate(&self) -> Result<()> {
        let Some(mut mapping) = load_mapping(&self.path)? else {
            return Ok(());
        };

        let Some(value) = mapping.remove(self.from.as_str()) else {
            return Ok(());
        };

        if mapping.contains_key(self.to.as_str()) {
            tracing::warn!(
                "Both '{}' and '{}' are set in {}; keeping '{}'",
                self.from,
                self.to,
                self.path.display(),
                self.to
            );
        } else {
            mapping.insert(Value::String(self.to.clone()), value);
        }

        save_mapping(&self.path, &mapping)
    }
}

/// Removes a top-level key.
#[derive(Debug, Clone)]
pub struct RemoveKey {
    version: String,
    description: String,
    path: PathBuf,
    key: String,
}

impl RemoveKey {
    pub fn new(version: &str, description: &str, path: &Path, key: &str) -> Self {
        Self {
            version: version.to_string(),
            description: description.to_string(),
            path: path.to_path_buf(),
            key: key.to_string(),
        }
    }
}

impl Migration for RemoveKey {
    fn version(&self) -> &str {
        &self.version
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn kind(&self) -> MigrationKind {
        MigrationKind::Client
    }

    fn migrate(&self) -> Result<()> {
        let Some(mut mapping) = load_mapping(&self.path)? else {
            return Ok(());
        };

        if mapping.remove(self.key.as_str()).is_some() {
            save_mapping(&self.path, &mapping)?;
        }
        Ok(())
    }
}

fn load_mapping(path: &Path) -> Result<Option<Mapping>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)?;
    let value: Value = serde_yaml::from_str(&content).map_err(|e| TkctlError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    match value {
        Value::Null => Ok(None),
        Value::Mapping(mapping) => Ok(Some(mapping)),
        _ => Err(TkctlError::ConfigParseError {
            path: path.to_path_buf(),
            message: "expected a mapping at the top level".to_string(),
        }),
    }
}

fn save_mapping(path: &Path, mapping: &Mapping) -> Result<()> {
    let content = serde_yaml::to_string(mapping)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_file;
    use std::collections::HashSet;
    use tempfile::TempDir;

    fn write_config(content: &str) -> (TempDir, PathBuf) {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        fs::write(&path, content).unwrap();
        (temp, path)
    }

    fn client() -> HashSet<MigrationKind> {
        [MigrationKind::Client].into_iter().collect()
    }

    #[test]
    fn rename_moves_value() {
        let (_temp, path) = write_config("apiURI: http://old:8088\nrelease: tk\n");
        let migration = RenameKey::new("1.0.0", "rename", &path, "apiURI", "api_uri");

        migration.migrate().unwrap();

        let config = load_config_file(&path).unwrap();
        assert_eq!(config.api_uri, "http://old:8088");
        assert_eq!(config.release, "tk");
        assert!(!fs::read_to_string(&path).unwrap().contains("apiURI"));
    }

    #[test]
    fn rename_keeps_existing_new_key() {
        let (_temp, path) = write_config("apiURI: http://old\napi_uri: http://new\n");
        let migration = RenameKey::new("1.0.0", "rename", &path, "apiURI", "api_uri");

        migration.migrate().unwrap();

        let config = load_config_file(&path).unwrap();
        assert_eq!(config.api_uri, "http://new");
    }

    #[test]
    fn rename_is_idempotent() {
        let (_temp, path) = write_config("kubeNamespace: qa\n");
        let migration = RenameKey::new("1.0.0", "rename", &path, "kubeNamespace", "namespace");

        migration.migrate().unwrap();
        let first = fs::read_to_string(&path).unwrap();
        migration.migrate().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), first);
        assert_eq!(load_config_file(&path).unwrap().namespace, "qa");
    }

    #[test]
    fn remove_drops_key() {
        let (_temp, path) = write_config("telemetry:\n  enabled: true\nnamespace: qa\n");
        let migration = RemoveKey::new("1.2.0", "remove", &path, "telemetry");

        migration.migrate().unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.contains("telemetry"));
        assert!(content.contains("namespace: qa"));
    }

    #[test]
    fn missing_file_is_noop() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("absent.yml");

        RenameKey::new("1.0.0", "rename", &path, "a", "b").migrate().unwrap();
        RemoveKey::new("1.0.0", "remove", &path, "a").migrate().unwrap();

        assert!(!path.exists());
    }

    #[test]
    fn non_mapping_document_is_parse_error() {
        let (_temp, path) = write_config("- just\n- a list\n");
        let err = RemoveKey::new("1.0.0", "remove", &path, "a")
            .migrate()
            .unwrap_err();
        assert!(matches!(err, TkctlError::ConfigParseError { .. }));
    }

    #[test]
    fn builtins_are_client_migrations_in_order() {
        let (_temp, path) = write_config("");
        let migrator = builtin_migrations(&path);
        let selected = migrator.select_applicable("0.9.0", &client()).unwrap();
        let versions: Vec<_> = selected.iter().map(|m| m.version()).collect();

        assert_eq!(versions, vec!["1.0.0", "1.0.0", "1.2.0"]);
        assert!(selected.iter().all(|m| m.kind() == MigrationKind::Client));
    }

    #[test]
    fn builtins_rewrite_legacy_config() {
        let (_temp, path) =
            write_config("apiURI: https://api.example.com\nkubeNamespace: qa\ntelemetry: true\n");

        builtin_migrations(&path).run("1.0.0", &client()).unwrap();

        let config = load_config_file(&path).unwrap();
        assert_eq!(config.api_uri, "https://api.example.com");
        assert_eq!(config.namespace, "qa");
        assert!(!fs::read_to_string(&path).unwrap().contains("telemetry"));
    }

    #[test]
    fn newer_server_only_gets_later_migrations() {
        let (_temp, path) = write_config("apiURI: https://api.example.com\ntelemetry: true\n");

        builtin_migrations(&path).run("1.1.0", &client()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("apiURI"));
        assert!(!content.contains("telemetry"));
    }
}
