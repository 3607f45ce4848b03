//! Configuration schema definitions for tkctl.
//!
//! This module contains the struct definitions that map to
//! the YAML configuration file format.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration structure for `~/.tkctl/config.yml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Namespace the platform is installed in
    pub namespace: String,

    /// Base URI of the API server
    pub api_uri: String,

    /// Helm release name of the installation
    pub release: String,

    /// Kube context to use instead of the current one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kube_context: Option<String>,

    /// Kubeconfig file passed to kubectl and helm as `KUBECONFIG`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kubeconfig: Option<PathBuf>,

    /// Timeout for API requests in seconds
    pub timeout_secs: u64,

    /// Defaults for `tkctl check`
    pub check: CheckSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            api_uri: default_api_uri(),
            release: default_release(),
            kube_context: None,
            kubeconfig: None,
            timeout_secs: default_timeout_secs(),
            check: CheckSettings::default(),
        }
    }
}

/// Defaults for the `check` command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckSettings {
    /// Suites to run when `--suite` is not given (empty = all)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suites: Vec<String>,

    /// Continue past blocker failures by default
    #[serde(skip_serializing_if = "is_false")]
    pub ignore_blocker: bool,
}

fn default_namespace() -> String {
    "testkube".to_string()
}

fn default_api_uri() -> String {
    "http://localhost:8088".to_string()
}

fn default_release() -> String {
    "testkube".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn is_false(b: &bool) -> bool {
    !*b
}
