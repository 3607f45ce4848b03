//! Kubernetes and Helm access through their command-line tools.
//!
//! Checks only need yes/no answers from the cluster, so [`ClusterOps`] wraps
//! each question as a `Result<()>`. [`KubeCli`] answers them by shelling out
//! to `kubectl` and `helm`; tests substitute their own implementation.

use std::path::Path;

use crate::error::{Result, TkctlError};
use crate::shell::{self, CommandOptions};

const KUBECONFIG_ENV: &str = "KUBECONFIG";

/// Cluster questions the built-in checks ask.
pub trait ClusterOps {
    /// `kubectl` is installed and runnable.
    fn kubectl_installed(&self) -> Result<()>;

    /// The API server of the current context answers.
    fn cluster_reachable(&self) -> Result<()>;

    /// `namespace` exists.
    fn namespace_exists(&self, namespace: &str) -> Result<()>;

    /// The current user may perform `verb` on `resource` in `namespace`.
    fn can_i(&self, verb: &str, resource: &str, namespace: &str) -> Result<()>;

    /// `helm` is installed and runnable.
    fn helm_installed(&self) -> Result<()>;

    /// Helm release `release` is deployed in `namespace`.
    fn release_deployed(&self, release: &str, namespace: &str) -> Result<()>;
}

/// [`ClusterOps`] backed by the `kubectl` and `helm` binaries.
#[derive(Debug, Clone)]
pub struct KubeCli {
    kubectl: String,
    helm: String,
    context: Option<String>,
    options: CommandOptions,
}

impl KubeCli {
    /// Use `kubectl` and `helm` from PATH with the given kube context.
    pub fn new(context: Option<String>) -> Self {
        Self {
            kubectl: "kubectl".to_string(),
            helm: "helm".to_string(),
            context,
            options: CommandOptions::default(),
        }
    }

    /// Point both tools at `path` through `KUBECONFIG`.
    pub fn with_kubeconfig(mut self, path: &Path) -> Self {
        self.options.env.insert(
            KUBECONFIG_ENV.to_string(),
            path.to_string_lossy().into_owned(),
        );
        self
    }

    /// Override the binaries used (e.g. absolute paths).
    pub fn with_binaries(mut self, kubectl: impl Into<String>, helm: impl Into<String>) -> Self {
        self.kubectl = kubectl.into();
        self.helm = helm.into();
        self
    }

    fn kubectl_args<'a>(&'a self, args: &[&'a str]) -> Vec<&'a str> {
        let mut full = Vec::with_capacity(args.len() + 2);
        if let Some(context) = &self.context {
            full.push("--context");
            full.push(context.as_str());
        }
        full.extend_from_slice(args);
        full
    }

    fn helm_args<'a>(&'a self, args: &[&'a str]) -> Vec<&'a str> {
        let mut full = Vec::with_capacity(args.len() + 2);
        if let Some(context) = &self.context {
            full.push("--kube-context");
            full.push(context.as_str());
        }
        full.extend_from_slice(args);
        full
    }

    fn kubectl(&self, args: &[&str]) -> Result<String> {
        let args = self.kubectl_args(args);
        let result = shell::execute_checked(&self.kubectl, &args, &self.options)?;
        Ok(result.stdout)
    }

    fn helm(&self, args: &[&str]) -> Result<String> {
        let args = self.helm_args(args);
        let result = shell::execute_checked(&self.helm, &args, &self.options)?;
        Ok(result.stdout)
    }
}

impl Default for KubeCli {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ClusterOps for KubeCli {
    fn kubectl_installed(&self) -> Result<()> {
        shell::execute_checked(&self.kubectl, &["version", "--client"], &self.options)
            .map(|_| ())
    }

    fn cluster_reachable(&self) -> Result<()> {
        self.kubectl(&["cluster-info"]).map(|_| ())
    }

    fn namespace_exists(&self, namespace: &str) -> Result<()> {
        self.kubectl(&["get", "namespace", namespace]).map(|_| ())
    }

    fn can_i(&self, verb: &str, resource: &str, namespace: &str) -> Result<()> {
        // `auth can-i` exits non-zero on "no", which surfaces as CommandFailed
        let answer = self.kubectl(&["auth", "can-i", verb, resource, "-n", namespace])?;
        if answer.trim() == "yes" {
            Ok(())
        } else {
            Err(TkctlError::CommandFailed {
                command: format!("{} auth can-i {} {} -n {}", self.kubectl, verb, resource, namespace),
                code: Some(0),
                stderr: format!("unexpected answer '{}'", answer.trim()),
            })
        }
    }

    fn helm_installed(&self) -> Result<()> {
        shell::execute_checked(&self.helm, &["version", "--short"], &self.options)
            .map(|_| ())
    }

    fn release_deployed(&self, release: &str, namespace: &str) -> Result<()> {
        let status = self.helm(&["status", release, "-n", namespace, "-o", "json"])?;
        let value: serde_json::Value =
            serde_json::from_str(&status).map_err(|e| TkctlError::CommandFailed {
                command: format!("{} status {}", self.helm, release),
                code: Some(0),
                stderr: format!("unparseable status output: {}", e),
            })?;

        match value["info"]["status"].as_str() {
            Some("deployed") => Ok(()),
            other => Err(TkctlError::CommandFailed {
                command: format!("{} status {}", self.helm, release),
                code: Some(0),
                stderr: format!("release status is {}", other.unwrap_or("unknown")),
            }),
        }
    }
}
