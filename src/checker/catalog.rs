//! The built-in catalog of check suites.

use std::sync::Arc;

use crate::api::ApiClient;
use crate::kube::ClusterOps;

use super::check::Checker;
use super::suite::CheckSuite;

/// Suite verifying kubectl and cluster access. Essential.
pub const CLUSTER_SUITE: &str = "cluster";
/// Suite verifying the Helm release.
pub const HELM_SUITE: &str = "helm";
/// Suite verifying the API server.
pub const API_SUITE: &str = "api";
/// Suite verifying RBAC permissions.
pub const PERMISSIONS_SUITE: &str = "permissions";

/// Collaborators and settings the built-in checks close over.
#[derive(Clone)]
pub struct CheckContext {
    pub cluster: Arc<dyn ClusterOps>,
    pub api: Arc<ApiClient>,
    pub namespace: String,
    pub release: String,
}

/// Names of the built-in suites, in execution order.
pub fn builtin_suite_names() -> Vec<&'static str> {
    vec![CLUSTER_SUITE, HELM_SUITE, API_SUITE, PERMISSIONS_SUITE]
}

/// Build every built-in suite, in execution order.
///
/// The cluster suite comes first and is essential: nothing after it means
/// anything without a reachable cluster.
pub fn builtin_suites(ctx: &CheckContext) -> Vec<CheckSuite> {
    vec![
        cluster_suite(ctx),
        helm_suite(ctx),
        api_suite(ctx),
        permissions_suite(ctx),
    ]
}

fn cluster_suite(ctx: &CheckContext) -> CheckSuite {
    let namespace = ctx.namespace.clone();
    CheckSuite::new(CLUSTER_SUITE)
        .essential()
        .with_check(
            cluster_check(ctx, "kubectl is installed", |c| c.kubectl_installed()).blocker(),
        )
        .with_check(
            cluster_check(ctx, "cluster is reachable", |c| c.cluster_reachable()).blocker(),
        )
        .with_check(cluster_check(
            ctx,
            format!("namespace {} exists", namespace),
            move |c| c.namespace_exists(&namespace),
        ))
}

fn helm_suite(ctx: &CheckContext) -> CheckSuite {
    let release = ctx.release.clone();
    let namespace = ctx.namespace.clone();
    CheckSuite::new(HELM_SUITE)
        .with_check(cluster_check(ctx, "helm is installed", |c| c.helm_installed()).blocker())
        .with_check(cluster_check(
            ctx,
            format!("release {} is deployed", release),
            move |c| c.release_deployed(&release, &namespace),
        ))
}

fn api_suite(ctx: &CheckContext) -> CheckSuite {
    let health = Arc::clone(&ctx.api);
    let info = Arc::clone(&ctx.api);
    CheckSuite::new(API_SUITE)
        .with_check(
            Checker::new("API server is healthy", move || Ok(health.health()?)).blocker(),
        )
        .with_check(Checker::new("server info is available", move || {
            let info = info.server_info()?;
            tracing::debug!("API server reports version {}", info.version);
            Ok(())
        }))
}

fn permissions_suite(ctx: &CheckContext) -> CheckSuite {
    let ns = ctx.namespace.clone();
    CheckSuite::new(PERMISSIONS_SUITE)
        .with_check(permission_check(ctx, "list", "pods", &ns))
        .with_check(permission_check(ctx, "create", "jobs", &ns))
}

fn permission_check(ctx: &CheckContext, verb: &str, resource: &str, ns: &str) -> Checker {
    let (verb, resource, ns) = (verb.to_string(), resource.to_string(), ns.to_string());
    cluster_check(
        ctx,
        format!("can {} {} in {}", verb, resource, ns),
        move |c| c.can_i(&verb, &resource, &ns),
    )
}

fn cluster_check(
    ctx: &CheckContext,
    description: impl Into<String>,
    f: impl Fn(&dyn ClusterOps) -> crate::Result<()> + 'static,
) -> Checker {
    let cluster = Arc::clone(&ctx.cluster);
    Checker::new(description, move || Ok(f(cluster.as_ref())?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::{CheckOutcome, SystemChecker};
    use crate::error::TkctlError;
    use httpmock::prelude::*;
    use std::collections::HashSet;
    use std::time::Duration;

    /// Cluster stub failing the operations listed in `failing`.
    #[derive(Default)]
    struct StubCluster {
        failing: HashSet<&'static str>,
    }

    impl StubCluster {
        fn failing(ops: &[&'static str]) -> Self {
            Self {
                failing: ops.iter().copied().collect(),
            }
        }

        fn answer(&self, op: &'static str) -> crate::Result<()> {
            if self.failing.contains(op) {
                Err(TkctlError::CommandFailed {
                    command: op.to_string(),
                    code: Some(1),
                    stderr: String::new(),
                })
            } else {
                Ok(())
            }
        }
    }

    impl ClusterOps for StubCluster {
        fn kubectl_installed(&self) -> crate::Result<()> {
            self.answer("kubectl")
        }
        fn cluster_reachable(&self) -> crate::Result<()> {
            self.answer("cluster")
        }
        fn namespace_exists(&self, _namespace: &str) -> crate::Result<()> {
            self.answer("namespace")
        }
        fn can_i(&self, verb: &str, _resource: &str, _namespace: &str) -> crate::Result<()> {
            if verb == "create" {
                self.answer("create")
            } else {
                self.answer("list")
            }
        }
        fn helm_installed(&self) -> crate::Result<()> {
            self.answer("helm")
        }
        fn release_deployed(&self, _release: &str, _namespace: &str) -> crate::Result<()> {
            self.answer("release")
        }
    }

    /// API server whose health endpoint answers 503.
    fn unhealthy_api() -> MockServer {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/health");
            then.status(503);
        });
        server
    }

    fn context(cluster: StubCluster, api: &MockServer) -> CheckContext {
        CheckContext {
            cluster: Arc::new(cluster),
            api: Arc::new(ApiClient::new(&api.base_url(), Duration::from_secs(5)).unwrap()),
            namespace: "testkube".to_string(),
            release: "testkube".to_string(),
        }
    }

    fn all_but_api() -> HashSet<String> {
        [CLUSTER_SUITE, HELM_SUITE, PERMISSIONS_SUITE]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn catalog_order_matches_names() {
        let api = unhealthy_api();
        let suites = builtin_suites(&context(StubCluster::default(), &api));
        let names: Vec<_> = suites.iter().map(|s| s.name()).collect();
        assert_eq!(names, builtin_suite_names());
    }

    #[test]
    fn only_cluster_suite_is_essential() {
        let api = unhealthy_api();
        let suites = builtin_suites(&context(StubCluster::default(), &api));
        let essential: Vec<_> = suites
            .iter()
            .filter(|s| s.is_essential())
            .map(|s| s.name())
            .collect();
        assert_eq!(essential, vec![CLUSTER_SUITE]);
    }

    #[test]
    fn descriptions_include_namespace_and_release() {
        let api = unhealthy_api();
        let suites = builtin_suites(&context(StubCluster::default(), &api));
        let descriptions: Vec<_> = suites
            .iter()
            .flat_map(|s| s.checks())
            .map(|c| c.description().to_string())
            .collect();
        assert!(descriptions.contains(&"namespace testkube exists".to_string()));
        assert!(descriptions.contains(&"release testkube is deployed".to_string()));
        assert!(descriptions.contains(&"can create jobs in testkube".to_string()));
    }

    #[test]
    fn healthy_cluster_passes_enabled_suites() {
        let api = unhealthy_api();
        let checker = SystemChecker::new(
            builtin_suites(&context(StubCluster::default(), &api)),
            &all_but_api(),
        );

        let (success, result) = checker.execute(false);

        assert!(success);
        assert_eq!(result.total_checks(), 7);
    }

    #[test]
    fn unreachable_cluster_halts_everything() {
        let api = unhealthy_api();
        let checker = SystemChecker::new(
            builtin_suites(&context(StubCluster::failing(&["cluster"]), &api)),
            &all_but_api(),
        );

        let (success, result) = checker.execute(true);

        assert!(!success);
        assert_eq!(result.suites.len(), 1);
        let cluster = result.suite(CLUSTER_SUITE).unwrap();
        assert_eq!(cluster.results.len(), 2);
        assert_eq!(cluster.results[1].outcome, CheckOutcome::Fail);
    }

    #[test]
    fn missing_permission_does_not_halt() {
        let api = unhealthy_api();
        let checker = SystemChecker::new(
            builtin_suites(&context(StubCluster::failing(&["list"]), &api)),
            &all_but_api(),
        );

        let (success, result) = checker.execute(false);

        assert!(!success);
        let perms = result.suite(PERMISSIONS_SUITE).unwrap();
        assert_eq!(perms.results.len(), 2);
        assert_eq!(result.failed_checks(), 1);
    }

    #[test]
    fn unhealthy_api_blocks_remaining_suites() {
        let api = unhealthy_api();
        let enabled: HashSet<String> = builtin_suite_names()
            .into_iter()
            .map(String::from)
            .collect();
        let checker =
            SystemChecker::new(builtin_suites(&context(StubCluster::default(), &api)), &enabled);

        let (success, result) = checker.execute(false);

        assert!(!success);
        assert_eq!(result.suite(API_SUITE).unwrap().results.len(), 1);
        assert!(result.suite(PERMISSIONS_SUITE).is_none());
    }
}
