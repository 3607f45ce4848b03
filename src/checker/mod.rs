//! Diagnostic check suites.
//!
//! A [`SystemChecker`] runs an ordered catalog of [`CheckSuite`]s, each an
//! ordered list of [`Checker`]s, and aggregates a [`RunResult`].
//!
//! # Halting
//!
//! Failures are recorded, never raised. A failing check halts the whole run
//! when it is a blocker (unless blockers are ignored) or when its suite is
//! essential. Already-recorded results are kept in the partial report.
//!
//! # Example
//!
//! ```
//! use std::collections::HashSet;
//! use tkctl::checker::{CheckSuite, Checker, SystemChecker};
//!
//! let catalog = vec![
//!     CheckSuite::new("cluster")
//!         .essential()
//!         .with_check(Checker::new("cluster is reachable", || Ok(()))),
//!     CheckSuite::new("api")
//!         .with_check(Checker::new("API is healthy", || anyhow::bail!("timeout")).blocker()),
//! ];
//! let enabled: HashSet<String> = ["cluster", "api"].iter().map(|s| s.to_string()).collect();
//!
//! let (success, result) = SystemChecker::new(catalog, &enabled).execute(false);
//! assert!(!success);
//! assert_eq!(result.suites.len(), 2);
//! ```

pub mod catalog;
pub mod check;
pub mod result;
pub mod suite;
pub mod system;

pub use catalog::{
    builtin_suite_names, builtin_suites, CheckContext, API_SUITE, CLUSTER_SUITE, HELM_SUITE,
    PERMISSIONS_SUITE,
};
pub use check::{CheckFn, Checker};
pub use result::{CheckOutcome, CheckResult, CheckSuiteOutput, RunResult};
pub use suite::CheckSuite;
pub use system::{CheckProgress, SystemChecker};
