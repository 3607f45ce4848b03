//! Check suite registry and execution.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use super::result::{CheckResult, CheckSuiteOutput, RunResult};
use super::suite::CheckSuite;

/// Progress events emitted while checks run.
#[derive(Debug)]
pub enum CheckProgress<'a> {
    /// An enabled suite is about to run.
    SuiteStarting { name: &'a str },
    /// A check finished.
    CheckFinished {
        suite: &'a str,
        result: &'a CheckResult,
    },
}

/// Runs an ordered catalog of check suites.
///
/// Suite order is registration order. A blocker failure halts the run unless
/// blockers are ignored; a failure inside an essential suite always halts it.
#[derive(Debug)]
pub struct SystemChecker {
    suites: Vec<CheckSuite>,
}

impl SystemChecker {
    /// Build a checker from a catalog, enabling exactly the suites named in
    /// `enabled`. Other suites are kept but skipped.
    pub fn new(catalog: Vec<CheckSuite>, enabled: &HashSet<String>) -> Self {
        let mut suites = catalog;
        for suite in &mut suites {
            suite.set_enabled(enabled.contains(suite.name()));
        }

        for name in enabled {
            if !suites.iter().any(|s| s.name() == name) {
                warn!("Ignoring unknown check suite '{}'", name);
            }
        }

        Self { suites }
    }

    /// Names of every suite in the catalog, in order.
    pub fn suite_names(&self) -> Vec<&str> {
        self.suites.iter().map(|s| s.name()).collect()
    }

    /// Names of the enabled suites, in order.
    pub fn enabled_suite_names(&self) -> Vec<&str> {
        self.suites
            .iter()
            .filter(|s| s.is_enabled())
            .map(|s| s.name())
            .collect()
    }

    /// Run all enabled suites.
    pub fn execute(&self, ignore_blocker: bool) -> (bool, RunResult) {
        self.execute_with_progress(ignore_blocker, |_| {})
    }

    /// Run all enabled suites, reporting progress through `on_progress`.
    pub fn execute_with_progress(
        &self,
        ignore_blocker: bool,
        mut on_progress: impl FnMut(CheckProgress<'_>),
    ) -> (bool, RunResult) {
        let mut success = true;
        let mut outputs = Vec::new();

        'suites: for suite in self.suites.iter().filter(|s| s.is_enabled()) {
            debug!("Running check suite '{}'", suite.name());
            on_progress(CheckProgress::SuiteStarting { name: suite.name() });

            let mut output = CheckSuiteOutput::new(suite.name());
            let mut halt = false;

            for check in suite.checks() {
                debug!("Running check '{}'", check.description());
                let result = match check.run() {
                    Ok(()) => CheckResult::pass(check.description()),
                    Err(e) => {
                        success = false;
                        halt = (check.is_blocker() && !ignore_blocker) || suite.is_essential();
                        CheckResult::fail(check.description(), format!("{:#}", e))
                    }
                };

                on_progress(CheckProgress::CheckFinished {
                    suite: suite.name(),
                    result: &result,
                });
                output.results.push(result);

                if halt {
                    info!(
                        "Check '{}' in suite '{}' failed, halting remaining checks",
                        check.description(),
                        suite.name()
                    );
                    break;
                }
            }

            outputs.push(output);
            if halt {
                break 'suites;
            }
        }

        (
            success,
            RunResult {
                success,
                suites: outputs,
            },
        )
    }
}
