//! The `tkctl check` command.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::ApiClient;
use crate::checker::{
    builtin_suite_names, builtin_suites, CheckContext, CheckProgress, RunResult, SystemChecker,
};
use crate::cli::args::{CheckArgs, OutputFormat};
use crate::config::{CheckSettings, Config};
use crate::error::{Result, TkctlError};
use crate::kube::KubeCli;
use crate::ui::{SpinnerHandle, Table, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// JSON report written by `check --output json`.
#[derive(Debug, Serialize)]
pub struct CheckReport<'a> {
    pub checked_at: DateTime<Utc>,
    pub namespace: &'a str,
    #[serde(flatten)]
    pub run: &'a RunResult,
}

/// The check command implementation.
pub struct CheckCommand {
    args: CheckArgs,
    settings: CheckSettings,
    context: CheckContext,
}

impl CheckCommand {
    /// Create a check command talking to the installation described by `config`.
    pub fn new(config: &Config, args: CheckArgs) -> Result<Self> {
        let api = ApiClient::new(&config.api_uri, Duration::from_secs(config.timeout_secs))?;
        let mut cluster = KubeCli::new(config.kube_context.clone());
        if let Some(kubeconfig) = &config.kubeconfig {
            cluster = cluster.with_kubeconfig(kubeconfig);
        }
        let context = CheckContext {
            cluster: Arc::new(cluster),
            api: Arc::new(api),
            namespace: config.namespace.clone(),
            release: config.release.clone(),
        };
        Ok(Self::with_context(context, config.check.clone(), args))
    }

    /// Create a check command over explicit collaborators.
    pub fn with_context(context: CheckContext, settings: CheckSettings, args: CheckArgs) -> Self {
        Self {
            args,
            settings,
            context,
        }
    }

    /// Suites to enable: `--suite` first, then the config default, then all.
    ///
    /// Names given on the command line must exist; names from the config
    /// file are passed through and ignored by the checker if unknown.
    fn enabled_suites(&self) -> Result<HashSet<String>> {
        let known = builtin_suite_names();
        if !self.args.suite.is_empty() {
            if let Some(unknown) = self
                .args
                .suite
                .iter()
                .find(|name| !known.contains(&name.as_str()))
            {
                return Err(TkctlError::UnknownCheckSuite {
                    name: unknown.clone(),
                });
            }
            return Ok(self.args.suite.iter().cloned().collect());
        }
        if !self.settings.suites.is_empty() {
            return Ok(self.settings.suites.iter().cloned().collect());
        }
        Ok(known.into_iter().map(String::from).collect())
    }

    fn ignore_blocker(&self) -> bool {
        self.args.ignore_blocker || self.settings.ignore_blocker
    }

    fn run_checks(&self, ui: &mut dyn UserInterface) -> Result<(bool, RunResult)> {
        let enabled = self.enabled_suites()?;
        let checker = SystemChecker::new(builtin_suites(&self.context), &enabled);
        let show_progress = self.args.output == OutputFormat::Table;
        let verbose = ui.output_mode().shows_detail();

        let mut current: Option<SuiteSpinner> = None;
        let outcome = checker.execute_with_progress(self.ignore_blocker(), |event| match event {
            CheckProgress::SuiteStarting { name } => {
                if let Some(done) = current.take() {
                    done.finish();
                }
                if show_progress {
                    let spinner = ui.start_spinner(&format!("Running {} checks", name));
                    current = Some(SuiteSpinner::new(name, spinner));
                }
            }
            CheckProgress::CheckFinished { suite, result } => {
                if let Some(spinner) = current.as_mut() {
                    spinner.record(&result.description, result.passed());
                }
                if verbose && show_progress {
                    ui.message(&format!(
                        "  [{}] {} {}",
                        suite,
                        result.outcome.label(),
                        result.description
                    ));
                }
            }
        });
        if let Some(done) = current.take() {
            done.finish();
        }

        Ok(outcome)
    }

    fn render_table(&self, run: &RunResult, ui: &mut dyn UserInterface) {
        let mut table = Table::new(&["Suite", "Check", "Result", "Error"]);
        for suite in &run.suites {
            for result in &suite.results {
                let outcome = ui.theme().outcome(result.outcome);
                table.add_row(&[
                    suite.name.as_str(),
                    result.description.as_str(),
                    outcome.as_str(),
                    result.error.as_deref().unwrap_or(""),
                ]);
            }
        }
        ui.message(&table.render());

        let total = run.total_checks();
        if run.success {
            ui.success(&format!("All {} checks passed", total));
        } else {
            ui.error(&format!(
                "{} of {} checks failed",
                run.failed_checks(),
                total
            ));
        }
    }

    fn render_json(&self, run: &RunResult, ui: &mut dyn UserInterface) -> Result<()> {
        let report = CheckReport {
            checked_at: Utc::now(),
            namespace: &self.context.namespace,
            run,
        };
        let json =
            serde_json::to_string_pretty(&report).map_err(|e| TkctlError::Other(e.into()))?;
        ui.output(&json);
        Ok(())
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if self.args.output == OutputFormat::Table {
            ui.show_header(&format!("Checking installation in {}", self.context.namespace));
        }

        let (success, run) = self.run_checks(ui)?;

        match self.args.output {
            OutputFormat::Table if run.suites.is_empty() => {
                ui.warning("No check suites enabled");
            }
            OutputFormat::Table => self.render_table(&run, ui),
            OutputFormat::Json => self.render_json(&run, ui)?,
        }

        Ok(if success {
            CommandResult::success()
        } else {
            CommandResult::failure(1)
        })
    }
}

/// Spinner for one running suite, tracking whether it has failed so far.
struct SuiteSpinner {
    name: String,
    spinner: Box<dyn SpinnerHandle>,
    failed: usize,
}

impl SuiteSpinner {
    fn new(name: &str, spinner: Box<dyn SpinnerHandle>) -> Self {
        Self {
            name: name.to_string(),
            spinner,
            failed: 0,
        }
    }

    fn record(&mut self, description: &str, passed: bool) {
        self.spinner.set_message(description);
        if !passed {
            self.failed += 1;
        }
    }

    fn finish(mut self) {
        if self.failed == 0 {
            self.spinner
                .finish_success(&format!("{} checks passed", self.name));
        } else {
            self.spinner
                .finish_error(&format!("{} checks: {} failed", self.name, self.failed));
        }
    }
}
