//! Check run results.

use serde::Serialize;

/// Outcome of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckOutcome {
    Pass,
    Fail,
}

impl CheckOutcome {
    /// Label used in table output.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
        }
    }
}

/// Result of one executed check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub description: String,
    pub outcome: CheckOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckResult {
    /// A passing result.
    pub fn pass(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            outcome: CheckOutcome::Pass,
            error: None,
        }
    }

    /// A failing result carrying the error text.
    pub fn fail(description: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            outcome: CheckOutcome::Fail,
            error: Some(error.into()),
        }
    }

    pub fn passed(&self) -> bool {
        self.outcome == CheckOutcome::Pass
    }
}

/// Results of every executed check in one suite, in execution order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckSuiteOutput {
    pub name: String,
    pub results: Vec<CheckResult>,
}

impl CheckSuiteOutput {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            results: Vec::new(),
        }
    }

    /// Whether every recorded check passed.
    pub fn passed(&self) -> bool {
        self.results.iter().all(CheckResult::passed)
    }
}

/// The full (or partial, after a halt) report of a check run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunResult {
    pub success: bool,
    pub suites: Vec<CheckSuiteOutput>,
}

impl RunResult {
    /// Look up a suite's output by name.
    pub fn suite(&self, name: &str) -> Option<&CheckSuiteOutput> {
        self.suites.iter().find(|s| s.name == name)
    }

    /// Total number of checks that ran.
    pub fn total_checks(&self) -> usize {
        self.suites.iter().map(|s| s.results.len()).sum()
    }

    /// Number of checks that failed.
    pub fn failed_checks(&self) -> usize {
        self.suites
            .iter()
            .flat_map(|s| &s.results)
            .filter(|r| !r.passed())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pass_and_fail_constructors() {
        let pass = CheckResult::pass("ok");
        assert!(pass.passed());
        assert!(pass.error.is_none());

        let fail = CheckResult::fail("bad", "boom");
        assert!(!fail.passed());
        assert_eq!(fail.error.as_deref(), Some("boom"));
    }

    #[test]
    fn outcome_serializes_lowercase() {
        let json = serde_json::to_string(&CheckOutcome::Fail).unwrap();
        assert_eq!(json, "\"fail\"");
    }

    #[test]
    fn pass_result_omits_error_field() {
        let json = serde_json::to_value(CheckResult::pass("ok")).unwrap();
        assert!(json.get("error").is_none());
        assert_eq!(json["outcome"], "pass");
    }

    #[test]
    fn run_result_counts() {
        let result = RunResult {
            success: false,
            suites: vec![
                CheckSuiteOutput {
                    name: "a".into(),
                    results: vec![CheckResult::pass("1"), CheckResult::pass("2")],
                },
                CheckSuiteOutput {
                    name: "b".into(),
                    results: vec![CheckResult::fail("3", "nope")],
                },
            ],
        };

        assert_eq!(result.total_checks(), 3);
        assert_eq!(result.failed_checks(), 1);
        assert!(result.suite("a").unwrap().passed());
        assert!(!result.suite("b").unwrap().passed());
        assert!(result.suite("c").is_none());
    }
}
