//! Named groups of checks.

use super::check::Checker;

/// An ordered, named set of checks sharing an enable flag.
///
/// Check order is fixed at construction and is the execution order.
#[derive(Debug)]
pub struct CheckSuite {
    name: String,
    checks: Vec<Checker>,
    enabled: bool,
    essential: bool,
}

impl CheckSuite {
    /// Create an empty, disabled, non-essential suite.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            checks: Vec::new(),
            enabled: false,
            essential: false,
        }
    }

    /// Mark the suite as essential: any failure inside it halts the run,
    /// even when blockers are ignored.
    pub fn essential(mut self) -> Self {
        self.essential = true;
        self
    }

    /// Append a check.
    pub fn with_check(mut self, check: Checker) -> Self {
        self.checks.push(check);
        self
    }

    /// Suite name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Checks in execution order.
    pub fn checks(&self) -> &[Checker] {
        &self.checks
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_essential(&self) -> bool {
        self.essential
    }
}
