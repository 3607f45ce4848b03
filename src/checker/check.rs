//! Individual health checks.

use std::fmt;

/// The action behind a check.
///
/// Any error is recorded as a failed check; the engine never inspects it
/// beyond its display text.
pub type CheckFn = Box<dyn Fn() -> anyhow::Result<()>>;

/// A single runnable health check.
pub struct Checker {
    description: String,
    is_blocker: bool,
    action: CheckFn,
}

impl Checker {
    /// Create a non-blocking check.
    pub fn new(
        description: impl Into<String>,
        action: impl Fn() -> anyhow::Result<()> + 'static,
    ) -> Self {
        Self {
            description: description.into(),
            is_blocker: false,
            action: Box::new(action),
        }
    }

    /// Mark this check as a blocker: its failure halts the run unless the
    /// caller ignores blockers.
    pub fn blocker(mut self) -> Self {
        self.is_blocker = true;
        self
    }

    /// Human-readable label.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether a failure of this check halts the run.
    pub fn is_blocker(&self) -> bool {
        self.is_blocker
    }

    /// Run the check action once.
    pub fn run(&self) -> anyhow::Result<()> {
        (self.action)()
    }
}

impl fmt::Debug for Checker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Checker")
            .field("description", &self.description)
            .field("is_blocker", &self.is_blocker)
            .finish_non_exhaustive()
    }
}
