//! Styles for status lines and check outcomes.

use console::Style;

use crate::checker::CheckOutcome;

/// Styles applied to terminal output.
#[derive(Debug, Clone)]
pub struct TkctlTheme {
    pub pass: Style,
    pub fail: Style,
    pub warn: Style,
    pub dim: Style,
    pub header: Style,
}

impl Default for TkctlTheme {
    fn default() -> Self {
        Self::colored()
    }
}

impl TkctlTheme {
    pub fn colored() -> Self {
        Self {
            pass: Style::new().green(),
            fail: Style::new().red().bold(),
            warn: Style::new().yellow(),
            dim: Style::new().dim(),
            header: Style::new().cyan().bold(),
        }
    }

    /// No styling at all (non-TTY, `--no-color`, tests).
    pub fn plain() -> Self {
        Self {
            pass: Style::new(),
            fail: Style::new(),
            warn: Style::new(),
            dim: Style::new(),
            header: Style::new(),
        }
    }

    /// Colored when the terminal supports it, plain otherwise.
    pub fn detect() -> Self {
        if should_use_colors() {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    pub fn format_success(&self, msg: &str) -> String {
        self.pass.apply_to(format!("✓ {}", msg)).to_string()
    }

    pub fn format_warning(&self, msg: &str) -> String {
        self.warn.apply_to(format!("⚠ {}", msg)).to_string()
    }

    pub fn format_error(&self, msg: &str) -> String {
        self.fail.apply_to(format!("✗ {}", msg)).to_string()
    }

    pub fn format_header(&self, title: &str) -> String {
        self.header.apply_to(title).to_string()
    }

    /// The PASS/FAIL label for a check outcome.
    pub fn outcome(&self, outcome: CheckOutcome) -> String {
        let style = match outcome {
            CheckOutcome::Pass => &self.pass,
            CheckOutcome::Fail => &self.fail,
        };
        style.apply_to(outcome.label()).to_string()
    }
}

/// Whether stdout should receive ANSI colors.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    console::colors_enabled() && console::Term::stdout().is_term()
}
