//! Progress indicators.
//!
//! [`ProgressSpinner`] animates on a terminal; [`LineSpinner`] prints one
//! line when it starts and one when it finishes, for logs and CI.

use std::io::Write;
use std::time::Duration;

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};

use super::theme::TkctlTheme;
use super::SpinnerHandle;

const TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// Animated spinner on stdout.
pub struct ProgressSpinner {
    bar: ProgressBar,
    theme: TkctlTheme,
}

impl ProgressSpinner {
    pub fn new(message: &str, theme: TkctlTheme) -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars(TICK_CHARS)
            .template("{spinner:.cyan} {msg}")
        {
            bar.set_style(style);
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        Self { bar, theme }
    }

    /// A spinner that draws nothing.
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            theme: TkctlTheme::plain(),
        }
    }

    fn finish_with(&mut self, line: String) {
        if let Ok(style) = ProgressStyle::default_spinner().template("{msg}") {
            self.bar.set_style(style);
        }
        self.bar.finish_with_message(line);
    }
}

impl SpinnerHandle for ProgressSpinner {
    fn set_message(&mut self, msg: &str) {
        self.bar.set_message(msg.to_string());
    }

    fn finish_success(&mut self, msg: &str) {
        let line = self.theme.format_success(msg);
        self.finish_with(line);
    }

    fn finish_error(&mut self, msg: &str) {
        let line = self.theme.format_error(msg);
        self.finish_with(line);
    }
}

/// Line-oriented stand-in for a spinner.
///
/// Intermediate messages are dropped; failures go to stderr.
pub struct LineSpinner {
    out: Term,
    err: Term,
    theme: TkctlTheme,
}

impl LineSpinner {
    pub fn new(message: &str, theme: TkctlTheme) -> Self {
        let mut out = Term::stdout();
        writeln!(out, "  {}", message).ok();
        Self {
            out,
            err: Term::stderr(),
            theme,
        }
    }
}

impl SpinnerHandle for LineSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_success(&mut self, msg: &str) {
        writeln!(self.out, "{}", self.theme.format_success(msg)).ok();
    }

    fn finish_error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_error(msg)).ok();
    }
}
