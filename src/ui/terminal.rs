//! Console-backed [`UserInterface`].

use std::io::Write;

use console::Term;

use super::spinner::{LineSpinner, ProgressSpinner};
use super::{OutputMode, SpinnerHandle, TkctlTheme, UserInterface};

/// Writes status to stdout and errors to stderr.
///
/// Interactive instances animate spinners and may use color; the others
/// print plain lines suitable for CI logs.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: TkctlTheme,
    mode: OutputMode,
    interactive: bool,
}

impl TerminalUI {
    pub fn new(mode: OutputMode, interactive: bool) -> Self {
        let theme = if interactive {
            TkctlTheme::detect()
        } else {
            TkctlTheme::plain()
        };
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme,
            mode,
            interactive,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn theme(&self) -> &TkctlTheme {
        &self.theme
    }

    fn message(&mut self, msg: &str) {
        writeln!(self.out, "{}", msg).ok();
    }

    fn success(&mut self, msg: &str) {
        writeln!(self.out, "{}", self.theme.format_success(msg)).ok();
    }

    fn warning(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_warning(msg)).ok();
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_error(msg)).ok();
    }

    fn output(&mut self, text: &str) {
        writeln!(self.out, "{}", text).ok();
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        match (self.mode.shows_progress(), self.interactive) {
            (false, _) => Box::new(ProgressSpinner::hidden()),
            (true, true) => Box::new(ProgressSpinner::new(message, self.theme.clone())),
            (true, false) => Box::new(LineSpinner::new(message, self.theme.clone())),
        }
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_progress() {
            writeln!(self.out, "\n{}\n", self.theme.format_header(title)).ok();
        }
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

/// Create the UI for this process. Interactivity also requires a TTY.
pub fn create_ui(interactive: bool, mode: OutputMode) -> Box<dyn UserInterface> {
    let interactive = interactive && Term::stdout().is_term();
    Box::new(TerminalUI::new(mode, interactive))
}
