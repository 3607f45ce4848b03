//! Terminal output for tkctl commands.
//!
//! Commands talk to a [`UserInterface`] so they can be driven by a real
//! terminal ([`TerminalUI`]) or recorded for assertions ([`MockUI`]).
//! Status lines respect the [`OutputMode`]; [`UserInterface::output`] is
//! reserved for machine-readable results and always reaches stdout.
//!
//! # Example
//!
//! ```
//! use tkctl::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! let mut spinner = ui.start_spinner("Running cluster checks");
//! spinner.finish_success("cluster checks passed");
//!
//! assert_eq!(ui.spinners(), vec!["Running cluster checks"]);
//! assert_eq!(ui.spinner_results(), vec![(true, "cluster checks passed".to_string())]);
//! ```

pub mod mock;
pub mod output;
pub mod spinner;
pub mod table;
pub mod terminal;
pub mod theme;

pub use mock::{MockUI, UiEvent};
pub use output::OutputMode;
pub use spinner::{LineSpinner, ProgressSpinner};
pub use table::Table;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, TkctlTheme};

/// Output sink used by every command.
pub trait UserInterface {
    fn output_mode(&self) -> OutputMode;

    /// Styles in effect, for callers that color their own cells.
    fn theme(&self) -> &TkctlTheme;

    /// Plain status text (tables, listings).
    fn message(&mut self, msg: &str);

    fn success(&mut self, msg: &str);

    fn warning(&mut self, msg: &str);

    /// Errors always go to stderr, whatever the mode.
    fn error(&mut self, msg: &str);

    /// Machine-readable output, written to stdout regardless of mode.
    fn output(&mut self, text: &str);

    /// Start a spinner; hidden when the mode does not show progress.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    fn show_header(&mut self, title: &str);

    fn is_interactive(&self) -> bool;
}

/// A running progress indicator.
pub trait SpinnerHandle {
    fn set_message(&mut self, msg: &str);

    fn finish_success(&mut self, msg: &str);

    fn finish_error(&mut self, msg: &str);
}
