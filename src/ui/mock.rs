//! Recording [`UserInterface`] for tests.
//!
//! Every call, including spinner finishes, is appended to one ordered event
//! log so tests can assert on sequencing as well as content.

use std::cell::RefCell;
use std::rc::Rc;

use super::{OutputMode, SpinnerHandle, TkctlTheme, UserInterface};

/// One recorded UI interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Message(String),
    Success(String),
    Warning(String),
    Error(String),
    Output(String),
    Header(String),
    SpinnerStarted(String),
    SpinnerFinished { success: bool, message: String },
}

type EventLog = Rc<RefCell<Vec<UiEvent>>>;

/// A UI that records instead of printing.
#[derive(Debug)]
pub struct MockUI {
    mode: OutputMode,
    theme: TkctlTheme,
    events: EventLog,
}

impl Default for MockUI {
    fn default() -> Self {
        Self::with_mode(OutputMode::Normal)
    }
}

impl MockUI {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            theme: TkctlTheme::plain(),
            events: EventLog::default(),
        }
    }

    /// Every recorded event, in order.
    pub fn events(&self) -> Vec<UiEvent> {
        self.events.borrow().clone()
    }

    fn collect(&self, pick: impl Fn(&UiEvent) -> Option<&String>) -> Vec<String> {
        self.events.borrow().iter().filter_map(|e| pick(e).cloned()).collect()
    }

    pub fn messages(&self) -> Vec<String> {
        self.collect(|e| match e {
            UiEvent::Message(m) => Some(m),
            _ => None,
        })
    }

    pub fn successes(&self) -> Vec<String> {
        self.collect(|e| match e {
            UiEvent::Success(m) => Some(m),
            _ => None,
        })
    }

    pub fn warnings(&self) -> Vec<String> {
        self.collect(|e| match e {
            UiEvent::Warning(m) => Some(m),
            _ => None,
        })
    }

    pub fn errors(&self) -> Vec<String> {
        self.collect(|e| match e {
            UiEvent::Error(m) => Some(m),
            _ => None,
        })
    }

    pub fn outputs(&self) -> Vec<String> {
        self.collect(|e| match e {
            UiEvent::Output(m) => Some(m),
            _ => None,
        })
    }

    pub fn headers(&self) -> Vec<String> {
        self.collect(|e| match e {
            UiEvent::Header(m) => Some(m),
            _ => None,
        })
    }

    /// Messages spinners were started with.
    pub fn spinners(&self) -> Vec<String> {
        self.collect(|e| match e {
            UiEvent::SpinnerStarted(m) => Some(m),
            _ => None,
        })
    }

    /// `(succeeded, message)` for every finished spinner.
    pub fn spinner_results(&self) -> Vec<(bool, String)> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                UiEvent::SpinnerFinished { success, message } => Some((*success, message.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn has_message(&self, needle: &str) -> bool {
        self.messages().iter().any(|m| m.contains(needle))
    }

    pub fn has_success(&self, needle: &str) -> bool {
        self.successes().iter().any(|m| m.contains(needle))
    }

    pub fn has_warning(&self, needle: &str) -> bool {
        self.warnings().iter().any(|m| m.contains(needle))
    }

    pub fn has_error(&self, needle: &str) -> bool {
        self.errors().iter().any(|m| m.contains(needle))
    }

    fn record(&self, event: UiEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn theme(&self) -> &TkctlTheme {
        &self.theme
    }

    fn message(&mut self, msg: &str) {
        self.record(UiEvent::Message(msg.to_string()));
    }

    fn success(&mut self, msg: &str) {
        self.record(UiEvent::Success(msg.to_string()));
    }

    fn warning(&mut self, msg: &str) {
        self.record(UiEvent::Warning(msg.to_string()));
    }

    fn error(&mut self, msg: &str) {
        self.record(UiEvent::Error(msg.to_string()));
    }

    fn output(&mut self, text: &str) {
        self.record(UiEvent::Output(text.to_string()));
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.record(UiEvent::SpinnerStarted(message.to_string()));
        Box::new(MockSpinner {
            events: Rc::clone(&self.events),
        })
    }

    fn show_header(&mut self, title: &str) {
        self.record(UiEvent::Header(title.to_string()));
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

struct MockSpinner {
    events: EventLog,
}

impl MockSpinner {
    fn finish(&self, success: bool, msg: &str) {
        self.events.borrow_mut().push(UiEvent::SpinnerFinished {
            success,
            message: msg.to_string(),
        });
    }
}

impl SpinnerHandle for MockSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_success(&mut self, msg: &str) {
        self.finish(true, msg);
    }

    fn finish_error(&mut self, msg: &str) {
        self.finish(false, msg);
    }
}
