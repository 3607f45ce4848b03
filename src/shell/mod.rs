//! External command execution and environment detection.

pub mod command;
pub mod platform;

pub use command::{display_command, execute, execute_checked, CommandOptions, CommandResult};
pub use platform::is_ci;
