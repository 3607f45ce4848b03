//! Command-line interface for tkctl.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{CheckArgs, Cli, Commands, CompletionsArgs, MigrateArgs, OutputFormat};
pub use commands::{Command, CommandDispatcher, CommandResult, ConfigOverrides};
