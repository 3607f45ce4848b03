//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait and is routed by
//! [`CommandDispatcher`], which also owns the shared config loading.

pub mod check;
pub mod completions;
pub mod dispatcher;
pub mod migrate;

pub use dispatcher::{Command, CommandDispatcher, CommandResult, ConfigOverrides};
