//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::PathBuf;

use crate::cli::args::{Cli, Commands};
use crate::config::{load_config, resolve_config_path, validate, Config};
use crate::error::Result;
use crate::ui::UserInterface;

use super::check::CheckCommand;
use super::completions::CompletionsCommand;
use super::migrate::MigrateCommand;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command, reporting through `ui`.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Command-line overrides layered on top of the loaded config.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_path: Option<PathBuf>,
    pub namespace: Option<String>,
    pub api_uri: Option<String>,
}

impl ConfigOverrides {
    /// Collect the global config flags from parsed arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            config_path: cli.config.clone(),
            namespace: cli.namespace.clone(),
            api_uri: cli.api_uri.clone(),
        }
    }

    /// Load the config file, apply flag overrides, and validate the result.
    pub fn load(&self) -> Result<Config> {
        let mut config = load_config(self.config_path.as_deref())?;
        if let Some(namespace) = &self.namespace {
            config.namespace = namespace.clone();
        }
        if let Some(api_uri) = &self.api_uri {
            config.api_uri = api_uri.clone();
        }
        validate(&config)?;
        tracing::debug!(
            "Using namespace {} and API server {}",
            config.namespace,
            config.api_uri
        );
        Ok(config)
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    overrides: ConfigOverrides,
}

impl CommandDispatcher {
    /// Create a dispatcher with the given config overrides.
    pub fn new(overrides: ConfigOverrides) -> Self {
        Self { overrides }
    }

    pub fn overrides(&self) -> &ConfigOverrides {
        &self.overrides
    }

    /// Dispatch and execute a command.
    ///
    /// Config is only loaded for commands that talk to the installation.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Commands::Check(args) => {
                let config = self.overrides.load()?;
                let cmd = CheckCommand::new(&config, args.clone())?;
                cmd.execute(ui)
            }
            Commands::Migrate(args) => {
                let config = self.overrides.load()?;
                let config_path = resolve_config_path(self.overrides.config_path.as_deref());
                let cmd = MigrateCommand::new(&config, config_path, args.clone())?;
                cmd.execute(ui)
            }
            Commands::Completions(args) => {
                let cmd = CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
        }
    }
}
