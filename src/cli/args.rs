//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// tkctl - Verify and upgrade a platform installation.
#[derive(Debug, Parser)]
#[command(name = "tkctl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides TKCTL_CONFIG and ~/.tkctl/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Namespace the platform is installed in
    #[arg(short, long, global = true)]
    pub namespace: Option<String>,

    /// Base URI of the API server
    #[arg(long, global = true)]
    pub api_uri: Option<String>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run diagnostic checks against the installation
    Check(CheckArgs),

    /// Upgrade the local configuration to match the server version
    Migrate(MigrateArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Output format for `check`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Box-drawn table
    #[default]
    Table,
    /// JSON report on stdout
    Json,
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Keep running after a blocker check fails
    #[arg(long)]
    pub ignore_blocker: bool,

    /// Run only the given suites (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub suite: Vec<String>,
}

/// Arguments for the `migrate` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct MigrateArgs {
    /// List applicable migrations without running them
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
