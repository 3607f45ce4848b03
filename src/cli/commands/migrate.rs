//! The `tkctl migrate` command.

use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

use crate::api::ApiClient;
use crate::cli::args::MigrateArgs;
use crate::config::Config;
use crate::error::Result;
use crate::migrator::{builtin_migrations, MigrationKind, MigrationProgress, Migrator};
use crate::ui::{SpinnerHandle, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The migrate command implementation.
///
/// Only the [`MigrationKind::Client`] pool is selected. The built-in units all
/// rewrite the local config file; server-side units are left to the server.
pub struct MigrateCommand {
    api: ApiClient,
    migrator: Migrator,
    args: MigrateArgs,
}

impl MigrateCommand {
    /// Create a migrate command for the config file at `config_path`.
    ///
    /// Without a config path there is nothing on disk to migrate.
    pub fn new(config: &Config, config_path: Option<PathBuf>, args: MigrateArgs) -> Result<Self> {
        let api = ApiClient::new(&config.api_uri, Duration::from_secs(config.timeout_secs))?;
        let migrator = match config_path {
            Some(path) => builtin_migrations(&path),
            None => {
                tracing::debug!("No config location resolved, no client migrations registered");
                Migrator::new()
            }
        };
        Ok(Self::with_parts(api, migrator, args))
    }

    /// Create a migrate command over an explicit client and migrator.
    pub fn with_parts(api: ApiClient, migrator: Migrator, args: MigrateArgs) -> Self {
        Self {
            api,
            migrator,
            args,
        }
    }

    fn kinds() -> HashSet<MigrationKind> {
        [MigrationKind::Client].into_iter().collect()
    }

    fn fetch_server_version(&self, ui: &mut dyn UserInterface) -> Result<String> {
        let mut spinner = ui.start_spinner("Fetching server version");
        match self.api.server_info() {
            Ok(info) => {
                spinner.finish_success(&format!("Server version {}", info.version));
                Ok(info.version)
            }
            Err(e) => {
                spinner.finish_error("Could not fetch server version");
                Err(e)
            }
        }
    }
}

impl Command for MigrateCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let version = self.fetch_server_version(ui)?;
        let kinds = Self::kinds();

        let applicable = self.migrator.select_applicable(&version, &kinds)?;
        if applicable.is_empty() {
            ui.success("No migrations available");
            return Ok(CommandResult::success());
        }

        if self.args.dry_run {
            ui.message(&format!("{} migrations would run:", applicable.len()));
            for migration in &applicable {
                ui.message(&format!(
                    "  {} {}",
                    migration.version(),
                    migration.description()
                ));
            }
            return Ok(CommandResult::success());
        }

        let mut current: Option<Box<dyn SpinnerHandle>> = None;
        let outcome = self
            .migrator
            .run_with_progress(&version, &kinds, |event| match event {
                MigrationProgress::Starting(migration) => {
                    current = Some(ui.start_spinner(migration.description()));
                }
                MigrationProgress::Finished(migration) => {
                    if let Some(mut spinner) = current.take() {
                        spinner.finish_success(&format!(
                            "{} ({})",
                            migration.description(),
                            migration.version()
                        ));
                    }
                }
            });

        match outcome {
            Ok(count) => {
                ui.success(&format!("Applied {} migrations", count));
                Ok(CommandResult::success())
            }
            Err(e) => {
                if let Some(mut spinner) = current.take() {
                    spinner.finish_error("Migration failed");
                }
                ui.error(&format!("Migration failed: {}", e));
                Ok(CommandResult::failure(1))
            }
        }
    }
}
