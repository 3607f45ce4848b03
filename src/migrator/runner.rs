//! Migration registry and execution.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::version::{self, Version};

use super::migration::{Migration, MigrationKind};

/// Ordered registry of migrations.
///
/// Registration order is execution order; selection never re-sorts by
/// version.
#[derive(Default)]
pub struct Migrator {
    migrations: Vec<Box<dyn Migration>>,
}

impl Migrator {
    /// Create an empty migrator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a migration.
    pub fn register(&mut self, migration: Box<dyn Migration>) {
        self.migrations.push(migration);
    }

    /// Number of registered migrations.
    pub fn len(&self) -> usize {
        self.migrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.migrations.is_empty()
    }

    /// Migrations of the given kinds that apply to `current_version`, in
    /// registration order.
    ///
    /// # Errors
    ///
    /// Fails with `InvalidVersion` if `current_version` or the version of any
    /// considered migration does not parse. The current version is checked
    /// before any selection happens.
    pub fn select_applicable(
        &self,
        current_version: &str,
        kinds: &HashSet<MigrationKind>,
    ) -> Result<Vec<&dyn Migration>> {
        Version::parse(current_version)?;

        let mut selected = Vec::new();
        for migration in self.migrations.iter().filter(|m| kinds.contains(&m.kind())) {
            if version::is_applicable(migration.version(), current_version)? {
                selected.push(migration.as_ref());
            } else {
                debug!(
                    "Skipping migration '{}' ({}): not needed for {}",
                    migration.description(),
                    migration.version(),
                    current_version
                );
            }
        }
        Ok(selected)
    }

    /// Run every applicable migration in order.
    ///
    /// Stops at the first failure and returns its error unchanged. Migrations
    /// that already ran are not rolled back.
    pub fn run(&self, current_version: &str, kinds: &HashSet<MigrationKind>) -> Result<()> {
        self.run_with_progress(current_version, kinds, |_| {}).map(|_| ())
    }

    /// Like [`run`](Self::run), calling `on_progress` around each migration.
    ///
    /// Returns how many migrations completed.
    pub fn run_with_progress(
        &self,
        current_version: &str,
        kinds: &HashSet<MigrationKind>,
        mut on_progress: impl FnMut(MigrationProgress<'_>),
    ) -> Result<usize> {
        let selected = self.select_applicable(current_version, kinds)?;
        for (completed, migration) in selected.iter().copied().enumerate() {
            info!(
                "Running {} migration {}: {}",
                migration.kind(),
                migration.version(),
                migration.description()
            );
            on_progress(MigrationProgress::Starting(migration));
            if let Err(e) = migration.migrate() {
                warn!(
                    "Migration {} failed after {} completed",
                    migration.version(),
                    completed
                );
                return Err(e);
            }
            on_progress(MigrationProgress::Finished(migration));
        }
        Ok(selected.len())
    }
}

/// Progress events emitted while migrations run.
pub enum MigrationProgress<'a> {
    /// The migration is about to run.
    Starting(&'a dyn Migration),
    /// The migration completed successfully.
    Finished(&'a dyn Migration),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TkctlError;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    struct Recorded {
        version: String,
        description: String,
        kind: MigrationKind,
        fail: bool,
        log: Log,
    }

    impl Migration for Recorded {
        fn version(&self) -> &str {
            &self.version
        }
        fn description(&self) -> &str {
            &self.description
        }
        fn kind(&self) -> MigrationKind {
            self.kind
        }
        fn migrate(&self) -> Result<()> {
            self.log.borrow_mut().push(self.description.clone());
            if self.fail {
                return Err(TkctlError::ConfigValidationError {
                    message: format!("{} exploded", self.description),
                });
            }
            Ok(())
        }
    }

    fn unit(log: &Log, description: &str, version: &str, kind: MigrationKind) -> Box<dyn Migration> {
        Box::new(Recorded {
            version: version.to_string(),
            description: description.to_string(),
            kind,
            fail: false,
            log: Rc::clone(log),
        })
    }

    fn failing_unit(log: &Log, description: &str, version: &str) -> Box<dyn Migration> {
        Box::new(Recorded {
            version: version.to_string(),
            description: description.to_string(),
            kind: MigrationKind::Client,
            fail: true,
            log: Rc::clone(log),
        })
    }

    fn client() -> HashSet<MigrationKind> {
        [MigrationKind::Client].into_iter().collect()
    }

    fn descriptions(selected: &[&dyn Migration]) -> Vec<String> {
        selected.iter().map(|m| m.description().to_string()).collect()
    }

    #[test]
    fn new_migrator_is_empty() {
        let migrator = Migrator::new();
        assert!(migrator.is_empty());
        assert_eq!(migrator.len(), 0);
    }

    #[test]
    fn selection_preserves_registration_order() {
        let log = Log::default();
        let mut migrator = Migrator::new();
        migrator.register(unit(&log, "u-v2", "2.0.0", MigrationKind::Client));
        migrator.register(unit(&log, "u-v1", "1.0.0", MigrationKind::Client));

        let selected = migrator.select_applicable("0.9.0", &client()).unwrap();

        assert_eq!(descriptions(&selected), vec!["u-v2", "u-v1"]);
    }

    #[test]
    fn selection_applies_version_gate() {
        let log = Log::default();
        let mut migrator = Migrator::new();
        migrator.register(unit(&log, "old", "1.0.0", MigrationKind::Client));
        migrator.register(unit(&log, "same", "1.2.0", MigrationKind::Client));
        migrator.register(unit(&log, "new", "1.5.0", MigrationKind::Client));

        let selected = migrator.select_applicable("v1.2.0", &client()).unwrap();

        assert_eq!(descriptions(&selected), vec!["same", "new"]);
    }

    #[test]
    fn selection_filters_by_kind() {
        let log = Log::default();
        let mut migrator = Migrator::new();
        migrator.register(unit(&log, "client", "1.0.0", MigrationKind::Client));
        migrator.register(unit(&log, "server", "1.0.0", MigrationKind::Server));

        let server_only: HashSet<_> = [MigrationKind::Server].into_iter().collect();
        let both: HashSet<_> = [MigrationKind::Client, MigrationKind::Server]
            .into_iter()
            .collect();

        assert_eq!(
            descriptions(&migrator.select_applicable("1.0.0", &server_only).unwrap()),
            vec!["server"]
        );
        assert_eq!(
            descriptions(&migrator.select_applicable("1.0.0", &both).unwrap()),
            vec!["client", "server"]
        );
        assert!(migrator
            .select_applicable("1.0.0", &HashSet::new())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn invalid_current_version_fails_before_selection() {
        let migrator = Migrator::new();
        let err = migrator.select_applicable("", &client()).err().unwrap();
        assert!(matches!(err, TkctlError::InvalidVersion { .. }));
    }

    #[test]
    fn invalid_migration_version_is_error() {
        let log = Log::default();
        let mut migrator = Migrator::new();
        migrator.register(unit(&log, "broken", "next", MigrationKind::Client));

        assert!(migrator.select_applicable("1.0.0", &client()).is_err());
        assert!(migrator.run("1.0.0", &client()).is_err());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn run_aborts_on_first_failure() {
        let log = Log::default();
        let mut migrator = Migrator::new();
        migrator.register(unit(&log, "u1", "1.0.0", MigrationKind::Client));
        migrator.register(failing_unit(&log, "u2", "1.0.0"));
        migrator.register(unit(&log, "u3", "1.0.0", MigrationKind::Client));

        let err = migrator.run("1.0.0", &client()).unwrap_err();

        assert_eq!(err.to_string(), "Invalid configuration: u2 exploded");
        assert_eq!(*log.borrow(), vec!["u1", "u2"]);
    }

    #[test]
    fn run_succeeds_when_all_pass() {
        let log = Log::default();
        let mut migrator = Migrator::new();
        migrator.register(unit(&log, "u1", "1.0.0", MigrationKind::Client));
        migrator.register(unit(&log, "skipped", "0.1.0", MigrationKind::Client));
        migrator.register(unit(&log, "u2", "2.0.0", MigrationKind::Client));

        migrator.run("1.0.0", &client()).unwrap();

        assert_eq!(*log.borrow(), vec!["u1", "u2"]);
    }

    #[test]
    fn progress_reports_start_and_finish_until_failure() {
        let log = Log::default();
        let mut migrator = Migrator::new();
        migrator.register(unit(&log, "u1", "1.0.0", MigrationKind::Client));
        migrator.register(failing_unit(&log, "u2", "1.0.0"));

        let mut events = Vec::new();
        let result = migrator.run_with_progress("1.0.0", &client(), |event| match event {
            MigrationProgress::Starting(m) => events.push(format!("start {}", m.description())),
            MigrationProgress::Finished(m) => events.push(format!("done {}", m.description())),
        });

        assert!(result.is_err());
        assert_eq!(events, vec!["start u1", "done u1", "start u2"]);
    }

    #[test]
    fn progress_counts_completed_migrations() {
        let log = Log::default();
        let mut migrator = Migrator::new();
        migrator.register(unit(&log, "u1", "1.0.0", MigrationKind::Client));
        migrator.register(unit(&log, "u2", "1.1.0", MigrationKind::Client));

        assert_eq!(migrator.run_with_progress("1.0.0", &client(), |_| {}).unwrap(), 2);
    }

    #[test]
    fn run_with_nothing_applicable_is_ok() {
        let log = Log::default();
        let mut migrator = Migrator::new();
        migrator.register(unit(&log, "old", "0.1.0", MigrationKind::Client));

        assert!(migrator.run("3.0.0", &client()).is_ok());
        assert!(log.borrow().is_empty());
    }
}
