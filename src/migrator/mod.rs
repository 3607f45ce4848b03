//! Versioned migrations.
//!
//! A [`Migrator`] holds [`Migration`]s in registration order. Given the
//! version a server reports and the [`MigrationKind`]s to consider, it selects
//! the migrations the version gate marks applicable and runs them in order,
//! aborting on the first failure.
//!
//! - [`migration`] - The `Migration` trait and kinds
//! - [`runner`] - Registry, selection and execution
//! - [`client`] - Built-in config file migrations

pub mod client;
pub mod migration;
pub mod runner;

pub use client::{builtin_migrations, RemoveKey, RenameKey};
pub use migration::{Migration, MigrationKind};
pub use runner::{MigrationProgress, Migrator};
