//! tkctl - Verify and upgrade a platform installation.
//!
//! tkctl runs ordered suites of diagnostic checks against a Kubernetes
//! installation and upgrades local configuration through versioned
//! migrations gated on the version the API server reports.
//!
//! # Modules
//!
//! - [`api`] - REST API client
//! - [`checker`] - Check suites and the halting check engine
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, parsing, and validation
//! - [`error`] - Error types and result aliases
//! - [`kube`] - Kubernetes and Helm access
//! - [`migrator`] - Versioned migrations
//! - [`shell`] - Subprocess execution
//! - [`ui`] - Spinners, tables, and terminal output
//! - [`version`] - Semantic versions and the migration version gate
//!
//! # Example
//!
//! ```
//! use tkctl::version::is_applicable;
//!
//! // A migration for 1.2.0 applies to servers at or below 1.2.0
//! assert!(is_applicable("1.2.0", "v1.1.0").unwrap());
//! assert!(!is_applicable("1.2.0", "1.3.0").unwrap());
//! ```

pub mod api;
pub mod checker;
pub mod cli;
pub mod config;
pub mod error;
pub mod kube;
pub mod migrator;
pub mod shell;
pub mod ui;
pub mod version;

pub use error::{Result, TkctlError};
