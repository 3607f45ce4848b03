//! Migration units.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Which side of the system a migration updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MigrationKind {
    /// Local CLI state, such as the config file.
    Client,
    /// Server-side resources.
    Server,
}

impl FromStr for MigrationKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "client" => Ok(Self::Client),
            "server" => Ok(Self::Server),
            _ => Err(format!("unknown migration kind: {}", s)),
        }
    }
}

impl fmt::Display for MigrationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Client => write!(f, "client"),
            Self::Server => write!(f, "server"),
        }
    }
}

/// A version-tagged migration step.
///
/// Implementations should be safe to run more than once; the runner never
/// rolls back.
pub trait Migration {
    /// Semantic version this migration is tagged with.
    fn version(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> &str;

    /// Pool this migration belongs to.
    fn kind(&self) -> MigrationKind;

    /// Apply the migration.
    fn migrate(&self) -> Result<()>;
}
