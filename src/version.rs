//! Semantic versions and the migration version gate.
//!
//! [`Version`] implements `MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]` parsing and
//! ordering. [`is_applicable`] decides whether a migration tagged with one
//! version should run against a server reporting another.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, TkctlError};

/// Regex for a semantic version with the leading `v` already stripped.
static SEMVER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(0|[1-9]\d*)\.(0|[1-9]\d*)\.(0|[1-9]\d*)(?:-([0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*))?(?:\+([0-9A-Za-z-]+(?:\.[0-9A-Za-z-]+)*))?$",
    )
    .expect("SEMVER_REGEX must compile")
});

/// A single dot-separated pre-release identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    /// All-digit identifier, compared numerically.
    Numeric(u64),
    /// Identifier containing letters or hyphens, compared lexically.
    AlphaNumeric(String),
}

impl Ord for Identifier {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Numeric(a), Self::Numeric(b)) => a.cmp(b),
            (Self::AlphaNumeric(a), Self::AlphaNumeric(b)) => a.cmp(b),
            (Self::Numeric(_), Self::AlphaNumeric(_)) => Ordering::Less,
            (Self::AlphaNumeric(_), Self::Numeric(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for Identifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(n) => write!(f, "{}", n),
            Self::AlphaNumeric(s) => write!(f, "{}", s),
        }
    }
}

/// A parsed semantic version.
///
/// Build metadata is accepted but dropped, so `1.0.0+abc == 1.0.0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre: Vec<Identifier>,
}

impl Version {
    /// Parse a version string, accepting one optional leading `v`.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(invalid(input, "version is empty"));
        }
        let stripped = trimmed.strip_prefix('v').unwrap_or(trimmed);

        let caps = SEMVER_REGEX
            .captures(stripped)
            .ok_or_else(|| invalid(input, "expected MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]"))?;

        let number = |idx: usize| -> Result<u64> {
            caps[idx]
                .parse::<u64>()
                .map_err(|e| invalid(input, &e.to_string()))
        };

        let pre = match caps.get(4) {
            Some(m) => m
                .as_str()
                .split('.')
                .map(|part| parse_identifier(input, part))
                .collect::<Result<Vec<_>>>()?,
            None => Vec::new(),
        };

        Ok(Self {
            major: number(1)?,
            minor: number(2)?,
            patch: number(3)?,
            pre,
        })
    }

    /// Whether this version carries a pre-release suffix.
    pub fn is_prerelease(&self) -> bool {
        !self.pre.is_empty()
    }
}

fn parse_identifier(input: &str, part: &str) -> Result<Identifier> {
    if part.chars().all(|c| c.is_ascii_digit()) {
        part.parse::<u64>()
            .map(Identifier::Numeric)
            .map_err(|e| invalid(input, &e.to_string()))
    } else {
        Ok(Identifier::AlphaNumeric(part.to_string()))
    }
}

fn invalid(version: &str, message: &str) -> TkctlError {
    TkctlError::InvalidVersion {
        version: version.to_string(),
        message: message.to_string(),
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.patch.cmp(&other.patch))
            .then_with(|| match (self.pre.is_empty(), other.pre.is_empty()) {
                (true, true) => Ordering::Equal,
                // A release outranks any of its pre-releases
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => self.pre.cmp(&other.pre),
            })
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for Version {
    type Err = TkctlError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.pre.is_empty() {
            let pre: Vec<String> = self.pre.iter().map(|p| p.to_string()).collect();
            write!(f, "-{}", pre.join("."))?;
        }
        Ok(())
    }
}

/// Decide whether a unit tagged `unit_version` applies to `current_version`.
///
/// A unit applies when `current <= unit`: its version is the upper bound of
/// the server versions that still need it.
///
/// # Errors
///
/// Returns [`TkctlError::InvalidVersion`] if either string is empty or does
/// not parse.
pub fn is_applicable(unit_version: &str, current_version: &str) -> Result<bool> {
    let unit = Version::parse(unit_version)?;
    let current = Version::parse(current_version)?;
    Ok(current <= unit)
}
