//! Pre-release segments of a release version
//!
//! Accepts the spellings package indexes publish (`a`, `alpha`, `b`, `beta`,
//! `c`, `rc`, `pre`, `preview`) and normalises them to `a`, `b` and `rc`.

use crate::error::{AnnounceError, Result};
use std::fmt;
use std::str::FromStr;

/// Pre-release phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PreReleaseKind {
    /// Alpha pre-release
    Alpha,
    /// Beta pre-release
    Beta,
    /// Release candidate
    ReleaseCandidate,
}

impl FromStr for PreReleaseKind {
    type Err = AnnounceError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "a" | "alpha" => Ok(PreReleaseKind::Alpha),
            "b" | "beta" => Ok(PreReleaseKind::Beta),
            "c" | "rc" | "pre" | "preview" => Ok(PreReleaseKind::ReleaseCandidate),
            _ => Err(AnnounceError::version(format!(
                "Invalid pre-release identifier: '{}'",
                s
            ))),
        }
    }
}

impl fmt::Display for PreReleaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreReleaseKind::Alpha => write!(f, "a"),
            PreReleaseKind::Beta => write!(f, "b"),
            PreReleaseKind::ReleaseCandidate => write!(f, "rc"),
        }
    }
}

/// Pre-release segment with its iteration number
///
/// # Examples
/// - "a1" -> PreRelease { kind: Alpha, number: 1 }
/// - "rc" -> PreRelease { kind: ReleaseCandidate, number: 0 }
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PreRelease {
    pub kind: PreReleaseKind,
    pub number: u64,
}

impl PreRelease {
    pub fn new(kind: PreReleaseKind, number: u64) -> Self {
        PreRelease { kind, number }
    }

    /// Build a pre-release from the identifier and the (possibly empty)
    /// number captured from a version string. A missing number means 0.
    pub(crate) fn from_parts(identifier: &str, number: &str) -> Result<Self> {
        let kind = identifier.parse()?;
        let number = if number.is_empty() {
            0
        } else {
            number.parse::<u64>().map_err(|_| {
                AnnounceError::version(format!("Invalid pre-release number: {}", number))
            })?
        };
        Ok(PreRelease { kind, number })
    }
}

impl fmt::Display for PreRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind, self.number)
    }
}
