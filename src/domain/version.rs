use crate::domain::prerelease::PreRelease;
use crate::error::{AnnounceError, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// `N[.N[.N]]` release segment, then optional pre, post and dev segments.
const VERSION_PATTERN: &str = r"(?i)^v?(\d+)(?:\.(\d+))?(?:\.(\d+))?(?:[-_.]?(alpha|beta|preview|pre|rc|a|b|c)[-_.]?(\d*))?(?:[-_.]?post[-_.]?(\d+))?(?:[-_.]?dev[-_.]?(\d*))?$";

fn version_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(VERSION_PATTERN).expect("version pattern is valid"))
}

/// A validated release version
///
/// Keeps the string it was parsed from, minus any leading `v`, so templates
/// and URLs see exactly what the package index publishes. Components missing
/// from the string (e.g. the micro part of "2.16") read as 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseVersion {
    raw: String,
    major: u64,
    minor: u64,
    micro: u64,
    pre: Option<PreRelease>,
    post: Option<u64>,
    dev: Option<u64>,
}

impl ReleaseVersion {
    /// Parse a version string (e.g., "2.16.0", "9.0.0rc1", "10.1.0.post1")
    pub fn parse(version: &str) -> Result<Self> {
        let raw = version.trim();
        let caps = version_regex().captures(raw).ok_or_else(|| {
            AnnounceError::version(format!(
                "Invalid version '{}' - expected X.Y.Z with an optional pre-release",
                version
            ))
        })?;

        let number = |idx: usize, what: &str| -> Result<Option<u64>> {
            caps.get(idx)
                .map(|m| {
                    m.as_str().parse::<u64>().map_err(|_| {
                        AnnounceError::version(format!("Invalid {} version: {}", what, m.as_str()))
                    })
                })
                .transpose()
        };

        let major = number(1, "major")?.unwrap_or(0);
        let minor = number(2, "minor")?.unwrap_or(0);
        let micro = number(3, "micro")?.unwrap_or(0);
        let pre = match caps.get(4) {
            Some(identifier) => Some(PreRelease::from_parts(
                identifier.as_str(),
                caps.get(5).map_or("", |m| m.as_str()),
            )?),
            None => None,
        };
        let post = number(6, "post-release")?;
        let dev = match caps.get(7) {
            Some(m) if m.as_str().is_empty() => Some(0),
            Some(_) => number(7, "dev-release")?,
            None => None,
        };

        let raw = raw.strip_prefix(['v', 'V']).unwrap_or(raw);

        Ok(ReleaseVersion {
            raw: raw.to_string(),
            major,
            minor,
            micro,
            pre,
            post,
            dev,
        })
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn micro(&self) -> u64 {
        self.micro
    }

    pub fn pre(&self) -> Option<PreRelease> {
        self.pre
    }

    pub fn post(&self) -> Option<u64> {
        self.post
    }

    pub fn dev(&self) -> Option<u64> {
        self.dev
    }

    /// True only for alpha, beta and rc releases; dev and post releases are not pre-releases.
    pub fn is_prerelease(&self) -> bool {
        self.pre.is_some()
    }

    /// First release of a major train (X.0.0, including its pre-releases)
    pub fn is_major_release(&self) -> bool {
        self.minor == 0 && self.micro == 0
    }

    /// "major.minor", as used for release-train names like "2.16"
    pub fn major_minor(&self) -> String {
        format!("{}.{}", self.major, self.minor)
    }

    /// The string this version was parsed from, without a `v` prefix
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl FromStr for ReleaseVersion {
    type Err = AnnounceError;

    fn from_str(s: &str) -> Result<Self> {
        ReleaseVersion::parse(s)
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
