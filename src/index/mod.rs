//! Package index access
//!
//! [`PackageIndex`] abstracts the index so the announcement pipeline can be
//! exercised without network access; [`PyPiClient`] talks to the real JSON
//! API and [`MockPackageIndex`] serves canned releases.

pub mod client;
pub mod mock;

use serde::Deserialize;

use crate::domain::{ArtifactDescriptor, ArtifactKind, ArtifactPair};
use crate::error::{AnnounceError, Result};

pub use client::PyPiClient;
pub use mock::MockPackageIndex;

/// Summary block of a release response
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReleaseSummary {
    pub name: String,
    pub version: String,
}

/// Metadata of a single release, as returned by `/{package}/{version}/json`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReleaseInfo {
    pub info: ReleaseSummary,
    #[serde(default)]
    pub urls: Vec<ArtifactDescriptor>,
}

impl ReleaseInfo {
    /// Select the single sdist and the single wheel of this release.
    ///
    /// Fails when either kind is missing or listed more than once.
    pub fn sdist_and_wheel(&self) -> Result<ArtifactPair> {
        Ok(ArtifactPair {
            sdist: self.only(ArtifactKind::Sdist)?,
            wheel: self.only(ArtifactKind::Wheel)?,
        })
    }

    fn only(&self, kind: ArtifactKind) -> Result<ArtifactDescriptor> {
        let mut found = self.urls.iter().filter(|a| a.kind() == Some(kind));
        match (found.next(), found.next()) {
            (Some(artifact), None) => Ok(artifact.clone()),
            (None, _) => Err(AnnounceError::ambiguous(format!(
                "no {} found for {}=={}",
                kind, self.info.name, self.info.version
            ))),
            (Some(_), Some(_)) => {
                let count = self.urls.iter().filter(|a| a.kind() == Some(kind)).count();
                Err(AnnounceError::ambiguous(format!(
                    "expected exactly one {} for {}=={}, found {}",
                    kind, self.info.name, self.info.version, count
                )))
            }
        }
    }
}

/// Read access to a package index.
pub trait PackageIndex {
    /// Fetch release metadata for `package` at `version`.
    ///
    /// # Errors
    /// `NotFound` if the index has no such release, `Http` for any other
    /// transport or status failure. Nothing is retried.
    fn get_release(&self, package: &str, version: &str) -> Result<ReleaseInfo>;
}

/// Fetch the sdist and wheel descriptors of a release.
pub fn fetch(index: &dyn PackageIndex, package: &str, version: &str) -> Result<ArtifactPair> {
    tracing::info!(package, version, "fetching release metadata");
    let release = index.get_release(package, version)?;
    let pair = release.sdist_and_wheel()?;
    tracing::debug!(
        sdist = %pair.sdist.filename,
        wheel = %pair.wheel.filename,
        "selected release artifacts"
    );
    Ok(pair)
}
