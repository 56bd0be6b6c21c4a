use serde::{Deserialize, Serialize};
use std::fmt;

/// Digests published alongside a distribution file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Digests {
    pub sha256: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub md5: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blake2b_256: Option<String>,
}

/// One distributable file of a release, as listed by the package index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactDescriptor {
    pub filename: String,
    pub url: String,
    pub packagetype: String,
    pub size: u64,
    pub digests: Digests,
}

/// Distribution formats the announcement cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// Source archive
    Sdist,
    /// Built wheel
    Wheel,
}

impl ArtifactKind {
    /// The index's `packagetype` value for this kind
    pub fn packagetype(&self) -> &'static str {
        match self {
            ArtifactKind::Sdist => "sdist",
            ArtifactKind::Wheel => "bdist_wheel",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Sdist => write!(f, "sdist"),
            ArtifactKind::Wheel => write!(f, "wheel"),
        }
    }
}

impl ArtifactDescriptor {
    /// Classify this file; other formats (eggs, exe installers) yield `None`
    pub fn kind(&self) -> Option<ArtifactKind> {
        match self.packagetype.as_str() {
            "sdist" => Some(ArtifactKind::Sdist),
            "bdist_wheel" => Some(ArtifactKind::Wheel),
            _ => None,
        }
    }
}

/// The source archive and wheel of a single release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPair {
    pub sdist: ArtifactDescriptor,
    pub wheel: ArtifactDescriptor,
}

impl ArtifactPair {
    /// Artifacts in declared order: sdist first, then wheel
    pub fn iter(&self) -> impl Iterator<Item = &ArtifactDescriptor> {
        [&self.sdist, &self.wheel].into_iter()
    }
}
