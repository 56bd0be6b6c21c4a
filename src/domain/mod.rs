//! Domain types - pure release data independent of network and filesystem access

pub mod artifact;
pub mod context;
pub mod manifest;
pub mod prerelease;
pub mod version;

pub use artifact::{ArtifactDescriptor, ArtifactKind, ArtifactPair, Digests};
pub use context::AnnouncementContext;
pub use manifest::{AnnouncementManifest, MANIFEST_FILENAME};
pub use prerelease::{PreRelease, PreReleaseKind};
pub use version::ReleaseVersion;
