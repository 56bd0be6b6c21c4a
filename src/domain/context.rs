use serde::{Deserialize, Serialize};

use crate::domain::artifact::{ArtifactDescriptor, ArtifactPair};
use crate::domain::version::ReleaseVersion;

/// Variables available to announcement templates
///
/// Field names are part of the manifest format and of every template, so
/// renaming one is a breaking change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnouncementContext {
    pub version: String,
    pub major_version: u64,
    pub core_version: String,
    pub core_major_version: String,
    pub build_data_path: String,
    pub release_tarball: ArtifactDescriptor,
    pub release_wheel: ArtifactDescriptor,
    pub is_major_release: bool,
    pub is_prerelease: bool,
    pub end_of_life: bool,
}

impl AnnouncementContext {
    /// Derive the template variables for a release. No I/O.
    pub fn build(
        version: &ReleaseVersion,
        core_version: &ReleaseVersion,
        artifacts: ArtifactPair,
        end_of_life: bool,
        build_data_url: &str,
    ) -> Self {
        let major_version = version.major();
        let build_data_path = format!(
            "{}/blob/{}/{}",
            build_data_url.trim_end_matches('/'),
            version,
            major_version
        );

        AnnouncementContext {
            version: version.to_string(),
            major_version,
            core_version: core_version.to_string(),
            core_major_version: core_version.major_minor(),
            build_data_path,
            release_tarball: artifacts.sdist,
            release_wheel: artifacts.wheel,
            is_major_release: version.is_major_release(),
            is_prerelease: version.is_prerelease(),
            end_of_life,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::artifact::fixtures;

    const BUILD_DATA: &str = "https://github.com/ansible-community/ansible-build-data";

    fn build(version: &str, core: &str, eol: bool) -> AnnouncementContext {
        AnnouncementContext::build(
            &ReleaseVersion::parse(version).unwrap(),
            &ReleaseVersion::parse(core).unwrap(),
            fixtures::pair(version),
            eol,
            BUILD_DATA,
        )
    }

    #[test]
    fn test_build_stable_release() {
        let ctx = build("2.16.0", "2.16.1", false);
        assert_eq!(ctx.version, "2.16.0");
        assert_eq!(ctx.major_version, 2);
        assert_eq!(ctx.core_version, "2.16.1");
        assert_eq!(ctx.core_major_version, "2.16");
        assert!(!ctx.is_prerelease);
        assert!(!ctx.is_major_release);
        assert!(!ctx.end_of_life);
    }

    #[test]
    fn test_build_prerelease() {
        let ctx = build("2.16.0rc1", "2.16.0", false);
        assert!(ctx.is_prerelease);
        assert_eq!(ctx.major_version, 2);
    }

    #[test]
    fn test_build_major_release() {
        let ctx = build("9.0.0", "2.16.0", false);
        assert!(ctx.is_major_release);
        assert_eq!(ctx.core_major_version, "2.16");
    }

    #[test]
    fn test_build_data_path() {
        let ctx = build("9.3.0", "2.16.4", true);
        assert_eq!(
            ctx.build_data_path,
            "https://github.com/ansible-community/ansible-build-data/blob/9.3.0/9"
        );
        assert!(ctx.end_of_life);
    }

    #[test]
    fn test_build_data_path_trailing_slash() {
        let ctx = AnnouncementContext::build(
            &ReleaseVersion::parse("8.1.0").unwrap(),
            &ReleaseVersion::parse("2.15.1").unwrap(),
            fixtures::pair("8.1.0"),
            false,
            "https://example.test/data/",
        );
        assert_eq!(ctx.build_data_path, "https://example.test/data/blob/8.1.0/8");
    }

    #[test]
    fn test_build_is_pure() {
        let first = build("10.0.0a1", "2.17.0b1", true);
        let second = build("10.0.0a1", "2.17.0b1", true);
        assert_eq!(first, second);
    }

    #[test]
    fn test_artifacts_are_carried_through() {
        let ctx = build("9.0.1", "2.16.1", false);
        assert_eq!(ctx.release_tarball.filename, "ansible-9.0.1.tar.gz");
        assert_eq!(ctx.release_wheel.packagetype, "bdist_wheel");
    }
}
