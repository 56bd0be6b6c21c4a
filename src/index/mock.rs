use crate::domain::ArtifactDescriptor;
use crate::error::{AnnounceError, Result};
use crate::index::{PackageIndex, ReleaseInfo, ReleaseSummary};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory package index for tests and offline runs
pub struct MockPackageIndex {
    releases: HashMap<(String, String), ReleaseInfo>,
    requests: RefCell<Vec<(String, String)>>,
}

impl MockPackageIndex {
    /// Create a new empty mock index
    pub fn new() -> Self {
        MockPackageIndex {
            releases: HashMap::new(),
            requests: RefCell::new(Vec::new()),
        }
    }

    /// Publish a release with the given files
    pub fn add_release(&mut self, package: &str, version: &str, urls: Vec<ArtifactDescriptor>) {
        let info = ReleaseInfo {
            info: ReleaseSummary {
                name: package.to_string(),
                version: version.to_string(),
            },
            urls,
        };
        self.releases
            .insert((package.to_string(), version.to_string()), info);
    }

    /// `(package, version)` pairs requested so far, in order
    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests.borrow().clone()
    }
}

impl Default for MockPackageIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageIndex for MockPackageIndex {
    fn get_release(&self, package: &str, version: &str) -> Result<ReleaseInfo> {
        self.requests
            .borrow_mut()
            .push((package.to_string(), version.to_string()));
        self.releases
            .get(&(package.to_string(), version.to_string()))
            .cloned()
            .ok_or_else(|| AnnounceError::not_found(format!("{}=={}", package, version)))
    }
}
