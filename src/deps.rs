//! Release dependency files (`<package>-<version>.deps`)
//!
//! Each line is `name: version`. Keys starting with `_` carry release
//! metadata; every other key pins a bundled collection.
//!
//! ```text
//! _ansible_version: 9.0.0
//! _ansible_core_version: 2.16.0
//! _python: >=3.10
//! amazon.aws: 7.0.0
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::ReleaseVersion;
use crate::error::{AnnounceError, Result};

const PACKAGE_VERSION_KEY: &str = "_ansible_version";
const LEGACY_PACKAGE_VERSION_KEY: &str = "_acd_version";
const CORE_VERSION_KEY: &str = "_ansible_core_version";
const PYTHON_KEY: &str = "_python";

/// Parsed contents of a dependency file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyFileData {
    pub package_version: String,
    pub core_version: String,
    pub python_requires: Option<String>,
    pub dependencies: BTreeMap<String, String>,
}

impl DependencyFileData {
    /// Validated package version
    pub fn package_release(&self) -> Result<ReleaseVersion> {
        ReleaseVersion::parse(&self.package_version)
    }

    /// Validated core version
    pub fn core_release(&self) -> Result<ReleaseVersion> {
        ReleaseVersion::parse(&self.core_version)
    }
}

/// Default dependency file name for a release
pub fn default_deps_filename(package: &str, version: &str) -> String {
    format!("{}-{}.deps", package, version)
}

/// Path of the dependency file: an explicit name inside `data_dir`, or the default one
pub fn deps_path(data_dir: &Path, deps_file: Option<&str>, package: &str, version: &str) -> PathBuf {
    match deps_file {
        Some(name) => data_dir.join(name),
        None => data_dir.join(default_deps_filename(package, version)),
    }
}

/// Read and parse a dependency file
pub fn load_deps_file(path: &Path) -> Result<DependencyFileData> {
    let text = fs::read_to_string(path)
        .map_err(|e| AnnounceError::deps(format!("cannot read {}: {}", path.display(), e)))?;
    parse_deps(&text).map_err(|e| match e {
        AnnounceError::Deps(msg) => AnnounceError::deps(format!("{}: {}", path.display(), msg)),
        other => other,
    })
}

/// Parse dependency file text
pub fn parse_deps(text: &str) -> Result<DependencyFileData> {
    let mut package_version = None;
    let mut legacy_version = None;
    let mut core_version = None;
    let mut python_requires = None;
    let mut dependencies = BTreeMap::new();

    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (key, value) = line.split_once(':').ok_or_else(|| {
            AnnounceError::deps(format!("line {}: expected 'name: version'", lineno + 1))
        })?;
        let key = key.trim();
        let value = value.trim().to_string();

        match key {
            PACKAGE_VERSION_KEY => package_version = Some(value),
            LEGACY_PACKAGE_VERSION_KEY => legacy_version = Some(value),
            CORE_VERSION_KEY => core_version = Some(value),
            PYTHON_KEY => python_requires = Some(value),
            // Unknown metadata keys are left alone.
            k if k.starts_with('_') => {}
            k => {
                dependencies.insert(k.to_string(), value);
            }
        }
    }

    let package_version = package_version.or(legacy_version).ok_or_else(|| {
        AnnounceError::deps(format!("missing {} entry", PACKAGE_VERSION_KEY))
    })?;
    let core_version = core_version
        .ok_or_else(|| AnnounceError::deps(format!("missing {} entry", CORE_VERSION_KEY)))?;

    Ok(DependencyFileData {
        package_version,
        core_version,
        python_requires,
        dependencies,
    })
}
