//! The `announcements.json` record shared by the generate and send steps
//!
//! The send step may run long after generation, on another machine, so
//! everything it needs has to be in this file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::domain::context::AnnouncementContext;
use crate::error::{AnnounceError, Result};

/// File name of the manifest inside an announcements directory
pub const MANIFEST_FILENAME: &str = "announcements.json";

/// Context and output file names of one generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnouncementManifest {
    pub template_vars: AnnouncementContext,
    pub outputs: Vec<String>,
}

impl AnnouncementManifest {
    pub fn new(template_vars: AnnouncementContext, outputs: Vec<String>) -> Self {
        AnnouncementManifest {
            template_vars,
            outputs,
        }
    }

    /// Path of the manifest inside `directory`
    pub fn path_in(directory: &Path) -> PathBuf {
        directory.join(MANIFEST_FILENAME)
    }

    /// Serialize as 2-space indented JSON, overwriting `path`
    pub fn write(&self, path: &Path) -> Result<()> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        fs::write(path, json)?;
        Ok(())
    }

    /// Read a manifest written by [`AnnouncementManifest::write`]
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => AnnounceError::ManifestNotFound {
                path: path.to_path_buf(),
            },
            _ => AnnounceError::Io(e),
        })?;
        serde_json::from_str(&data).map_err(|e| AnnounceError::ManifestParse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}
