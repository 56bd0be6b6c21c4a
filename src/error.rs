use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for release-announcer operations
#[derive(Error, Debug)]
pub enum AnnounceError {
    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Release not found: {0}")]
    NotFound(String),

    #[error("Request failed for {url}: {reason}")]
    Http { url: String, reason: String },

    #[error("Ambiguous artifacts: {0}")]
    AmbiguousArtifact(String),

    #[error("{filename} was not found in --dist-dir")]
    MissingFile { filename: String },

    #[error("{} differs from {url}", path.display())]
    VerificationMismatch { path: PathBuf, url: String },

    #[error("Announcement manifest not found: {}", path.display())]
    ManifestNotFound { path: PathBuf },

    #[error("Announcement manifest {} is invalid: {reason}", path.display())]
    ManifestParse { path: PathBuf, reason: String },

    #[error("Template error: {0}")]
    Template(String),

    #[error("Dependency file error: {0}")]
    Deps(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Delivery action failed: {0}")]
    Action(String),

    /// The operator aborted an interactive prompt.
    #[error("Cancelled by user")]
    Cancelled,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results in release-announcer
pub type Result<T> = std::result::Result<T, AnnounceError>;

impl AnnounceError {
    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        AnnounceError::Version(msg.into())
    }

    /// Create a not-found error for a package release
    pub fn not_found(msg: impl Into<String>) -> Self {
        AnnounceError::NotFound(msg.into())
    }

    /// Create an HTTP error for a request URL
    pub fn http(url: impl Into<String>, reason: impl Into<String>) -> Self {
        AnnounceError::Http {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create an ambiguous artifact error with context
    pub fn ambiguous(msg: impl Into<String>) -> Self {
        AnnounceError::AmbiguousArtifact(msg.into())
    }

    /// Create a template error with context
    pub fn template(msg: impl Into<String>) -> Self {
        AnnounceError::Template(msg.into())
    }

    /// Create a dependency file error with context
    pub fn deps(msg: impl Into<String>) -> Self {
        AnnounceError::Deps(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        AnnounceError::Config(msg.into())
    }

    /// Create a delivery action error with context
    pub fn action(msg: impl Into<String>) -> Self {
        AnnounceError::Action(msg.into())
    }

    /// Whether this error is an operator cancellation rather than a failure
    pub fn is_cancelled(&self) -> bool {
        matches!(self, AnnounceError::Cancelled)
    }
}

impl From<minijinja::Error> for AnnounceError {
    fn from(err: minijinja::Error) -> Self {
        AnnounceError::Template(err.to_string())
    }
}
