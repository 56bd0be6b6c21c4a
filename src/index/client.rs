use std::time::Duration;

use crate::config::IndexConfig;
use crate::error::{AnnounceError, Result};
use crate::index::{PackageIndex, ReleaseInfo};

/// PyPI JSON API client using `ureq`.
pub struct PyPiClient {
    base_url: String,
    agent: ureq::Agent,
}

impl PyPiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();
        PyPiClient {
            base_url: base_url.into(),
            agent: ureq::Agent::new_with_config(config),
        }
    }

    pub fn from_config(config: &IndexConfig) -> Self {
        Self::new(
            config.base_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// URL of the release metadata document.
    ///
    /// # Examples
    ///
    /// ```
    /// use release_announcer::index::PyPiClient;
    /// use std::time::Duration;
    ///
    /// let client = PyPiClient::new("https://pypi.org/pypi/", Duration::from_secs(5));
    /// assert_eq!(
    ///     client.release_url("ansible", "9.0.0"),
    ///     "https://pypi.org/pypi/ansible/9.0.0/json"
    /// );
    /// ```
    pub fn release_url(&self, package: &str, version: &str) -> String {
        format!(
            "{}/{}/{}/json",
            self.base_url.trim_end_matches('/'),
            package,
            version
        )
    }
}

impl PackageIndex for PyPiClient {
    fn get_release(&self, package: &str, version: &str) -> Result<ReleaseInfo> {
        let url = self.release_url(package, version);
        tracing::debug!(%url, "requesting release metadata");
        let body = self
            .agent
            .get(&url)
            .call()
            .map_err(|e| map_ureq_error(package, version, &url, &e))?
            .into_body()
            .read_to_string()
            .map_err(|e| AnnounceError::http(&url, e.to_string()))?;
        serde_json::from_str(&body)
            .map_err(|e| AnnounceError::http(&url, format!("invalid release metadata: {}", e)))
    }
}

/// Map a ureq error to an [`AnnounceError`].
fn map_ureq_error(package: &str, version: &str, url: &str, err: &ureq::Error) -> AnnounceError {
    match err {
        ureq::Error::StatusCode(404) => {
            AnnounceError::not_found(format!("{}=={} is not on {}", package, version, url))
        }
        other => AnnounceError::http(url, other.to_string()),
    }
}
