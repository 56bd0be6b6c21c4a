use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{AnnounceError, Result};

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILENAME: &str = "announce.toml";

/// Represents the complete configuration for release-announcer.
///
/// Every operation receives the pieces it needs from this struct; nothing is
/// read from global state.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub release: ReleaseConfig,

    #[serde(default)]
    pub index: IndexConfig,

    #[serde(default)]
    pub forum: ForumConfig,

    #[serde(default)]
    pub matrix: MatrixConfig,
}

fn default_package_name() -> String {
    "ansible".to_string()
}

fn default_display_name() -> String {
    "Ansible community package".to_string()
}

fn default_build_data_url() -> String {
    "https://github.com/ansible-community/ansible-build-data".to_string()
}

/// What is being released and where its build data lives.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReleaseConfig {
    /// Package name on the index
    #[serde(default = "default_package_name")]
    pub package_name: String,

    /// Human-readable name used in announcement subjects
    #[serde(default = "default_display_name")]
    pub display_name: String,

    #[serde(default = "default_build_data_url")]
    pub build_data_url: String,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        ReleaseConfig {
            package_name: default_package_name(),
            display_name: default_display_name(),
            build_data_url: default_build_data_url(),
        }
    }
}

fn default_index_url() -> String {
    "https://pypi.org/pypi".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Package index endpoint settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct IndexConfig {
    /// Base of the JSON API; requests go to `{base_url}/{package}/{version}/json`
    #[serde(default = "default_index_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        IndexConfig {
            base_url: default_index_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_forum_url() -> String {
    "https://forum.ansible.com".to_string()
}

fn default_forum_category() -> String {
    "news/releases".to_string()
}

fn default_forum_tags() -> Vec<String> {
    vec![
        "release".to_string(),
        "distro-packaging".to_string(),
        "release-management".to_string(),
    ]
}

/// Where the forum announcement is posted.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ForumConfig {
    #[serde(default = "default_forum_url")]
    pub url: String,

    #[serde(default = "default_forum_category")]
    pub category: String,

    #[serde(default = "default_forum_tags")]
    pub tags: Vec<String>,
}

impl Default for ForumConfig {
    fn default() -> Self {
        ForumConfig {
            url: default_forum_url(),
            category: default_forum_category(),
            tags: default_forum_tags(),
        }
    }
}

fn default_matrix_rooms() -> Vec<String> {
    vec![
        "#community:ansible.com".to_string(),
        "#packaging:ansible.com".to_string(),
        "#social:ansible.com (mention @newsbot)".to_string(),
    ]
}

/// Rooms the operator is asked to post the matrix announcement to.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct MatrixConfig {
    #[serde(default = "default_matrix_rooms")]
    pub rooms: Vec<String>,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        MatrixConfig {
            rooms: default_matrix_rooms(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `announce.toml` in current directory
/// 3. `.announce.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let path = if let Some(path) = config_path {
        Path::new(path).to_path_buf()
    } else if Path::new(CONFIG_FILENAME).exists() {
        Path::new(CONFIG_FILENAME).to_path_buf()
    } else if let Some(config_dir) = dirs::config_dir() {
        let user_path = config_dir.join(format!(".{}", CONFIG_FILENAME));
        if user_path.exists() {
            user_path
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    tracing::debug!(path = %path.display(), "loading configuration");
    let config_str = fs::read_to_string(&path).map_err(|e| {
        AnnounceError::config(format!("cannot read {}: {}", path.display(), e))
    })?;
    parse_config(&config_str)
        .map_err(|e| AnnounceError::config(format!("{}: {}", path.display(), e)))
}

/// Parse configuration from TOML text.
pub fn parse_config(text: &str) -> std::result::Result<Config, toml::de::Error> {
    toml::from_str(text)
}
