//! Configuration for the issue service client.
//!
//! Configuration is stored in `.argus/config.yaml` and includes:
//! - The base URL of the issue-tracking service
//! - Request timeout and default page size
//!
//! The base URL is resolved once at startup and injected into the gateway;
//! `ARGUS_BASE_URL` overrides the file value.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ArgusError, Result};

pub const CONFIG_DIR: &str = ".argus";

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PAGE_SIZE: u32 = 10;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the issue-tracking service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Default page size for list requests
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            page_size: default_page_size(),
        }
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> PathBuf {
        PathBuf::from(CONFIG_DIR).join("config.yaml")
    }

    /// Load configuration from the default path, or return defaults if the
    /// file does not exist. The `ARGUS_BASE_URL` environment variable takes
    /// precedence over the file value.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific path (used by tests).
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = fs::read_to_string(path)?;
            serde_yaml_ng::from_str(&content)?
        } else {
            Config::default()
        };

        if let Ok(base_url) = env::var("ARGUS_BASE_URL")
            && !base_url.is_empty()
        {
            config.base_url = base_url;
        }

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Parsed base URL. Trailing slashes are trimmed so path joins stay
    /// predictable.
    pub fn base_url(&self) -> Result<Url> {
        Url::parse(self.base_url.trim_end_matches('/'))
            .map_err(|e| ArgusError::Config(format!("invalid base_url '{}': {}", self.base_url, e)))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn validate(&self) -> Result<()> {
        self.base_url()?;
        if self.page_size == 0 {
            return Err(ArgusError::Config(
                "page_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
