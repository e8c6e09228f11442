use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Base URL used when neither the config file nor the environment sets one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Remote API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the farm API (scheme + host + port), without `/api`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Total timeout for one request, including reading the body (default: 30).
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u32,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
}

/// Where the persisted session lives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for persisted state. Defaults to the platform data dir.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_request_timeout() -> u32 {
    30
}

fn default_connect_timeout() -> u32 {
    5
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_seconds: default_request_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl StorageConfig {
    /// Resolved storage directory.
    ///
    /// Uses `~/.local/share/agrisync` (or the platform equivalent via
    /// `dirs::data_dir()`), falling back to `./.agrisync`.
    pub fn resolved_dir(&self) -> PathBuf {
        if let Some(dir) = &self.dir {
            return dir.clone();
        }
        match dirs::data_dir() {
            Some(data_dir) => data_dir.join("agrisync"),
            None => PathBuf::from(".agrisync"),
        }
    }
}
