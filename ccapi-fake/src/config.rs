//! Fake server configuration
//!
//! Read from an optional TOML file:
//!
//! ```toml
//! bind = "127.0.0.1"
//! port = 8181
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable naming the config file when `--config` is absent
pub const CONFIG_ENV_VAR: &str = "CCAPI_FAKE_CONFIG";

/// Listener settings for the standalone fake server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    pub bind: String,
    /// Listen port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 8181,
        }
    }
}

impl ServerConfig {
    /// Parse ServerConfig from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load from `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(
                "Config file {} not found, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("Invalid config in {}", path.display()))
    }

    /// Config path from the CLI flag, else the environment, if any
    pub fn resolve_path(flag: Option<PathBuf>) -> Option<PathBuf> {
        flag.or_else(|| std::env::var(CONFIG_ENV_VAR).ok().map(PathBuf::from))
    }

    /// `bind:port` socket address string
    pub fn address(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}
