//! Client configuration
//!
//! A [`Config`] names the Cloud Controller to talk to and how. Build one with
//! [`ConfigBuilder`], which layers sources in priority order (lowest first):
//!
//! 1. Defaults
//! 2. Config file (`<config_dir>/ccapi/client.toml`, or an explicit path)
//! 3. Environment variables (`CCAPI_HOST`, `CCAPI_SKIP_VERIFY_SSL`, `TRACE`)
//! 4. Explicit setters
//!
//! The request pipeline only ever reads the built `Config`; it never consults
//! the environment on its own.

use ccapi_core::{CcError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const HOST_ENV_VAR: &str = "CCAPI_HOST";
pub const SKIP_VERIFY_SSL_ENV_VAR: &str = "CCAPI_SKIP_VERIFY_SSL";
pub const TRACE_ENV_VAR: &str = "TRACE";

/// Connection settings shared by every service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Base URL of the Cloud Controller, e.g. `https://api.example.com`
    pub host: String,

    /// Accept any TLS certificate
    pub skip_verify_ssl: bool,

    /// Echo every request and response to standard output
    pub trace: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "http://localhost:8181".to_string(),
            skip_verify_ssl: false,
            trace: false,
        }
    }
}

impl Config {
    /// Configuration pointing at `host` with every other field defaulted
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Default::default()
        }
    }

    /// Parse a TOML document
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| CcError::configuration(format!("Invalid client config: {}", e)))
    }

    /// Read a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CcError::configuration(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Default config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("ccapi").join("client.toml"))
    }

    /// Create a new builder for constructing configuration
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }
}

/// Builder for [`Config`] with validation and priority chain support.
///
/// Values set earlier win: apply the highest-priority source first, or use
/// [`ConfigBuilder::from_sources`] for the standard chain.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    host: Option<String>,
    skip_verify_ssl: Option<bool>,
    trace: Option<bool>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Environment, then the default config file, then defaults
    pub fn from_sources() -> Result<Self> {
        Self::new().with_env_overrides().with_default_config_file()
    }

    /// Set the host (with validation)
    pub fn with_host(mut self, host: impl Into<String>) -> Result<Self> {
        let host = host.into();
        Self::validate_host(&host)?;
        self.host = Some(host);
        Ok(self)
    }

    pub fn with_skip_verify_ssl(mut self, skip: bool) -> Self {
        self.skip_verify_ssl = Some(skip);
        self
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = Some(trace);
        self
    }

    /// Fill unset values from a config file; a missing file is an error
    pub fn with_config_file(self, path: &Path) -> Result<Self> {
        let config = Config::load(path)?;
        debug!("Loaded client config from {}", path.display());
        Ok(self.fill_from(config))
    }

    /// Fill unset values from the default config file, if it exists
    pub fn with_default_config_file(self) -> Result<Self> {
        match Config::default_path() {
            Some(path) if path.exists() => self.with_config_file(&path),
            _ => Ok(self),
        }
    }

    /// Fill unset values from `CCAPI_HOST`, `CCAPI_SKIP_VERIFY_SSL` and `TRACE`
    pub fn with_env_overrides(mut self) -> Self {
        if self.host.is_none() {
            if let Ok(host) = std::env::var(HOST_ENV_VAR) {
                if Self::validate_host(&host).is_ok() {
                    self.host = Some(host);
                }
            }
        }

        if self.skip_verify_ssl.is_none() {
            if let Ok(skip) = std::env::var(SKIP_VERIFY_SSL_ENV_VAR) {
                self.skip_verify_ssl = Some(skip.to_lowercase() == "true" || skip == "1");
            }
        }

        if self.trace.is_none() {
            if let Ok(trace) = std::env::var(TRACE_ENV_VAR) {
                self.trace = Some(!trace.is_empty());
            }
        }

        self
    }

    /// Build the final configuration with validation
    pub fn build(self) -> Result<Config> {
        let defaults = Config::default();
        let host = self.host.unwrap_or(defaults.host);
        Self::validate_host(&host)?;

        Ok(Config {
            host,
            skip_verify_ssl: self.skip_verify_ssl.unwrap_or(defaults.skip_verify_ssl),
            trace: self.trace.unwrap_or(defaults.trace),
        })
    }

    fn fill_from(self, config: Config) -> Self {
        Self {
            host: self.host.or(Some(config.host)),
            skip_verify_ssl: self.skip_verify_ssl.or(Some(config.skip_verify_ssl)),
            trace: self.trace.or(Some(config.trace)),
        }
    }

    fn validate_host(host: &str) -> Result<()> {
        if host.is_empty() {
            return Err(CcError::configuration("Host cannot be empty"));
        }

        if !host.starts_with("http://") && !host.starts_with("https://") {
            return Err(CcError::configuration(format!(
                "Host must start with http:// or https://, got '{}'",
                host
            )));
        }

        Ok(())
    }
}
