//! Client configuration.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::Error;

/// Endpoint used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000";

/// Configuration for connecting to the experts API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API base URL (e.g. `http://localhost:5000`).
    pub endpoint: String,
    /// Request timeout.
    pub timeout: Option<Duration>,
}

/// On-disk shape of a TOML config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    endpoint: Option<String>,
    timeout_secs: Option<u64>,
}

impl ClientConfig {
    /// Create a new configuration with defaults.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: None,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads:
    /// - `SHIPTALK_API_URL` (defaults to `http://localhost:5000`)
    /// - `SHIPTALK_TIMEOUT_SECS` (optional, default 30)
    pub fn from_env() -> Self {
        let endpoint =
            std::env::var("SHIPTALK_API_URL").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        let timeout = std::env::var("SHIPTALK_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs);

        Self { endpoint, timeout }
    }

    /// Parse configuration from TOML text.
    ///
    /// Recognized keys are `endpoint` and `timeout_secs`.
    pub fn from_toml_str(text: &str) -> Result<Self, Error> {
        let file: FileConfig =
            toml::from_str(text).map_err(|e| Error::Configuration(e.to_string()))?;
        Ok(Self {
            endpoint: file
                .endpoint
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            timeout: file.timeout_secs.map(Duration::from_secs),
        })
    }

    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Configuration(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Override the endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Override the timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
