use crate::endpoints::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS};
use crate::error::{IntelError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Process-wide configuration, read once at startup and never mutated afterwards
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct IntelConfig {
    /// API connection settings
    pub api: ApiConfig,
    /// Tool behaviour settings
    pub threat_intelligence: ThreatIntelligenceConfig,
    /// Log filter settings
    pub logging: LoggingConfig,
}

/// API connection settings
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL including the `/merlin` prefix
    pub base_url: String,
    /// Per-call timeout in milliseconds
    pub timeout_ms: u64,
    /// Advertised retry budget. The client warns when it is non-zero and still
    /// surfaces every failure on the first attempt.
    pub max_retries: u32,
    /// Bearer token; usually supplied through FALCONFEEDS_API_KEY
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// Tool behaviour settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ThreatIntelligenceConfig {
    /// Whether actor profiles include attributed threat feeds by default
    pub include_attributed_feeds: bool,
    /// Cap on feeds embedded in a single actor profile
    pub max_feeds_per_response: usize,
}

/// Log filter settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `info` or `threat_intel=debug`
    pub level: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_retries: 3,
            api_key: None,
        }
    }
}

impl Default for ThreatIntelligenceConfig {
    fn default() -> Self {
        Self {
            include_attributed_feeds: true,
            max_feeds_per_response: 50,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("timeout_ms", &self.timeout_ms)
            .field("max_retries", &self.max_retries)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// The configured bearer token
    pub fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(IntelError::MissingApiKey)
    }
}

impl IntelConfig {
    /// Defaults with the given API key, convenient for tests and embedding
    pub fn with_api_key<S: Into<String>>(api_key: S) -> Self {
        let mut config = Self::default();
        config.api.api_key = Some(api_key.into());
        config
    }

    /// Override the API base URL
    #[must_use]
    pub fn base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.api.base_url = base_url.into();
        self
    }

    /// Override the per-call timeout
    #[must_use]
    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.api.timeout_ms = timeout_ms;
        self
    }
}
