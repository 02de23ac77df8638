use crate::config::types::IntelConfig;
use crate::error::{IntelError, Result};
use crate::traits::ConfigValidator;
use std::ops::RangeInclusive;
use url::Url;

/// Accepted per-call timeout, in milliseconds
pub const TIMEOUT_RANGE_MS: RangeInclusive<u64> = 1..=300_000;

/// Accepted cap on feeds per actor profile
pub const MAX_FEEDS_RANGE: RangeInclusive<usize> = 1..=500;

/// Configuration validator implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigValidatorImpl;

impl ConfigValidator for ConfigValidatorImpl {
    type Config = IntelConfig;

    fn validate(&self, config: &IntelConfig) -> Result<()> {
        config.api.api_key()?;

        let url = Url::parse(&config.api.base_url).map_err(|e| {
            IntelError::invalid_config(format!(
                "Invalid api.base_url '{}': {}",
                config.api.base_url, e
            ))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(IntelError::invalid_config(format!(
                "api.base_url must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if !TIMEOUT_RANGE_MS.contains(&config.api.timeout_ms) {
            return Err(IntelError::invalid_config(format!(
                "api.timeout_ms must be between {} and {}, got {}",
                TIMEOUT_RANGE_MS.start(),
                TIMEOUT_RANGE_MS.end(),
                config.api.timeout_ms
            )));
        }

        let max_feeds = config.threat_intelligence.max_feeds_per_response;
        if !MAX_FEEDS_RANGE.contains(&max_feeds) {
            return Err(IntelError::invalid_config(format!(
                "threat_intelligence.max_feeds_per_response must be between {} and {}, got {}",
                MAX_FEEDS_RANGE.start(),
                MAX_FEEDS_RANGE.end(),
                max_feeds
            )));
        }

        Ok(())
    }
}

impl ConfigValidatorImpl {
    pub fn new() -> Self {
        Self
    }
}

impl IntelConfig {
    /// Validate this configuration
    pub fn validate(&self) -> Result<()> {
        ConfigValidatorImpl::new().validate(self)
    }
}
