use crate::config::types::IntelConfig;
use crate::error::{IntelError, Result};
use std::path::Path;
use std::str::FromStr;
use tracing::info;

/// Configuration loader trait
pub trait ConfigLoader {
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<IntelConfig>;
    fn load_with_validation<P: AsRef<Path>>(path: Option<P>) -> Result<IntelConfig>;
}

/// Default configuration loader implementation
pub struct DefaultConfigLoader;

impl ConfigLoader for DefaultConfigLoader {
    /// Load configuration from a TOML file
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<IntelConfig> {
        let path_ref = path.as_ref();

        if !path_ref.exists() {
            return Err(IntelError::ConfigNotFound {
                path: path_ref.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path_ref).map_err(IntelError::Io)?;

        let config: IntelConfig = toml::from_str(&content).map_err(|e| {
            IntelError::invalid_config(format!(
                "Failed to parse TOML in {}: {}",
                path_ref.display(),
                e
            ))
        })?;

        info!(path = %path_ref.display(), "loaded configuration file");
        Ok(config)
    }

    /// Load the optional file, apply environment overrides, then validate
    fn load_with_validation<P: AsRef<Path>>(path: Option<P>) -> Result<IntelConfig> {
        Self::load_with_lookup(path, |name| std::env::var(name).ok())
    }
}

impl DefaultConfigLoader {
    /// Same as `load_with_validation`, reading overrides through `lookup`
    pub fn load_with_lookup<P, F>(path: Option<P>, lookup: F) -> Result<IntelConfig>
    where
        P: AsRef<Path>,
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => IntelConfig::default(),
        };

        config.apply_overrides_from(lookup)?;
        config.validate()?;

        Ok(config)
    }
}

impl IntelConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        DefaultConfigLoader::load_from_file(path)
    }

    /// Load, override from the environment, and validate
    pub fn load<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        DefaultConfigLoader::load_with_validation(path)
    }

    /// Apply overrides from process environment variables
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides_from(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("FALCONFEEDS_API_KEY").filter(|k| !k.is_empty()) {
            self.api.api_key = Some(key);
        }

        if let Some(timeout) = lookup("FALCONFEEDS_TIMEOUT") {
            self.api.timeout_ms = parse_override("FALCONFEEDS_TIMEOUT", &timeout)?;
        }

        if let Some(max_feeds) = lookup("FALCONFEEDS_MAX_FEEDS") {
            self.threat_intelligence.max_feeds_per_response =
                parse_override("FALCONFEEDS_MAX_FEEDS", &max_feeds)?;
        }

        if lookup("FALCONFEEDS_INCLUDE_ATTRIBUTED_FEEDS").as_deref() == Some("false") {
            self.threat_intelligence.include_attributed_feeds = false;
        }

        Ok(())
    }
}

fn parse_override<T: FromStr>(name: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        IntelError::invalid_config(format!("{} must be a number, got '{}'", name, value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("threat-intel.toml");
        fs::write(
            &path,
            r#"
[api]
base_url = "http://127.0.0.1:9000/merlin"
timeout_ms = 5000

[threat_intelligence]
max_feeds_per_response = 20
"#,
        )
        .unwrap();

        let config = IntelConfig::load_from_file(&path).unwrap();
        assert_eq!(config.api.base_url, "http://127.0.0.1:9000/merlin");
        assert_eq!(config.api.timeout_ms, 5000);
        assert_eq!(config.api.max_retries, 3);
        assert_eq!(config.threat_intelligence.max_feeds_per_response, 20);
        assert!(config.threat_intelligence.include_attributed_feeds);
    }

    #[test]
    fn test_missing_file() {
        let result = IntelConfig::load_from_file("/definitely/not/here.toml");
        assert!(matches!(result, Err(IntelError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.toml");
        fs::write(&path, "[api\nbase_url = ").unwrap();

        let result = IntelConfig::load_from_file(&path);
        assert!(matches!(result, Err(IntelError::InvalidConfig { .. })));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = IntelConfig::default();
        config
            .apply_overrides_from(lookup(&[
                ("FALCONFEEDS_API_KEY", "env-key"),
                ("FALCONFEEDS_TIMEOUT", "1500"),
                ("FALCONFEEDS_MAX_FEEDS", "5"),
                ("FALCONFEEDS_INCLUDE_ATTRIBUTED_FEEDS", "false"),
            ]))
            .unwrap();

        assert_eq!(config.api.api_key.as_deref(), Some("env-key"));
        assert_eq!(config.api.timeout_ms, 1500);
        assert_eq!(config.threat_intelligence.max_feeds_per_response, 5);
        assert!(!config.threat_intelligence.include_attributed_feeds);
    }

    #[test]
    fn test_load_applies_overrides_then_validates() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("threat-intel.toml");
        fs::write(&path, "[api]\ntimeout_ms = 5000\n").unwrap();

        let config = DefaultConfigLoader::load_with_lookup(
            Some(&path),
            lookup(&[("FALCONFEEDS_API_KEY", "env-key"), ("FALCONFEEDS_TIMEOUT", "2500")]),
        )
        .unwrap();
        assert_eq!(config.api.api_key.as_deref(), Some("env-key"));
        assert_eq!(config.api.timeout_ms, 2500);

        let result = DefaultConfigLoader::load_with_lookup(Some(&path), lookup(&[]));
        assert!(matches!(result, Err(IntelError::MissingApiKey)));
    }

    #[test]
    fn test_load_rejects_invalid_timeout_override() {
        let result = DefaultConfigLoader::load_with_lookup(
            None::<&Path>,
            lookup(&[("FALCONFEEDS_API_KEY", "env-key"), ("FALCONFEEDS_TIMEOUT", "30s")]),
        );
        assert!(matches!(result, Err(IntelError::InvalidConfig { .. })));

        let result = DefaultConfigLoader::load_with_lookup(
            None::<&Path>,
            lookup(&[("FALCONFEEDS_API_KEY", "env-key"), ("FALCONFEEDS_TIMEOUT", "0")]),
        );
        assert!(matches!(result, Err(IntelError::InvalidConfig { .. })));
    }

    #[test]
    fn test_load_missing_file() {
        let result = IntelConfig::load(Some("/definitely/not/here.toml"));
        assert!(matches!(result, Err(IntelError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_bad_numeric_override() {
        let mut config = IntelConfig::default();
        let result = config.apply_overrides_from(lookup(&[("FALCONFEEDS_TIMEOUT", "soon")]));
        assert!(matches!(result, Err(IntelError::InvalidConfig { .. })));
    }
}
