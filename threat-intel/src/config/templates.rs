use crate::error::{IntelError, Result};
use std::fs;
use std::path::Path;

/// File name looked up when no `--config` path is given
pub const DEFAULT_CONFIG_FILE: &str = "threat-intel.toml";

/// Generate default threat-intel.toml template
pub fn generate_default_config_template() -> String {
    r#"# Threat intelligence client configuration
# Every value below is optional; the defaults are shown.

[api]
# Base URL of the FalconFeeds API, including the /merlin prefix
base_url = "https://api.falconfeeds.io/merlin"
# Per-request timeout in milliseconds (1 - 300000)
timeout_ms = 30000
# Advertised only; requests are never retried
max_retries = 3
# Prefer the FALCONFEEDS_API_KEY environment variable over storing the key here
# api_key = "your-api-key"

[threat_intelligence]
# Include attributed threat feeds in threat actor profiles
include_attributed_feeds = true
# Maximum feeds embedded in a single actor profile (1 - 500)
max_feeds_per_response = 50

[logging]
# tracing filter directive; RUST_LOG takes precedence when set
level = "info"
"#
    .to_string()
}

/// Write the default config to `config_path` if it is missing (or always, when `force` is set).
/// Returns whether a file was written.
pub fn ensure_config_file_exists<P: AsRef<Path>>(config_path: P, force: bool) -> Result<bool> {
    let path = config_path.as_ref();

    if path.exists() && !force {
        return Ok(false);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(IntelError::Io)?;
    }

    fs::write(path, generate_default_config_template()).map_err(IntelError::Io)?;
    Ok(true)
}
