use crate::error::{Result, ResultExt};
use std::path::{Path, PathBuf};
use threat_intel::{IntelConfig, DEFAULT_CONFIG_FILE};

/// The explicit `--config` path, else the default file when it exists
pub fn resolve_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit.or_else(|| {
        let default = Path::new(DEFAULT_CONFIG_FILE);
        default.exists().then(|| default.to_path_buf())
    })
}

/// File (if any), environment overrides and validation, for commands that reach the API
pub fn load(explicit: Option<PathBuf>) -> Result<IntelConfig> {
    IntelConfig::load(resolve_path(explicit)).with_context(|| "Failed to load configuration")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use threat_intel::IntelError;

    #[test]
    fn test_explicit_path_wins() {
        let path = PathBuf::from("/tmp/elsewhere.toml");
        assert_eq!(resolve_path(Some(path.clone())), Some(path));
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = load(Some(PathBuf::from("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(
            err,
            CliError::WithContext(_, ref inner)
                if matches!(**inner, CliError::Intel(IntelError::ConfigNotFound { .. }))
        ));
    }
}
