use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use anyhow::{Context, Result, anyhow};

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:3448";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from the default location; a missing file means defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::new());
        }

        let config_content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Config = serde_json::from_str(&config_content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Endpoint to use: `override_endpoint`, then the file's value, then the default.
    pub fn endpoint(&self, override_endpoint: Option<&str>) -> String {
        override_endpoint
            .or(self.endpoint.as_deref())
            .unwrap_or(DEFAULT_ENDPOINT)
            .to_string()
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.timeout_secs.filter(|&secs| secs > 0).map(Duration::from_secs)
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("askchat").join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = Config::load_from(&tmp.path().join("config.json")).unwrap();
        assert_eq!(config, Config::new());
        assert_eq!(config.endpoint(None), DEFAULT_ENDPOINT);
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn test_file_values_are_used() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        fs::write(&path, r#"{"endpoint":"http://10.0.0.5:8000","timeout_secs":30}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.endpoint(None), "http://10.0.0.5:8000");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_partial_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        fs::write(&path, r#"{"timeout_secs":0}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.endpoint(None), DEFAULT_ENDPOINT);
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn test_override_wins() {
        let config = Config {
            endpoint: Some("http://from-file:1".to_string()),
            timeout_secs: None,
        };
        assert_eq!(config.endpoint(Some("http://from-cli:2")), "http://from-cli:2");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse"));
    }
}
