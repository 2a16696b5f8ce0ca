//! Client configuration
//!
//! Resolved in layers: built-in defaults, then an optional JSON file, then
//! environment variables.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::search::Marker;

/// Spaceflight News API v4 root, trailing slash included
pub const DEFAULT_API_URL: &str = "https://api.spaceflightnewsapi.net/v4/";
/// Quiet period between the last keystroke and a search
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_ERROR_MESSAGE: &str = "Could not load articles. Please try again later.";

pub const ENV_API_URL: &str = "ARTICLES_API_URL";
pub const ENV_DEBOUNCE_MS: &str = "ARTICLES_DEBOUNCE_MS";
pub const ENV_TIMEOUT_MS: &str = "ARTICLES_TIMEOUT_MS";

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_url: String,
    pub debounce: Duration,
    pub request_timeout: Duration,
    /// Shown to the user when a list fetch fails
    pub error_message: String,
    pub marker: Marker,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            request_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            error_message: DEFAULT_ERROR_MESSAGE.to_string(),
            marker: Marker::default(),
        }
    }
}

/// On-disk form; every field is optional and overrides the default
#[derive(Debug, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct ConfigFile {
    api_url: Option<String>,
    debounce_ms: Option<u64>,
    request_timeout_ms: Option<u64>,
    error_message: Option<String>,
    marker: Option<Marker>,
}

impl ClientConfig {
    /// Defaults, then the optional file, then the process environment
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(path) = path {
            config.apply_file(path)?;
        }
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    fn apply_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let file: ConfigFile = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;

        if let Some(url) = file.api_url {
            self.api_url = normalize_api_url(url);
        }
        if let Some(ms) = file.debounce_ms {
            self.debounce = Duration::from_millis(ms);
        }
        if let Some(ms) = file.request_timeout_ms {
            self.request_timeout = Duration::from_millis(ms);
        }
        if let Some(message) = file.error_message {
            self.error_message = message;
        }
        if let Some(marker) = file.marker {
            self.marker = marker;
        }
        Ok(())
    }

    /// Apply overrides from a variable lookup (the real environment in `load`)
    fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            self.api_url = normalize_api_url(url);
        }
        if let Some(value) = lookup(ENV_DEBOUNCE_MS) {
            self.debounce = Duration::from_millis(parse_millis(ENV_DEBOUNCE_MS, &value)?);
        }
        if let Some(value) = lookup(ENV_TIMEOUT_MS) {
            self.request_timeout = Duration::from_millis(parse_millis(ENV_TIMEOUT_MS, &value)?);
        }
        Ok(())
    }
}

fn parse_millis(key: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}

/// Endpoint paths are appended directly, so the root must end with '/'
fn normalize_api_url(url: String) -> String {
    if url.ends_with('/') {
        url
    } else {
        format!("{}/", url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Config file removed when the handle drops, even if the test panics
    fn temp_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.debounce, Duration::from_millis(300));
        assert!(config.api_url.ends_with('/'));
        assert_eq!(config.marker.open, "<mark>");
    }

    #[test]
    fn test_file_overrides() {
        let file = temp_config(
            r#"{"apiUrl": "http://localhost:8000/v4", "debounceMs": 50, "marker": {"open": "[", "close": "]"}}"#,
        );
        let mut config = ClientConfig::default();
        config.apply_file(file.path()).unwrap();

        assert_eq!(config.api_url, "http://localhost:8000/v4/");
        assert_eq!(config.debounce, Duration::from_millis(50));
        assert_eq!(config.marker.close, "]");
        assert_eq!(config.request_timeout, Duration::from_millis(DEFAULT_TIMEOUT_MS));
    }

    #[test]
    fn test_malformed_file() {
        let file = temp_config("{ not json");
        let mut config = ClientConfig::default();
        let err = config.apply_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_missing_file() {
        let mut config = ClientConfig::default();
        let err = config
            .apply_file(Path::new("/nonexistent/article-finder.json"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> =
            HashMap::from([(ENV_DEBOUNCE_MS, "120"), (ENV_API_URL, "http://mirror")]);
        let mut config = ClientConfig::default();
        config
            .apply_env(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.debounce, Duration::from_millis(120));
        assert_eq!(config.api_url, "http://mirror/");
    }

    #[test]
    fn test_env_invalid_number() {
        let mut config = ClientConfig::default();
        let err = config
            .apply_env(|key| (key == ENV_TIMEOUT_MS).then(|| "soon".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: ENV_TIMEOUT_MS, .. }));
    }
}
