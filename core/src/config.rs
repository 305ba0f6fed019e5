use crate::errors::{RelayError, RelayResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;
pub const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 60;
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const ASSISTANT_ID_VAR: &str = "OPENAI_ASSISTANT_ID";
pub const BASE_URL_VAR: &str = "OPENAI_BASE_URL";

/// Configuration for the assistant relay
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct RelayConfig {
    pub api_key: Option<String>,
    pub assistant_id: Option<String>,
    pub base_url: Option<String>,
    pub poll_interval_ms: Option<u64>,
    pub max_poll_attempts: Option<u32>,
    pub listen_addr: Option<String>,
}

/// Validated credentials needed to talk to the assistant service
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub assistant_id: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("assistant_id", &self.assistant_id)
            .finish()
    }
}

impl RelayConfig {
    /// Loads configuration from a file if it exists, otherwise returns the default config
    pub fn load_from_file(path: &Path) -> RelayResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            RelayError::InvalidConfig(format!("Failed to read config file: {}", e))
        })?;

        toml::from_str(&content).map_err(|e| {
            RelayError::InvalidConfig(format!("Failed to parse config file: {}", e))
        })
    }

    /// Reads the relay variables from the process environment, after loading
    /// a `.env` file from the working directory if there is one
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        Self {
            api_key: non_empty(API_KEY_VAR),
            assistant_id: non_empty(ASSISTANT_ID_VAR),
            base_url: non_empty(BASE_URL_VAR),
            ..Self::default()
        }
    }

    /// Merges this config with another config, preferring values from the other config if present
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            api_key: other.api_key.clone().or_else(|| self.api_key.clone()),
            assistant_id: other
                .assistant_id
                .clone()
                .or_else(|| self.assistant_id.clone()),
            base_url: other.base_url.clone().or_else(|| self.base_url.clone()),
            poll_interval_ms: other.poll_interval_ms.or(self.poll_interval_ms),
            max_poll_attempts: other.max_poll_attempts.or(self.max_poll_attempts),
            listen_addr: other
                .listen_addr
                .clone()
                .or_else(|| self.listen_addr.clone()),
        }
    }

    /// Returns the credentials, or the error for the first missing one
    pub fn require_credentials(&self) -> RelayResult<Credentials> {
        let api_key = present(&self.api_key).ok_or(RelayError::NotConfigured(API_KEY_VAR))?;
        let assistant_id =
            present(&self.assistant_id).ok_or(RelayError::NotConfigured(ASSISTANT_ID_VAR))?;

        Ok(Credentials {
            api_key,
            assistant_id,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.unwrap_or(DEFAULT_POLL_INTERVAL_MS))
    }

    pub fn max_poll_attempts(&self) -> u32 {
        self.max_poll_attempts.unwrap_or(DEFAULT_MAX_POLL_ATTEMPTS)
    }

    pub fn listen_addr(&self) -> &str {
        self.listen_addr.as_deref().unwrap_or(DEFAULT_LISTEN_ADDR)
    }
}

fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Helper function to get default config directory
pub fn get_default_config_dir(app_name: &str) -> RelayResult<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        RelayError::InvalidConfig("Could not determine home directory".to_string())
    })?;

    Ok(home_dir.join(".config").join(app_name))
}

/// Helper function to get default config file path
pub fn get_default_config_file(app_name: &str) -> RelayResult<PathBuf> {
    let config_dir = get_default_config_dir(app_name)?;
    Ok(config_dir.join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = RelayConfig::default();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.poll_interval(), Duration::from_secs(1));
        assert_eq!(config.max_poll_attempts(), 60);
        assert_eq!(config.listen_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = RelayConfig::load_from_file(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, RelayConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "assistant_id = \"asst_file\"\nbase_url = \"http://localhost:9000/v1/\"\nmax_poll_attempts = 5\n",
        )
        .unwrap();

        let config = RelayConfig::load_from_file(&path).unwrap();
        assert_eq!(config.assistant_id.as_deref(), Some("asst_file"));
        assert_eq!(config.base_url(), "http://localhost:9000/v1");
        assert_eq!(config.max_poll_attempts(), 5);
        assert_eq!(config.api_key, None);
    }

    #[test]
    fn test_invalid_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "max_poll_attempts = \"many\"").unwrap();

        let err = RelayConfig::load_from_file(&path).unwrap_err();
        assert!(matches!(err, RelayError::InvalidConfig(_)));
    }

    #[test]
    fn test_from_lookup_ignores_blank_values() {
        let vars: HashMap<&str, &str> =
            HashMap::from([(API_KEY_VAR, "sk-test"), (ASSISTANT_ID_VAR, "  ")]);
        let config = RelayConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.assistant_id, None);
    }

    #[test]
    fn test_merge_prefers_other() {
        let file = RelayConfig {
            api_key: Some("sk-file".to_string()),
            assistant_id: Some("asst_file".to_string()),
            max_poll_attempts: Some(10),
            ..RelayConfig::default()
        };
        let env = RelayConfig {
            api_key: Some("sk-env".to_string()),
            ..RelayConfig::default()
        };

        let merged = file.merge(&env);
        assert_eq!(merged.api_key.as_deref(), Some("sk-env"));
        assert_eq!(merged.assistant_id.as_deref(), Some("asst_file"));
        assert_eq!(merged.max_poll_attempts(), 10);
    }

    #[test]
    fn test_require_credentials_reports_key_first() {
        let err = RelayConfig::default().require_credentials().unwrap_err();
        assert_eq!(err.to_string(), "OPENAI_API_KEY is not configured");

        let config = RelayConfig {
            api_key: Some("sk-test".to_string()),
            ..RelayConfig::default()
        };
        let err = config.require_credentials().unwrap_err();
        assert_eq!(err.to_string(), "OPENAI_ASSISTANT_ID is not configured");
    }

    #[test]
    fn test_credentials_debug_hides_key() {
        let config = RelayConfig {
            api_key: Some("sk-secret".to_string()),
            assistant_id: Some("asst_1".to_string()),
            ..RelayConfig::default()
        };
        let credentials = config.require_credentials().unwrap();
        let debug = format!("{:?}", credentials);
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("asst_1"));
    }
}
