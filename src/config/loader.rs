use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::types::{ApiConfig, Config, BASE_URL_ENV};

const APP_DIR: &str = "schoolhub";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl ConfigError {
    fn invalid(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }
}

impl Config {
    /// `<config_dir>/schoolhub/config.toml`, or `./schoolhub/config.toml`
    /// when the platform has no config directory.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join(CONFIG_FILE)
    }

    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Parse and validate `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Config file absent; using defaults");
                return Ok(Config::default());
            }
            Err(source) => {
                return Err(ConfigError::ReadError {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config: Config = toml::from_str(&raw).map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;

        tracing::debug!(path = %path.display(), base_url = %config.api.base_url, "Config loaded");
        Ok(config)
    }

    /// Apply the `SCHOOLHUB_API_URL` override and validate the result.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_base_url_override(std::env::var(BASE_URL_ENV).ok())
    }

    /// Replace the base URL with a non-blank `value`, then validate.
    pub fn with_base_url_override(mut self, value: Option<String>) -> Result<Self, ConfigError> {
        self.api.base_url = self.api.resolve_with(value);
        self.validate()?;
        Ok(self)
    }

    /// Reject settings the client cannot run with: a base URL that is not
    /// absolute http(s), or a zero timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_api(&self.api)
    }
}

fn validate_api(api: &ApiConfig) -> Result<(), ConfigError> {
    let scheme_ok = reqwest::Url::parse(&api.base_url)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false);
    if !scheme_ok {
        return Err(ConfigError::invalid(format!(
            "api.base_url '{}' is not an http(s) URL",
            api.base_url
        )));
    }

    if api.timeout_seconds == 0 || api.connect_timeout_seconds == 0 {
        return Err(ConfigError::invalid("api timeouts must be greater than zero"));
    }
    Ok(())
}
