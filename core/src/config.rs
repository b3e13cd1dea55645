//! Configuration Management Module
//!
//! Loads `AuditorConfig` from a TOML file and applies environment variable
//! overrides on top. The credential is carried as a plain value and handed
//! to the gateway at construction; nothing here is global.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::llm::adapters::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};

pub const ENV_CONFIG_PATH: &str = "AUDITOR_CONFIG";
pub const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_API_KEY: &str = "AUDITOR_API_KEY";
pub const ENV_PROVIDER: &str = "AUDITOR_PROVIDER";
pub const ENV_MODEL: &str = "AUDITOR_MODEL";
pub const ENV_BASE_URL: &str = "AUDITOR_BASE_URL";
pub const ENV_HOST: &str = "AUDITOR_HOST";
pub const ENV_PORT: &str = "AUDITOR_PORT";
pub const ENV_LOG_LEVEL: &str = "AUDITOR_LOG_LEVEL";

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Model provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    Gemini,
    Stub,
}

impl FromStr for Provider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" => Ok(Provider::Gemini),
            "stub" => Ok(Provider::Stub),
            _ => Err(ConfigError::InvalidValue {
                key: "llm.provider".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Gemini => write!(f, "gemini"),
            Provider::Stub => write!(f, "stub"),
        }
    }
}

/// Generative endpoint settings
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub provider: Provider,
    pub base_url: String,
    pub model: String,
    /// Literal key, or `env:NAME` to read it from the environment
    pub api_key: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: Provider::Gemini,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
        }
    }
}

// Hand-written so the key never lands in a log line.
impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .finish()
    }
}

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Browser origins allowed to call the API; empty disables CORS
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditorConfig {
    pub llm: LlmConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

impl AuditorConfig {
    /// Load configuration from file and process environment
    ///
    /// File resolution order:
    /// 1. `explicit` path (must exist)
    /// 2. `AUDITOR_CONFIG` environment variable (must exist)
    /// 3. `<config_dir>/auditor/config.toml` if present
    /// 4. built-in defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let env_path = std::env::var(ENV_CONFIG_PATH).ok().map(PathBuf::from);

        let mut config = match explicit.map(Path::to_path_buf).or(env_path) {
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => {
                    debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_overrides_from(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Default config location under the user's config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("auditor").join("config.toml"))
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_toml_str(&content).map_err(|e| match e {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })?;

        info!(path = %path.display(), "Loaded configuration from file");
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            message: e.to_string(),
        })
    }

    /// Apply overrides using `lookup` as the environment
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(provider) = lookup(ENV_PROVIDER) {
            self.llm.provider = provider.parse()?;
            debug!("Applied env override for provider");
        }

        if let Some(model) = lookup(ENV_MODEL) {
            self.llm.model = model;
            debug!("Applied env override for model");
        }

        if let Some(base_url) = lookup(ENV_BASE_URL) {
            self.llm.base_url = base_url;
            debug!("Applied env override for base URL");
        }

        // AUDITOR_API_KEY wins over the provider-native variable
        if let Some(key) = lookup(ENV_API_KEY).or_else(|| lookup(ENV_GEMINI_API_KEY)) {
            self.llm.api_key = Some(key);
            debug!("Applied env override for API key");
        }

        let referenced = self
            .llm
            .api_key
            .as_deref()
            .and_then(|key| key.strip_prefix("env:"))
            .map(|name| lookup(name));
        if let Some(resolved) = referenced {
            self.llm.api_key = resolved;
        }

        if let Some(host) = lookup(ENV_HOST) {
            self.server.host = host;
        }

        if let Some(port) = lookup(ENV_PORT) {
            self.server.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_PORT.to_string(),
                value: port.clone(),
            })?;
        }

        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = level;
        }

        Ok(())
    }

    /// Validate the configuration
    ///
    /// A missing credential is not an error here; the gateway reports it
    /// per request.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.llm.model.trim().is_empty() {
            return Err(ConfigError::Invalid("llm.model is empty".to_string()));
        }
        if self.llm.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("llm.base_url is empty".to_string()));
        }
        Ok(())
    }

    /// Effective credential: present and non-blank
    pub fn api_key(&self) -> Option<&str> {
        self.llm
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
    }
}
