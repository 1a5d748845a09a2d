//! Configuration loading, validation, and management for CampusChat.
//!
//! Loads configuration from `~/.campuschat/config.toml` with environment
//! variable overrides. Validates all settings at startup. The Gemini API key
//! has no built-in default: commands that talk to the model call
//! [`AppConfig::require_api_key`] and refuse to start without one.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variables consulted for the API key, highest priority first.
pub const API_KEY_ENV_VARS: [&str; 2] = ["CAMPUSCHAT_API_KEY", "GEMINI_API_KEY"];

/// The root configuration structure.
///
/// Maps directly to `~/.campuschat/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Remote model configuration
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Fallback prompt configuration
    #[serde(default)]
    pub fallback: FallbackConfig,
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Origins allowed by CORS. Empty = any origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

// Bind on all interfaces so phones and emulators on the same network can reach it.
fn default_host() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    5000
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origins: vec![],
        }
    }
}

impl GatewayConfig {
    /// `host:port` socket address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Upper bound for a single generation call
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".into()
}
fn default_model() -> String {
    "gemini-2.0-flash".into()
}
fn default_timeout_secs() -> u64 {
    30
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: default_api_url(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &redact(&self.api_key))
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackConfig {
    /// Institution the model is told it speaks for
    #[serde(default = "default_institution")]
    pub institution: String,

    /// Short name used when asking for official links
    #[serde(default = "default_short_name")]
    pub short_name: String,

    /// The only language the model may answer in
    #[serde(default = "default_language")]
    pub language: String,

    /// Languages the answer must not mix in
    #[serde(default = "default_excluded_languages")]
    pub excluded_languages: Vec<String>,
}

fn default_institution() -> String {
    "CSVTU (Chhattisgarh Swami Vivekanand Technical University)".into()
}
fn default_short_name() -> String {
    "CSVTU".into()
}
fn default_language() -> String {
    "English".into()
}
fn default_excluded_languages() -> Vec<String> {
    vec!["Hindi".into(), "Hinglish".into()]
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            institution: default_institution(),
            short_name: default_short_name(),
            language: default_language(),
            excluded_languages: default_excluded_languages(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.campuschat/config.toml),
    /// then apply environment overrides:
    /// - `CAMPUSCHAT_API_KEY`, then `GEMINI_API_KEY` (only if no key in the file)
    /// - `CAMPUSCHAT_MODEL`
    /// - `CAMPUSCHAT_HOST`, `CAMPUSCHAT_PORT`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides using the given variable lookup.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.gemini.api_key.is_none() {
            self.gemini.api_key = API_KEY_ENV_VARS
                .iter()
                .filter_map(|var| lookup(*var))
                .find(|v| !v.trim().is_empty());
        }

        if let Some(model) = lookup("CAMPUSCHAT_MODEL") {
            self.gemini.model = model;
        }

        if let Some(host) = lookup("CAMPUSCHAT_HOST") {
            self.gateway.host = host;
        }

        if let Some(port) = lookup("CAMPUSCHAT_PORT") {
            self.gateway.port = port.parse().map_err(|_| {
                ConfigError::ValidationError(format!("CAMPUSCHAT_PORT is not a valid port: {port}"))
            })?;
        }

        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".campuschat")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.gemini.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "gemini.timeout_secs must be greater than 0".into(),
            ));
        }

        if self.gemini.model.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "gemini.model must not be empty".into(),
            ));
        }

        if !self.gemini.api_url.starts_with("http://") && !self.gemini.api_url.starts_with("https://")
        {
            return Err(ConfigError::ValidationError(format!(
                "gemini.api_url must be an http(s) URL, got '{}'",
                self.gemini.api_url
            )));
        }

        if self.fallback.language.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "fallback.language must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// The configured API key, or `MissingApiKey` if none was provided.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        match self.gemini.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(ConfigError::MissingApiKey),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    #[error(
        "No Gemini API key configured: set gemini.api_key in config.toml or the CAMPUSCHAT_API_KEY / GEMINI_API_KEY environment variable"
    )]
    MissingApiKey,
}
