//! TOML-based configuration for the review client
//!
//! All settings live in a single file (`mentor-review.toml` by default).
//! Every field has a default so an empty or missing file still yields a
//! usable configuration pointing at a local backend. Secrets are never
//! written to the file: it names the environment variable that holds them.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Placeholder every action path template must contain.
pub const ID_PLACEHOLDER: &str = "{id}";

/// Root configuration structure loaded from mentor-review.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewConfig {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

// ============= Backend Configuration =============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the list endpoint (the only read path)
    #[serde(default = "default_list_path")]
    pub list_path: String,

    /// Path template of the approve endpoint, must contain `{id}`
    #[serde(default = "default_approve_path")]
    pub approve_path: String,

    /// Path template of the reject endpoint, must contain `{id}`
    #[serde(default = "default_reject_path")]
    pub reject_path: String,

    /// Environment variable containing the admin bearer token
    #[serde(default = "default_token_env")]
    pub token_env: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Send `{ "reason": ... }` with reject calls.
    ///
    /// Off by default: the deployed backend route takes no body.
    #[serde(default)]
    pub send_rejection_reason: bool,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_list_path() -> String {
    "/api/admin/mentor-registrations".to_string()
}

fn default_approve_path() -> String {
    "/api/admin/mentor-registrations/{id}/approve".to_string()
}

fn default_reject_path() -> String {
    "/api/admin/mentor-registrations/{id}/reject".to_string()
}

fn default_token_env() -> String {
    "MENTOR_REVIEW_TOKEN".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            list_path: default_list_path(),
            approve_path: default_approve_path(),
            reject_path: default_reject_path(),
            token_env: default_token_env(),
            timeout_secs: default_timeout_secs(),
            send_rejection_reason: false,
        }
    }
}

impl BackendConfig {
    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Resolve the bearer token from the environment, if set
    pub fn token(&self) -> Option<String> {
        std::env::var(&self.token_env)
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    }
}

// ============= Logging Configuration =============

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

// ============= Display Configuration =============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// chrono format string for dates
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Initials-avatar service used when a registration has no avatar
    #[serde(default = "default_avatar_base_url")]
    pub avatar_base_url: String,

    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_date_format() -> String {
    "%d %b %Y".to_string()
}

fn default_avatar_base_url() -> String {
    mentor_review_model::normalize::DEFAULT_AVATAR_BASE_URL.to_string()
}

fn default_page_size() -> usize {
    mentor_review_model::filter::DEFAULT_PAGE_SIZE
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            avatar_base_url: default_avatar_base_url(),
            page_size: default_page_size(),
        }
    }
}

impl DisplayConfig {
    /// Normalization options derived from display settings
    pub fn normalize_options(&self) -> mentor_review_model::NormalizeOptions {
        mentor_review_model::NormalizeOptions {
            avatar_base_url: self.avatar_base_url.clone(),
        }
    }
}

/// Errors that can occur during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl ReviewConfig {
    /// Load configuration from a TOML file and validate it
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;

        info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Load the file if present, otherwise fall back to defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        match Self::load(path.as_ref()) {
            Err(ConfigError::FileNotFound(missing)) => {
                warn!("Configuration file {:?} not found, using defaults", missing);
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
            other => other,
        }
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: ReviewConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.backend.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::ValidationError(format!(
                "backend.base_url must be an http(s) URL, got '{}'",
                self.backend.base_url
            )));
        }

        if !self.backend.list_path.starts_with('/') {
            return Err(ConfigError::ValidationError(format!(
                "backend.list_path must start with '/', got '{}'",
                self.backend.list_path
            )));
        }

        for (name, template) in [
            ("approve_path", &self.backend.approve_path),
            ("reject_path", &self.backend.reject_path),
        ] {
            if !template.starts_with('/') || !template.contains(ID_PLACEHOLDER) {
                return Err(ConfigError::ValidationError(format!(
                    "backend.{} must start with '/' and contain '{}', got '{}'",
                    name, ID_PLACEHOLDER, template
                )));
            }
        }

        if self.backend.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "backend.timeout_secs must be greater than zero".to_string(),
            ));
        }

        if self.backend.token_env.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "backend.token_env must name an environment variable".to_string(),
            ));
        }

        if !mentor_review_model::is_valid_date_format(&self.display.date_format) {
            return Err(ConfigError::ValidationError(format!(
                "display.date_format is not a valid strftime format: '{}'",
                self.display.date_format
            )));
        }

        if self.display.page_size == 0 {
            return Err(ConfigError::ValidationError(
                "display.page_size must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}
