//! Application configuration structures.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Homework status API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Polling loop behavior
    #[serde(default)]
    pub poller: PollerConfig,

    /// Telegram Bot API settings
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration if the file exists.
    ///
    /// A missing file yields `Ok(None)`; an unreadable or malformed one is an error.
    pub fn try_load(path: impl AsRef<Path>) -> Result<Option<Self>> {
        match Self::load(&path) {
            Ok(config) => Ok(Some(config)),
            Err(AppError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.api.endpoint.trim().is_empty() {
            return Err(AppError::config("api.endpoint is empty"));
        }
        url::Url::parse(&self.api.endpoint)
            .map_err(|e| AppError::config(format!("api.endpoint is not a valid URL: {e}")))?;
        if self.api.timeout_secs == 0 {
            return Err(AppError::config("api.timeout_secs must be > 0"));
        }
        if self.poller.retry_period_secs == 0 {
            return Err(AppError::config("poller.retry_period_secs must be > 0"));
        }
        if self.telegram.api_base.trim().is_empty() {
            return Err(AppError::config("telegram.api_base is empty"));
        }
        Ok(())
    }
}

/// Homework status API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Status check endpoint
    #[serde(default = "defaults::endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::endpoint(),
            timeout_secs: defaults::timeout(),
            user_agent: defaults::user_agent(),
        }
    }
}

/// Polling loop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollerConfig {
    /// Pause between iterations in seconds
    #[serde(default = "defaults::retry_period")]
    pub retry_period_secs: u64,

    /// Message sent once at startup
    #[serde(default = "defaults::greeting")]
    pub greeting: String,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            retry_period_secs: defaults::retry_period(),
            greeting: defaults::greeting(),
        }
    }
}

/// Telegram Bot API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot API base URL, without the `/bot<token>` segment
    #[serde(default = "defaults::telegram_api_base")]
    pub api_base: String,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_base: defaults::telegram_api_base(),
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

/// Secrets read from the environment.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
}

impl Credentials {
    pub const PRACTICUM_TOKEN: &'static str = "PRACTICUM_TOKEN";
    pub const TELEGRAM_TOKEN: &'static str = "TELEGRAM_TOKEN";
    pub const TELEGRAM_CHAT_ID: &'static str = "TELEGRAM_CHAT_ID";

    /// Read credentials from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read credentials through an arbitrary lookup. Absent values become empty.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| lookup(name).unwrap_or_default().trim().to_string();
        Self {
            practicum_token: read(Self::PRACTICUM_TOKEN),
            telegram_token: read(Self::TELEGRAM_TOKEN),
            telegram_chat_id: read(Self::TELEGRAM_CHAT_ID),
        }
    }

    /// Fail with every missing variable name if any value is empty.
    pub fn validate(&self) -> Result<()> {
        let missing: Vec<String> = [
            (Self::PRACTICUM_TOKEN, &self.practicum_token),
            (Self::TELEGRAM_TOKEN, &self.telegram_token),
            (Self::TELEGRAM_CHAT_ID, &self.telegram_chat_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name.to_string())
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::MissingConfiguration(missing))
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("practicum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish()
    }
}

mod defaults {
    // API defaults
    pub fn endpoint() -> String {
        "https://practicum.yandex.ru/api/user_api/homework_statuses/".into()
    }
    pub fn timeout() -> u64 {
        10
    }
    pub fn user_agent() -> String {
        "homework-notifier/0.1".into()
    }

    // Poller defaults
    pub fn retry_period() -> u64 {
        600
    }
    pub fn greeting() -> String {
        "Hi, practicum".into()
    }

    // Telegram defaults
    pub fn telegram_api_base() -> String {
        "https://api.telegram.org".into()
    }

    // Logging defaults
    pub fn log_level() -> String {
        "debug".into()
    }
}
