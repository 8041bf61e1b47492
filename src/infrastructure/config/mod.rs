//! Configuration management
//!
//! Everything comes from the process environment, read once at startup.
//! A `.env` file in the working directory is loaded first when present.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use crate::application::errors::ConfigError;

/// Default phone validation endpoint
pub const DEFAULT_VALIDATION_API_URL: &str = "https://api.apilayer.com/number_verification/validate";

pub const ENV_BOT_TOKEN: &str = "BOT_TOKEN";
pub const ENV_API_KEY: &str = "API_KEY";
pub const ENV_PUBLIC_URL: &str = "PUBLIC_URL";
pub const ENV_PORT: &str = "PORT";
pub const ENV_DELIVERY_MODE: &str = "DELIVERY_MODE";
pub const ENV_VALIDATION_API_URL: &str = "VALIDATION_API_URL";

/// How inbound messages reach the bot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeliveryMode {
    Webhook,
    Polling,
    Console,
}

impl DeliveryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryMode::Webhook => "webhook",
            DeliveryMode::Polling => "polling",
            DeliveryMode::Console => "console",
        }
    }
}

impl FromStr for DeliveryMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "webhook" => Ok(DeliveryMode::Webhook),
            "polling" => Ok(DeliveryMode::Polling),
            "console" => Ok(DeliveryMode::Console),
            other => Err(ConfigError::InvalidValue {
                field: ENV_DELIVERY_MODE.to_string(),
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for DeliveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated bot configuration
#[derive(Clone, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub mode: DeliveryMode,
    /// Empty in console mode
    #[serde(serialize_with = "redact")]
    pub bot_token: String,
    #[serde(serialize_with = "redact")]
    pub api_key: String,
    pub public_url: Option<String>,
    pub port: Option<u16>,
    pub validation_api_url: String,
}

impl Config {
    /// Load `.env` (if any) and read the process environment
    pub fn load_env() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!("Failed to read .env file: {}", e),
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let require = |key: &str| get(key).ok_or_else(|| ConfigError::MissingField(key.to_string()));

        let public_url = get(ENV_PUBLIC_URL).map(|url| url.trim_end_matches('/').to_string());

        let mode = match get(ENV_DELIVERY_MODE) {
            Some(value) => value.parse()?,
            None if public_url.is_some() => DeliveryMode::Webhook,
            None => DeliveryMode::Polling,
        };

        let port = get(ENV_PORT)
            .map(|value| {
                value.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                    field: ENV_PORT.to_string(),
                    value,
                })
            })
            .transpose()?;

        let api_key = require(ENV_API_KEY)?;

        let bot_token = match mode {
            DeliveryMode::Console => get(ENV_BOT_TOKEN).unwrap_or_default(),
            _ => require(ENV_BOT_TOKEN)?,
        };

        if mode == DeliveryMode::Webhook {
            if public_url.is_none() {
                return Err(ConfigError::MissingField(ENV_PUBLIC_URL.to_string()));
            }
            if port.is_none() {
                return Err(ConfigError::MissingField(ENV_PORT.to_string()));
            }
        }

        Ok(Self {
            mode,
            bot_token,
            api_key,
            public_url,
            port,
            validation_api_url: get(ENV_VALIDATION_API_URL)
                .unwrap_or_else(|| DEFAULT_VALIDATION_API_URL.to_string()),
        })
    }

    /// Human-readable summary with credentials redacted
    pub fn summary(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| format!("{:?}", self))
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("mode", &self.mode)
            .field("bot_token", &mask(&self.bot_token))
            .field("api_key", &mask(&self.api_key))
            .field("public_url", &self.public_url)
            .field("port", &self.port)
            .field("validation_api_url", &self.validation_api_url)
            .finish()
    }
}

/// Show at most the first 8 characters of a secret
pub fn mask(secret: &str) -> String {
    if secret.is_empty() {
        return String::new();
    }
    let prefix: String = secret.chars().take(8).collect();
    format!("{}...", prefix)
}

fn redact<S: serde::Serializer>(secret: &str, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&mask(secret))
}
