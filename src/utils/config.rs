// Centralized configuration for the leaderboard proxy

use std::fmt;

use thiserror::Error;
use tracing::info;

pub const DEFAULT_RAINBET_API_BASE: &str = "https://services.rainbet.com/v1/external/affiliates";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;

/// Sent on every upstream request
pub const USER_AGENT: &str = "BankBros-Leaderboard/1.0";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid {key} value '{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime settings, read once at startup
#[derive(Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub rainbet_api_base: String,
    pub rainbet_api_key: String,
}

// Manual Debug impl so the API key never reaches the logs
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("rainbet_api_base", &self.rainbet_api_base)
            .field("rainbet_api_key", &"<redacted>")
            .finish()
    }
}

impl Config {
    /// Load from the process environment (after `.env` has been applied)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let rainbet_api_key =
            non_empty("RAINBET_API_KEY").ok_or(ConfigError::Missing("RAINBET_API_KEY"))?;

        let rainbet_api_base = non_empty("RAINBET_API_BASE").unwrap_or_else(|| {
            info!("RAINBET_API_BASE not set, using default: {DEFAULT_RAINBET_API_BASE}");
            DEFAULT_RAINBET_API_BASE.to_string()
        });

        let host = non_empty("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match non_empty("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::Invalid {
                key: "PORT",
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => {
                info!("PORT not set, using default: {DEFAULT_PORT}");
                DEFAULT_PORT
            }
        };

        Ok(Self {
            host,
            port,
            rainbet_api_base,
            rainbet_api_key,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
