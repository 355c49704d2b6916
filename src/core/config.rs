//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables (and a `.env` file) or defaults.

use super::error::{Error, Result};
use super::transport::TransportConfig;
use crate::domains::calendar::RateBudget;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Primary environment variable holding the Cal.com API key.
pub const API_KEY_ENV: &str = "CALCOM_API_KEY";

/// Alternative, `MCP_`-prefixed name for the API key.
pub const API_KEY_ENV_ALT: &str = "MCP_CALCOM_API_KEY";

/// Main configuration structure for the MCP server.
///
/// This struct contains all configurable aspects of the server, organized
/// by domain for clarity and maintainability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// External API credentials configuration.
    pub credentials: CredentialsConfig,

    /// Cal.com client settings.
    pub provider: ProviderConfig,

    /// Outbound request budget.
    pub rate_limit: RateBudget,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Configuration for external API credentials.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// Cal.com API key. Required at startup.
    pub calcom_api_key: Option<String>,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field(
                "calcom_api_key",
                &self.calcom_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

/// Cal.com client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the Cal.com API (no trailing slash needed).
    pub base_url: String,

    /// Timeout for each outbound request, in seconds.
    pub timeout_secs: u64,

    /// IANA time zone sent with new bookings.
    pub time_zone: String,

    /// Language sent with new bookings.
    pub language: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.cal.com/v2".to_string(),
            timeout_secs: 30,
            time_zone: "UTC".to_string(),
            language: "en".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "calcom-calendar".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            credentials: CredentialsConfig::default(),
            provider: ProviderConfig::default(),
            rate_limit: RateBudget::default(),
        }
    }
}

/// Parse a numeric environment variable, keeping `default` when unset or invalid.
fn env_number<T: std::str::FromStr + Copy + std::fmt::Display>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {}={:?}, using {}", name, raw, default);
            default
        }),
        Err(_) => default,
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Server settings are prefixed with `MCP_` (`MCP_SERVER_NAME`,
    /// `MCP_LOG_LEVEL`, ...). The API key is read from `CALCOM_API_KEY`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        config.credentials.calcom_api_key = std::env::var(API_KEY_ENV)
            .or_else(|_| std::env::var(API_KEY_ENV_ALT))
            .ok()
            .filter(|key| !key.trim().is_empty());

        if let Ok(base_url) = std::env::var("MCP_CALCOM_BASE_URL") {
            config.provider.base_url = base_url;
        }
        if let Ok(time_zone) = std::env::var("MCP_CALCOM_TIME_ZONE") {
            config.provider.time_zone = time_zone;
        }
        config.provider.timeout_secs =
            env_number("MCP_CALCOM_TIMEOUT_SECS", config.provider.timeout_secs);

        config.rate_limit.per_second =
            env_number("MCP_RATE_LIMIT_PER_SECOND", config.rate_limit.per_second);
        config.rate_limit.per_day = env_number("MCP_RATE_LIMIT_PER_DAY", config.rate_limit.per_day);

        config
    }

    /// Check the settings that must hold before the server starts.
    pub fn validate(&self) -> Result<()> {
        if self.credentials.calcom_api_key.is_none() {
            return Err(Error::config(format!(
                "{API_KEY_ENV} environment variable is required"
            )));
        }

        if self.rate_limit.per_second == 0 || self.rate_limit.per_day == 0 {
            return Err(Error::config(
                "rate limits must be positive (MCP_RATE_LIMIT_PER_SECOND, MCP_RATE_LIMIT_PER_DAY)",
            ));
        }

        if self.provider.timeout_secs == 0 {
            return Err(Error::config("MCP_CALCOM_TIMEOUT_SECS must be positive"));
        }

        info!(
            per_second = self.rate_limit.per_second,
            per_day = self.rate_limit.per_day,
            base_url = %self.provider.base_url,
            "Configuration validated"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    fn with_key(key: &str) -> Config {
        let mut config = Config::default();
        config.credentials.calcom_api_key = Some(key.to_string());
        config
    }

    #[test]
    fn test_api_key_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var(API_KEY_ENV, "cal_live_12345");
        }
        let config = Config::from_env();
        assert_eq!(
            config.credentials.calcom_api_key.as_deref(),
            Some("cal_live_12345")
        );
        unsafe {
            std::env::remove_var(API_KEY_ENV);
        }
    }

    #[test]
    fn test_missing_api_key_fails_validation() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::remove_var(API_KEY_ENV);
            std::env::remove_var(API_KEY_ENV_ALT);
        }
        let config = Config::from_env();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains(API_KEY_ENV));
    }

    #[test]
    fn test_rate_limit_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_RATE_LIMIT_PER_SECOND", "2");
            std::env::set_var("MCP_RATE_LIMIT_PER_DAY", "not-a-number");
        }
        let config = Config::from_env();
        assert_eq!(config.rate_limit.per_second, 2);
        assert_eq!(config.rate_limit.per_day, 1000);
        unsafe {
            std::env::remove_var("MCP_RATE_LIMIT_PER_SECOND");
            std::env::remove_var("MCP_RATE_LIMIT_PER_DAY");
        }
    }

    #[test]
    fn test_zero_budget_fails_validation() {
        let mut config = with_key("k");
        config.rate_limit.per_day = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_valid_config() {
        assert!(with_key("k").validate().is_ok());
    }

    #[test]
    fn test_credentials_redacted_in_debug() {
        let creds = CredentialsConfig {
            calcom_api_key: Some("super_secret_key".to_string()),
        };
        let debug_str = format!("{:?}", creds);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret_key"));
    }
}
