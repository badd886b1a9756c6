//! Configuration module for PogodaRadar.
//!
//! Loads configuration from environment variables (a `.env` file is honoured).

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::models::Identity;

/// Bot running mode
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BotMode {
    #[default]
    Polling,
    Webhook,
}

/// Startup configuration problems. Fatal: the process refuses to start.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} must be {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Flood control limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloodLimits {
    /// Requests allowed inside one interval before blocking.
    pub limit: u32,
    /// Gap after which the request counter starts over.
    pub interval: Duration,
    /// How long a block lasts.
    pub block: Duration,
}

impl Default for FloodLimits {
    fn default() -> Self {
        Self {
            limit: 10,
            interval: Duration::from_secs(60),
            block: Duration::from_secs(60),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    // Telegram
    pub bot_token: String,
    pub bot_mode: BotMode,
    pub webhook_url: Option<String>,
    pub webhook_port: u16,
    pub webhook_secret: Option<String>,

    /// The single administrator allowed to read usage statistics.
    pub admin_id: Identity,

    // Weather provider
    pub weather_api_key: String,
    pub weather_api_url: String,
    pub http_timeout: Duration,

    /// Directory holding cities.csv, user_statistics.csv and city_data.csv.
    pub data_dir: PathBuf,

    /// Port for the `/health` endpoint; disabled when unset.
    pub health_port: Option<u16>,

    pub flood: FloodLimits,

    /// Abandoned dialogs are dropped after this much inactivity.
    /// `None` keeps them until the next message.
    pub dialog_idle_timeout: Option<Duration>,

    /// Pause before the supervisor restarts a failed receive loop.
    pub restart_backoff: Duration,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    /// Returns `ConfigError` if a required variable is missing or malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bot_token = var("BOT_TOKEN").ok_or(ConfigError::Missing("BOT_TOKEN"))?;

        let admin_raw = var("ADMIN_ID").ok_or(ConfigError::Missing("ADMIN_ID"))?;
        let admin_id = admin_raw
            .parse::<u64>()
            .map(Identity)
            .map_err(|_| ConfigError::Invalid {
                name: "ADMIN_ID",
                expected: "an integer",
                value: admin_raw.clone(),
            })?;

        let weather_api_key =
            var("WEATHER_API_KEY").ok_or(ConfigError::Missing("WEATHER_API_KEY"))?;

        let bot_mode = match var("BOT_MODE").map(|m| m.to_lowercase()).as_deref() {
            Some("webhook") => BotMode::Webhook,
            _ => BotMode::Polling,
        };

        let webhook_url = var("WEBHOOK_URL");
        if bot_mode == BotMode::Webhook && webhook_url.is_none() {
            return Err(ConfigError::Missing("WEBHOOK_URL"));
        }

        let flood = FloodLimits {
            limit: parse_or(&var, "FLOOD_LIMIT", 10u32, "an integer")?,
            interval: Duration::from_secs(parse_or(&var, "FLOOD_INTERVAL_SECS", 60u64, "a number of seconds")?),
            block: Duration::from_secs(parse_or(&var, "BLOCK_TIME_SECS", 60u64, "a number of seconds")?),
        };

        let idle_secs: u64 = parse_or(&var, "DIALOG_IDLE_TIMEOUT_SECS", 900, "a number of seconds")?;
        let health_port = match var("HEALTH_PORT") {
            Some(raw) => Some(raw.parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: "HEALTH_PORT",
                expected: "a port number",
                value: raw.clone(),
            })?),
            None => None,
        };

        Ok(Self {
            bot_token,
            bot_mode,
            webhook_url,
            webhook_port: parse_or(&var, "WEBHOOK_PORT", 8443u16, "a port number")?,
            webhook_secret: var("WEBHOOK_SECRET"),
            admin_id,
            weather_api_key,
            weather_api_url: var("WEATHER_API_URL")
                .unwrap_or_else(|| "http://api.weatherapi.com/v1".to_string()),
            http_timeout: Duration::from_secs(parse_or(&var, "HTTP_TIMEOUT_SECS", 30u64, "a number of seconds")?),
            data_dir: var("DATA_DIR").map(PathBuf::from).unwrap_or_else(|| PathBuf::from(".")),
            health_port,
            flood,
            dialog_idle_timeout: (idle_secs > 0).then(|| Duration::from_secs(idle_secs)),
            restart_backoff: Duration::from_secs(parse_or(&var, "RESTART_BACKOFF_SECS", 5u64, "a number of seconds")?),
        })
    }
}

/// Parse an optional variable, falling back to `default` when unset.
fn parse_or<T, V>(var: &V, name: &'static str, default: T, expected: &'static str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    V: Fn(&str) -> Option<String>,
{
    match var(name) {
        Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
            name,
            expected,
            value: raw,
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("BOT_TOKEN", "123:abc"),
        ("ADMIN_ID", "42"),
        ("WEATHER_API_KEY", "key"),
    ];

    #[test]
    fn defaults_applied() {
        let config = Config::from_lookup(lookup(&REQUIRED)).unwrap();

        assert_eq!(config.admin_id, Identity(42));
        assert_eq!(config.bot_mode, BotMode::Polling);
        assert_eq!(config.flood, FloodLimits::default());
        assert_eq!(config.dialog_idle_timeout, Some(Duration::from_secs(900)));
        assert_eq!(config.restart_backoff, Duration::from_secs(5));
        assert_eq!(config.weather_api_url, "http://api.weatherapi.com/v1");
        assert!(config.health_port.is_none());
    }

    #[test]
    fn missing_token_is_fatal() {
        let err = Config::from_lookup(lookup(&[("ADMIN_ID", "1"), ("WEATHER_API_KEY", "k")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("BOT_TOKEN"));
    }

    #[test]
    fn admin_id_must_be_integer() {
        let err = Config::from_lookup(lookup(&[
            ("BOT_TOKEN", "t"),
            ("ADMIN_ID", "admin"),
            ("WEATHER_API_KEY", "k"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "ADMIN_ID", .. }));
    }

    #[test]
    fn webhook_mode_requires_url() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("BOT_MODE", "Webhook"));
        let err = Config::from_lookup(lookup(&pairs)).unwrap_err();
        assert_eq!(err, ConfigError::Missing("WEBHOOK_URL"));
    }

    #[test]
    fn zero_idle_timeout_disables_expiry() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("DIALOG_IDLE_TIMEOUT_SECS", "0"));
        pairs.push(("FLOOD_LIMIT", "3"));
        let config = Config::from_lookup(lookup(&pairs)).unwrap();
        assert!(config.dialog_idle_timeout.is_none());
        assert_eq!(config.flood.limit, 3);
    }
}
