// src/config.rs
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::provider::AuthScheme;

pub const DEFAULT_PROVIDER_HOST: &str = "https://stagesearch.infotrack.com.au";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
    #[error("{0} must be set when TITLEFLOW_MODE=live")]
    Missing(&'static str),
}

/// Whether searches and orders go to the title provider or the built-in mock data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceMode {
    Live,
    Mock,
}

impl FromStr for ServiceMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" => Ok(ServiceMode::Live),
            "mock" => Ok(ServiceMode::Mock),
            _ => Err(()),
        }
    }
}

/// How a freshly placed order reaches a terminal status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FulfillmentMode {
    /// Fixed delay, then every item is ready.
    Simulated,
    /// Poll the provider's order status until it completes or errors.
    Polling,
}

impl FromStr for FulfillmentMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simulated" => Ok(FulfillmentMode::Simulated),
            "polling" => Ok(FulfillmentMode::Polling),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FulfillmentConfig {
    pub mode: FulfillmentMode,
    pub delay: Duration,
    pub poll_interval: Duration,
    pub poll_attempts: u32,
}

impl Default for FulfillmentConfig {
    fn default() -> Self {
        Self {
            mode: FulfillmentMode::Simulated,
            delay: Duration::from_secs(5),
            poll_interval: Duration::from_secs(3),
            poll_attempts: 20,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub host: String,
    pub api_key: String,
    pub auth_scheme: AuthScheme,
    pub timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_PROVIDER_HOST.to_string(),
            api_key: String::new(),
            auth_scheme: AuthScheme::Bearer,
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub addr: SocketAddr,
    pub db_path: String,
    pub schema_path: String,
    pub max_workers: usize,
    pub mode: ServiceMode,
    pub fulfillment: FulfillmentConfig,
    pub provider: ProviderConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            db_path: "titleflow.sqlite3".to_string(),
            schema_path: "sql/schema.sql".to_string(),
            max_workers: 8,
            mode: ServiceMode::Mock,
            fulfillment: FulfillmentConfig::default(),
            provider: ProviderConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = AppConfig::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("TITLEFLOW_ADDR") {
            cfg.addr = parse_value("TITLEFLOW_ADDR", &v)?;
        }
        if let Some(v) = get("TITLEFLOW_DB") {
            cfg.db_path = v;
        }
        if let Some(v) = get("TITLEFLOW_SCHEMA") {
            cfg.schema_path = v;
        }
        if let Some(v) = get("TITLEFLOW_WORKERS") {
            cfg.max_workers = parse_value("TITLEFLOW_WORKERS", &v)?;
        }
        if let Some(v) = get("TITLEFLOW_MODE") {
            cfg.mode = parse_value("TITLEFLOW_MODE", &v)?;
        }

        if let Some(v) = get("TITLEFLOW_FULFILLMENT") {
            cfg.fulfillment.mode = parse_value("TITLEFLOW_FULFILLMENT", &v)?;
        }
        if let Some(v) = get("TITLEFLOW_FULFILLMENT_DELAY_MS") {
            cfg.fulfillment.delay = parse_millis("TITLEFLOW_FULFILLMENT_DELAY_MS", &v)?;
        }
        if let Some(v) = get("TITLEFLOW_POLL_INTERVAL_MS") {
            cfg.fulfillment.poll_interval = parse_millis("TITLEFLOW_POLL_INTERVAL_MS", &v)?;
        }
        if let Some(v) = get("TITLEFLOW_POLL_ATTEMPTS") {
            cfg.fulfillment.poll_attempts = parse_value("TITLEFLOW_POLL_ATTEMPTS", &v)?;
        }

        if let Some(v) = get("INFOTRACK_HOST") {
            cfg.provider.host = v.trim_end_matches('/').to_string();
        }
        if let Some(v) = get("INFOTRACK_API_KEY") {
            cfg.provider.api_key = v;
        }
        if let Some(v) = get("INFOTRACK_AUTH_SCHEME") {
            cfg.provider.auth_scheme = parse_value("INFOTRACK_AUTH_SCHEME", &v)?;
        }
        if let Some(v) = get("INFOTRACK_TIMEOUT_SECS") {
            let secs: u64 = parse_value("INFOTRACK_TIMEOUT_SECS", &v)?;
            cfg.provider.timeout = Duration::from_secs(secs);
        }

        if cfg.mode == ServiceMode::Live && cfg.provider.api_key.is_empty() {
            return Err(ConfigError::Missing("INFOTRACK_API_KEY"));
        }
        if cfg.max_workers == 0 {
            return Err(ConfigError::Invalid {
                key: "TITLEFLOW_WORKERS",
                value: "0".to_string(),
            });
        }

        Ok(cfg)
    }
}

fn parse_value<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: value.to_string(),
    })
}

fn parse_millis(key: &'static str, value: &str) -> Result<Duration, ConfigError> {
    parse_value::<u64>(key, value).map(Duration::from_millis)
}
