//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use std::time::Duration;
use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub bot: BotConfig,
    pub redis: RedisConfig,
    pub providers: ProvidersConfig,
    pub scheduler: SchedulerConfig,
    pub logging: LoggingConfig,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotConfig {
    pub token: String,
}

/// Redis configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RedisConfig {
    pub url: String,
    pub prefix: String,
}

/// External data provider configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProvidersConfig {
    pub coingecko_url: String,
    pub fear_greed_url: String,
    pub covalent_url: String,
    pub covalent_api_key: String,
    pub etherscan_url: String,
    pub etherscan_api_key: String,
    pub polygonscan_url: String,
    pub polygonscan_api_key: String,
    pub bscscan_url: String,
    pub bscscan_api_key: String,
    pub timeout_seconds: u64,
}

/// Background task configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SchedulerConfig {
    /// Seconds between two gas alert scans
    pub alert_interval_seconds: u64,
    /// Hour of the day (UTC) at which the market digest goes out
    pub digest_hour_utc: u32,
    /// Delay before the "please wait" notice is sent for a slow fetch
    pub wait_notice_delay_ms: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Settings::default())?)
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("ONCHAIN").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::BotError> {
        super::validation::validate_settings(self)
    }
}

impl SchedulerConfig {
    pub fn alert_interval(&self) -> Duration {
        Duration::from_secs(self.alert_interval_seconds)
    }

    pub fn wait_notice_delay(&self) -> Duration {
        Duration::from_millis(self.wait_notice_delay_ms)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                token: String::new(),
            },
            redis: RedisConfig {
                url: "redis://localhost:6379".to_string(),
                prefix: "onchain:".to_string(),
            },
            providers: ProvidersConfig {
                coingecko_url: "https://api.coingecko.com/api/v3".to_string(),
                fear_greed_url: "https://api.alternative.me/fng/".to_string(),
                covalent_url: "https://api.covalenthq.com/v1".to_string(),
                covalent_api_key: String::new(),
                etherscan_url: "https://api.etherscan.io/api".to_string(),
                etherscan_api_key: String::new(),
                polygonscan_url: "https://api.polygonscan.com/api".to_string(),
                polygonscan_api_key: String::new(),
                bscscan_url: "https://api.bscscan.com/api".to_string(),
                bscscan_api_key: String::new(),
                timeout_seconds: 10,
            },
            scheduler: SchedulerConfig {
                alert_interval_seconds: 300,
                digest_hour_utc: 8,
                wait_notice_delay_ms: 5000,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "logs".to_string(),
            },
        }
    }
}
