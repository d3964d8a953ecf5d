//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{BotError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_bot_config(&settings.bot)?;
    validate_redis_config(&settings.redis)?;
    validate_providers_config(&settings.providers)?;
    validate_scheduler_config(&settings.scheduler)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate bot configuration
fn validate_bot_config(config: &super::BotConfig) -> Result<()> {
    if config.token.is_empty() {
        return Err(BotError::Config(
            "Bot token is required".to_string()
        ));
    }

    Ok(())
}

/// Validate Redis configuration
fn validate_redis_config(config: &super::RedisConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(BotError::Config(
            "Redis URL is required".to_string()
        ));
    }

    Ok(())
}

/// Validate provider configuration
fn validate_providers_config(config: &super::ProvidersConfig) -> Result<()> {
    let urls = [
        ("coingecko_url", &config.coingecko_url),
        ("fear_greed_url", &config.fear_greed_url),
        ("covalent_url", &config.covalent_url),
        ("etherscan_url", &config.etherscan_url),
        ("polygonscan_url", &config.polygonscan_url),
        ("bscscan_url", &config.bscscan_url),
    ];

    for (name, value) in urls {
        if url::Url::parse(value).is_err() {
            return Err(BotError::Config(
                format!("Provider URL {} is not a valid URL: {:?}", name, value)
            ));
        }
    }

    if config.timeout_seconds == 0 {
        return Err(BotError::Config(
            "Provider timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate scheduler configuration
fn validate_scheduler_config(config: &super::SchedulerConfig) -> Result<()> {
    if config.alert_interval_seconds == 0 {
        return Err(BotError::Config(
            "Alert scan interval must be greater than 0".to_string()
        ));
    }

    if config.digest_hour_utc > 23 {
        return Err(BotError::Config(
            format!("Digest hour must be between 0 and 23, got {}", config.digest_hour_utc)
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(BotError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(BotError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
