//! Session store implementation
//!
//! This module defines the key-value contract the dialog engine and the
//! background tasks share, together with a Redis implementation and an
//! in-memory one for tests and local runs.

use std::collections::HashMap;
use std::time::Instant;
use async_trait::async_trait;
use redis::AsyncCommands;
use tokio::sync::RwLock;
use tracing::{debug, error};
use crate::config::RedisConfig;
use crate::utils::errors::{BotError, Result};
use crate::utils::helpers::glob_to_regex;
use crate::utils::logging::log_store_operation;

/// Narrow key-value contract over the external store.
///
/// Keys and values are plain strings. `keys` takes a Redis-style glob
/// (`*`, `?`, backslash escapes) and returns matching keys without any
/// implementation-specific prefix. Missing keys are not errors.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a key, returning whether it existed
    async fn delete(&self, key: &str) -> Result<bool>;

    async fn keys(&self, pattern: &str) -> Result<Vec<String>>;
}

/// Redis-based session store
#[derive(Clone)]
pub struct RedisStore {
    /// Redis connection manager
    connection_manager: redis::aio::ConnectionManager,
    /// Redis configuration
    config: RedisConfig,
}

impl RedisStore {
    /// Create a new Redis store instance
    pub async fn new(config: RedisConfig) -> Result<Self> {
        let client = redis::Client::open(config.url.as_str())?;
        let connection_manager = redis::aio::ConnectionManager::new(client).await?;

        Ok(Self {
            connection_manager,
            config,
        })
    }

    /// Test Redis connection
    pub async fn test_connection(&self) -> Result<()> {
        let mut conn = self.connection_manager.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }

    fn full_key(&self, key: &str) -> String {
        format!("{}{}", self.config.prefix, key)
    }
}

#[async_trait]
impl SessionStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let full_key = self.full_key(key);
        let mut conn = self.connection_manager.clone();

        let value: Option<String> = conn.get(&full_key).await?;
        debug!(key = %full_key, found = value.is_some(), "Redis GET");
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let full_key = self.full_key(key);
        let mut conn = self.connection_manager.clone();
        let started = Instant::now();

        let result = conn.set::<_, _, ()>(&full_key, value).await;
        log_store_operation("set", &full_key, started.elapsed().as_millis() as u64, result.is_ok());
        result.map_err(|e| {
            error!(key = %full_key, error = %e, "Failed to write key to Redis");
            BotError::Redis(e)
        })
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let full_key = self.full_key(key);
        let mut conn = self.connection_manager.clone();
        let started = Instant::now();

        let deleted: u32 = conn.del(&full_key).await?;
        log_store_operation("del", &full_key, started.elapsed().as_millis() as u64, true);
        Ok(deleted > 0)
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>> {
        let full_pattern = self.full_key(pattern);
        let mut conn = self.connection_manager.clone();

        let keys: Vec<String> = conn.keys(&full_pattern).await?;
        debug!(pattern = %full_pattern, count = keys.len(), "Keys retrieved by pattern");

        Ok(keys
            .into_iter()
            .filter_map(|key| key.strip_prefix(&self.config.prefix).map(str::to_string))
            .collect())
    }
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// In-memory session store
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.write().await.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.entries.write().await.remove(key).is_some())
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>> {
        let matcher = regex::Regex::new(&glob_to_regex(pattern))
            .map_err(|e| BotError::InvalidInput(format!("Invalid key pattern {}: {}", pattern, e)))?;

        let mut keys: Vec<String> = self.entries
            .read()
            .await
            .keys()
            .filter(|key| matcher.is_match(key))
            .cloned()
            .collect();
        keys.sort();
        Ok(keys)
    }
}
