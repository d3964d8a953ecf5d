//! Session store wrapper that fails chosen operations
//!
//! Delegates to a shared in-memory store so the test context can seed data,
//! while reads of selected keys and listings of selected patterns error out
//! the way a dropped Redis connection would.

use std::collections::HashSet;
use std::sync::Arc;
use async_trait::async_trait;
use onchain_bot::state::{MemoryStore, SessionStore};
use onchain_bot::utils::errors::{BotError, Result};

pub struct FailingStore {
    inner: Arc<MemoryStore>,
    failing_gets: HashSet<String>,
    failing_patterns: HashSet<String>,
}

impl FailingStore {
    pub fn new(inner: Arc<MemoryStore>) -> Self {
        Self {
            inner,
            failing_gets: HashSet::new(),
            failing_patterns: HashSet::new(),
        }
    }

    pub fn fail_get(mut self, key: &str) -> Self {
        self.failing_gets.insert(key.to_string());
        self
    }

    pub fn fail_keys(mut self, pattern: &str) -> Self {
        self.failing_patterns.insert(pattern.to_string());
        self
    }

    fn connection_error(what: &str) -> BotError {
        BotError::Io(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            format!("connection reset while reading {}", what),
        ))
    }
}

#[async_trait]
impl SessionStore for FailingStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        if self.failing_gets.contains(key) {
            return Err(Self::connection_error(key));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.inner.set(key, value).await
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        self.inner.delete(key).await
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>> {
        if self.failing_patterns.contains(pattern) {
            return Err(Self::connection_error(pattern));
        }
        self.inner.keys(pattern).await
    }
}
