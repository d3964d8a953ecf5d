//! Test context for unified test setup
//!
//! Wires the dialog engine, the notification dispatcher and the alert scanner
//! onto one in-memory store, one scripted provider and one recording notifier.

use std::sync::Arc;
use std::time::Duration;
use onchain_bot::handlers::{DialogEngine, Reply};
use onchain_bot::services::{AlertScanner, NotificationDispatcher};
use onchain_bot::state::{MemoryStore, SessionStore};

use super::market_mock::{MockMarketData, RecordingNotifier};

/// Wait notice delay used by the engine under test
pub const WAIT_DELAY: Duration = Duration::from_secs(5);

pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub provider: Arc<MockMarketData>,
    pub notifier: Arc<RecordingNotifier>,
    pub engine: DialogEngine,
    pub dispatcher: NotificationDispatcher,
    pub scanner: AlertScanner,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_provider(MockMarketData::new())
    }

    pub fn with_provider(provider: MockMarketData) -> Self {
        let store = Arc::new(MemoryStore::new());
        let provider = Arc::new(provider);
        let notifier = Arc::new(RecordingNotifier::new());

        let engine = DialogEngine::new(store.clone(), provider.clone(), notifier.clone(), WAIT_DELAY);
        let dispatcher = NotificationDispatcher::new(store.clone(), provider.clone(), notifier.clone());
        let scanner = AlertScanner::new(store.clone(), provider.clone(), dispatcher.clone());

        Self {
            store,
            provider,
            notifier,
            engine,
            dispatcher,
            scanner,
        }
    }

    /// Feed one message through the engine
    pub async fn say(&self, address: &str, text: &str) -> Reply {
        self.engine
            .handle(address, text)
            .await
            .expect("dialog engine should not fail on an in-memory store")
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        self.store.get(key).await.expect("memory store get")
    }

    pub async fn set(&self, key: &str, value: &str) {
        self.store.set(key, value).await.expect("memory store set")
    }

    /// Top-level and gas step counters, read as stored ("0" when absent)
    pub async fn steps(&self, address: &str) -> (String, String) {
        let step = self.get(&format!("{}:step", address)).await.unwrap_or_else(|| "0".to_string());
        let gas_step = self.get(&format!("{}:gas_step", address)).await.unwrap_or_else(|| "0".to_string());
        (step, gas_step)
    }
}
