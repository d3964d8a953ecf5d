//! OnChain Telegram Bot
//!
//! A Telegram bot for crypto market data. Users walk a numbered menu to get
//! market sentiment, wallet balances, transaction histories and portfolio
//! analytics, subscribe to a daily market digest and set gas price alerts.
//! All conversation state lives in a key-value session store shared with the
//! background alert scanner and digest dispatcher.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{BotError, Result};

// Re-export main components for easy access
pub use handlers::{DialogEngine, Reply};
pub use services::{AlertScanner, HttpMarketData, MarketData, NotificationDispatcher, Notifier, Scheduler};
pub use state::{MemoryStore, RedisStore, SessionStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
