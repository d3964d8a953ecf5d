//! Notification service implementation
//!
//! Delivers unsolicited messages (gas alerts, the daily digest) to addresses
//! through the chat transport, and runs the daily digest over every
//! subscribed address.

use std::sync::Arc;
use async_trait::async_trait;
use teloxide::{prelude::Request, requests::Requester, types::ChatId, Bot};
use tracing::{debug, error, info, warn};
use crate::services::providers::MarketData;
use crate::state::context::is_subscribed;
use crate::state::SessionStore;
use crate::utils::errors::{BotError, Result};
use crate::utils::logging::{log_api_error, log_scan_result};

/// Delivers a text message to an address
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, address: &str, text: &str) -> Result<()>;
}

/// Notifier backed by the Telegram Bot API. Addresses are chat ids.
#[derive(Clone)]
pub struct TelegramNotifier {
    bot: Bot,
}

impl TelegramNotifier {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

/// Map an address onto the chat it belongs to
pub fn chat_id_for(address: &str) -> Result<ChatId> {
    address
        .parse::<i64>()
        .map(ChatId)
        .map_err(|_| BotError::UnknownDestination(address.to_string()))
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, address: &str, text: &str) -> Result<()> {
        let chat_id = chat_id_for(address)?;

        match self.bot.send_message(chat_id, text).send().await {
            Ok(_) => {
                debug!(address = address, "Notification sent");
                Ok(())
            }
            Err(e) => {
                error!(address = address, error = %e, "Failed to send notification");
                Err(BotError::Telegram(e))
            }
        }
    }
}

/// Outcome of one digest run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DigestReport {
    pub subscribers: usize,
    pub delivered: usize,
    pub failed: usize,
}

/// Dispatches notifications and the daily market digest
#[derive(Clone)]
pub struct NotificationDispatcher {
    store: Arc<dyn SessionStore>,
    provider: Arc<dyn MarketData>,
    notifier: Arc<dyn Notifier>,
}

impl NotificationDispatcher {
    pub fn new(
        store: Arc<dyn SessionStore>,
        provider: Arc<dyn MarketData>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            store,
            provider,
            notifier,
        }
    }

    /// Send one message to an address
    pub async fn notify(&self, address: &str, text: &str) -> Result<()> {
        self.notifier.send(address, text).await
    }

    /// Addresses carrying the subscription marker
    pub async fn subscribers(&self) -> Result<Vec<String>> {
        let mut subscribers = Vec::new();

        for key in self.store.keys("*").await? {
            if key.contains(':') {
                continue;
            }
            match is_subscribed(self.store.as_ref(), &key).await {
                Ok(true) => subscribers.push(key),
                Ok(false) => {}
                Err(e) => warn!(address = %key, error = %e, "Failed to read subscription marker"),
            }
        }

        Ok(subscribers)
    }

    /// Send today's market summary to every subscriber.
    ///
    /// The summary is fetched once per run. If it is unavailable the run is
    /// skipped. A failed delivery does not stop the remaining ones.
    pub async fn run_digest(&self) -> Result<DigestReport> {
        let subscribers = self.subscribers().await?;
        let mut report = DigestReport {
            subscribers: subscribers.len(),
            ..DigestReport::default()
        };

        if subscribers.is_empty() {
            debug!("No digest subscribers");
            return Ok(report);
        }

        let summary = match self.provider.market_summary().await {
            Ok(summary) => summary,
            Err(e) => {
                log_api_error("market_summary", &e.to_string(), Some("daily digest"));
                warn!(subscribers = subscribers.len(), "Skipping daily digest");
                return Ok(report);
            }
        };

        let message = digest_message(&summary);
        for address in &subscribers {
            match self.notify(address, &message).await {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    warn!(address = %address, error = %e, "Digest delivery failed");
                    report.failed += 1;
                }
            }
        }

        log_scan_result("daily_digest", report.subscribers, report.delivered, report.failed);
        info!(delivered = report.delivered, "Daily digest sent");
        Ok(report)
    }
}

pub fn digest_message(summary: &str) -> String {
    format!("Good morning! Here's today's crypto market summary:\n\n{}", summary)
}
