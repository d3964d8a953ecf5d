//! Gas price alert scanner
//!
//! Each cycle walks the persisted alerts network by network, fetches the
//! network's gas prices once and notifies every address whose threshold is
//! above the current standard price. Alerts are left in place, so an alert
//! keeps firing on every cycle while the price stays below its threshold.

use std::sync::Arc;
use tracing::{debug, warn};
use crate::models::{GasPrices, Network};
use crate::services::notification::NotificationDispatcher;
use crate::services::providers::MarketData;
use crate::state::context::keys;
use crate::state::SessionStore;
use crate::utils::errors::Result;
use crate::utils::helpers::parse_threshold;
use crate::utils::logging::{log_api_error, log_scan_result};

/// Outcome of one scan cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Alert records read
    pub examined: usize,
    /// Notifications delivered
    pub delivered: usize,
    /// Records skipped: unparsable, unreadable, vanished mid-scan or undeliverable
    pub skipped: usize,
    /// Networks whose alert listing or gas price fetch failed this cycle
    pub failed_networks: Vec<Network>,
}

#[derive(Clone)]
pub struct AlertScanner {
    store: Arc<dyn SessionStore>,
    provider: Arc<dyn MarketData>,
    dispatcher: NotificationDispatcher,
}

impl AlertScanner {
    pub fn new(
        store: Arc<dyn SessionStore>,
        provider: Arc<dyn MarketData>,
        dispatcher: NotificationDispatcher,
    ) -> Self {
        Self {
            store,
            provider,
            dispatcher,
        }
    }

    /// Run one scan over every network
    pub async fn run_cycle(&self) -> Result<ScanReport> {
        let mut report = ScanReport::default();

        for network in Network::ALL {
            if let Err(e) = self.scan_network(network, &mut report).await {
                warn!(network = network.id(), error = %e, "Alert scan failed for network");
                report.failed_networks.push(network);
            }
        }

        log_scan_result("gas_alerts", report.examined, report.delivered, report.skipped);
        Ok(report)
    }

    async fn scan_network(&self, network: Network, report: &mut ScanReport) -> Result<()> {
        let alert_keys = self.store.keys(&keys::alert_pattern(network)).await?;
        if alert_keys.is_empty() {
            debug!(network = network.id(), "No alerts for network");
            return Ok(());
        }

        let prices = match self.provider.gas_prices(network).await {
            Ok(prices) => prices,
            Err(e) => {
                log_api_error("gas_prices", &e.to_string(), Some(network.display_name()));
                report.failed_networks.push(network);
                return Ok(());
            }
        };

        for key in alert_keys {
            report.examined += 1;

            let Some(address) = keys::address_from_alert_key(&key, network) else {
                warn!(key = %key, "Alert key does not carry an address");
                report.skipped += 1;
                continue;
            };

            let raw = match self.store.get(&key).await {
                Ok(Some(raw)) => raw,
                // Deleted by the user between enumeration and read.
                Ok(None) => {
                    report.skipped += 1;
                    continue;
                }
                Err(e) => {
                    warn!(key = %key, error = %e, "Failed to read alert threshold");
                    report.skipped += 1;
                    continue;
                }
            };

            let Some(threshold) = parse_threshold(&raw) else {
                warn!(address = address, network = network.id(), value = %raw, "Unparsable alert threshold");
                report.skipped += 1;
                continue;
            };

            if !is_triggered(&prices, threshold) {
                continue;
            }

            match self.dispatcher.notify(address, &alert_message(network, &prices, threshold)).await {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    warn!(address = address, network = network.id(), error = %e, "Alert delivery failed");
                    report.skipped += 1;
                }
            }
        }

        Ok(())
    }
}

/// Whether the standard price is below the threshold
pub fn is_triggered(prices: &GasPrices, threshold: u64) -> bool {
    prices.standard < threshold as f64
}

pub fn alert_message(network: Network, prices: &GasPrices, threshold: u64) -> String {
    format!(
        "Gas price alert! The current gas price on {} is {:.2} Gwei, which is below your alert threshold of {} Gwei.",
        network.display_name(),
        prices.standard,
        threshold
    )
}
