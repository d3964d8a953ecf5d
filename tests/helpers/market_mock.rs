//! Scripted market data and a recording notifier
//!
//! Every provider call succeeds with a canned answer unless the test scripts a
//! failure. Calls are recorded so tests can assert how often a provider was hit.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;
use async_trait::async_trait;
use onchain_bot::models::{Chain, GasPrices, Holding, Network, PortfolioAnalytics};
use onchain_bot::services::{MarketData, Notifier};
use onchain_bot::utils::errors::{BotError, ProviderError, ProviderResult, Result};

pub const SUMMARY_TEXT: &str = "Top 3 Cryptocurrencies by Market Cap:\n\n1. Bitcoin (BTC):\n   Price: $64000.00\n";
pub const BALANCE_TEXT: &str = "Your account balances:\n\nEthereum:\n- 1.0000 ETH: $3000.00\n";
pub const HISTORY_TEXT: &str = "Recent transactions for 0xwallet:\n\n1. 2024-01-01 00:00:00 UTC\n";

struct MockState {
    spot_price: Option<String>,
    market_summary: Option<String>,
    balance: Option<String>,
    portfolio: Option<PortfolioAnalytics>,
    history: Option<String>,
    gas: HashMap<Network, GasPrices>,
    delay: Duration,
    calls: Vec<String>,
}

pub struct MockMarketData {
    state: Mutex<MockState>,
}

impl Default for MockMarketData {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMarketData {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MockState {
                spot_price: Some("64000.00".to_string()),
                market_summary: Some(SUMMARY_TEXT.to_string()),
                balance: Some(BALANCE_TEXT.to_string()),
                portfolio: Some(PortfolioAnalytics {
                    total_value: 3000.0,
                    daily_change: 0.02,
                    top_holdings: vec![Holding { symbol: "ETH".to_string(), share: 1.0 }],
                }),
                history: Some(HISTORY_TEXT.to_string()),
                gas: HashMap::new(),
                delay: Duration::ZERO,
                calls: Vec::new(),
            }),
        }
    }

    /// Serve gas prices for a network with the given standard price
    pub fn with_gas(self, network: Network, standard: f64) -> Self {
        self.state.lock().unwrap().gas.insert(network, gas_prices(standard));
        self
    }

    pub fn with_delay(self, delay: Duration) -> Self {
        self.state.lock().unwrap().delay = delay;
        self
    }

    pub fn set_gas(&self, network: Network, standard: Option<f64>) {
        let mut state = self.state.lock().unwrap();
        match standard {
            Some(standard) => state.gas.insert(network, gas_prices(standard)),
            None => state.gas.remove(&network),
        };
    }

    pub fn fail_market_summary(&self) {
        self.state.lock().unwrap().market_summary = None;
    }

    pub fn fail_balance(&self) {
        self.state.lock().unwrap().balance = None;
    }

    pub fn fail_history(&self) {
        self.state.lock().unwrap().history = None;
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Calls named exactly `name`, or `name` followed by `:` and arguments
    pub fn call_count(&self, name: &str) -> usize {
        let with_args = format!("{}:", name);
        self.calls()
            .iter()
            .filter(|call| call.as_str() == name || call.starts_with(&with_args))
            .count()
    }

    async fn answer<T: Clone>(&self, call: String, pick: impl FnOnce(&MockState) -> Option<T>) -> ProviderResult<T> {
        let (delay, answer) = {
            let mut state = self.state.lock().unwrap();
            state.calls.push(call.clone());
            (state.delay, pick(&state))
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        answer.ok_or_else(|| ProviderError::RequestFailed(format!("{} scripted to fail", call)))
    }
}

pub fn gas_prices(standard: f64) -> GasPrices {
    GasPrices {
        safe: standard - 2.0,
        standard,
        fast: standard + 3.0,
        base_fee: standard - 2.5,
    }
}

#[async_trait]
impl MarketData for MockMarketData {
    async fn spot_price(&self) -> ProviderResult<String> {
        self.answer("spot_price".to_string(), |s| s.spot_price.clone()).await
    }

    async fn market_summary(&self) -> ProviderResult<String> {
        self.answer("market_summary".to_string(), |s| s.market_summary.clone()).await
    }

    async fn account_balance(&self, wallet: &str) -> ProviderResult<String> {
        self.answer(format!("account_balance:{}", wallet), |s| s.balance.clone()).await
    }

    async fn portfolio_analytics(&self, wallet: &str) -> ProviderResult<PortfolioAnalytics> {
        self.answer(format!("portfolio_analytics:{}", wallet), |s| s.portfolio.clone()).await
    }

    async fn transaction_history(&self, wallet: &str, chain: Chain) -> ProviderResult<String> {
        self.answer(format!("transaction_history:{}:{}", wallet, chain.slug()), |s| s.history.clone()).await
    }

    async fn gas_prices(&self, network: Network) -> ProviderResult<GasPrices> {
        self.answer(format!("gas_prices:{}", network.id()), |s| s.gas.get(&network).copied()).await
    }
}

/// Notifier that records every message instead of sending it
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(String, String)>>,
    unreachable: Mutex<HashSet<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make deliveries to `address` fail as if it had no destination
    pub fn make_unreachable(&self, address: &str) {
        self.unreachable.lock().unwrap().insert(address.to_string());
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_to(&self, address: &str) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter(|(to, _)| to == address)
            .map(|(_, text)| text)
            .collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, address: &str, text: &str) -> Result<()> {
        if self.unreachable.lock().unwrap().contains(address) {
            return Err(BotError::UnknownDestination(address.to_string()));
        }
        self.sent.lock().unwrap().push((address.to_string(), text.to_string()));
        Ok(())
    }
}
