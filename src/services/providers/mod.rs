//! External market data providers
//!
//! Every fetch the bot makes goes through the [`MarketData`] trait so the
//! dialog engine and the background tasks never talk HTTP directly. Each call
//! makes a single attempt and fails with a [`ProviderError`].

pub mod coingecko;
pub mod covalent;
pub mod explorer;

use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use crate::config::ProvidersConfig;
use crate::models::{Chain, GasPrices, Network, PortfolioAnalytics};
use crate::utils::errors::{BotError, ProviderResult, Result};

pub use coingecko::CoinGeckoClient;
pub use covalent::CovalentClient;
pub use explorer::ExplorerClient;

/// Market data consumed by the bot
#[async_trait]
pub trait MarketData: Send + Sync {
    /// Current Bitcoin price in USD, formatted with two decimals
    async fn spot_price(&self) -> ProviderResult<String>;

    /// Top coins and market sentiment, formatted for a chat message
    async fn market_summary(&self) -> ProviderResult<String>;

    /// Balances of a wallet across the supported chains, formatted
    async fn account_balance(&self, wallet: &str) -> ProviderResult<String>;

    async fn portfolio_analytics(&self, wallet: &str) -> ProviderResult<PortfolioAnalytics>;

    /// Recent transactions of a wallet on one chain, formatted
    async fn transaction_history(&self, wallet: &str, chain: Chain) -> ProviderResult<String>;

    async fn gas_prices(&self, network: Network) -> ProviderResult<GasPrices>;
}

/// HTTP-backed market data
#[derive(Debug, Clone)]
pub struct HttpMarketData {
    coingecko: CoinGeckoClient,
    covalent: CovalentClient,
    explorer: ExplorerClient,
}

impl HttpMarketData {
    /// Create the provider clients sharing one HTTP client
    pub fn new(config: ProvidersConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("OnChain-Bot/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(BotError::Http)?;

        Ok(Self {
            coingecko: CoinGeckoClient::new(client.clone(), &config),
            covalent: CovalentClient::new(client.clone(), &config),
            explorer: ExplorerClient::new(client, &config),
        })
    }
}

#[async_trait]
impl MarketData for HttpMarketData {
    async fn spot_price(&self) -> ProviderResult<String> {
        self.coingecko.bitcoin_price().await
    }

    async fn market_summary(&self) -> ProviderResult<String> {
        self.coingecko.market_summary().await
    }

    async fn account_balance(&self, wallet: &str) -> ProviderResult<String> {
        self.covalent.account_balance(wallet).await
    }

    async fn portfolio_analytics(&self, wallet: &str) -> ProviderResult<PortfolioAnalytics> {
        self.covalent.portfolio_analytics(wallet).await
    }

    async fn transaction_history(&self, wallet: &str, chain: Chain) -> ProviderResult<String> {
        self.explorer.transaction_history(wallet, chain).await
    }

    async fn gas_prices(&self, network: Network) -> ProviderResult<GasPrices> {
        self.explorer.gas_prices(network).await
    }
}

/// Send a GET request and decode the JSON body, mapping failures to provider errors
pub(crate) async fn get_json<T>(request: reqwest::RequestBuilder) -> ProviderResult<T>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let response = request.send().await?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        return Err(crate::utils::errors::ProviderError::RequestFailed(
            format!("HTTP {}: {}", status, error_text)
        ));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| crate::utils::errors::ProviderError::InvalidResponse(e.to_string()))
}
