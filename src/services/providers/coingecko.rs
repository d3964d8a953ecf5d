//! CoinGecko and Fear & Greed index client
//!
//! Supplies the Bitcoin spot price and the market summary used both for the
//! "market sentiment" menu option and the daily digest.

use std::collections::HashMap;
use std::fmt::Write as _;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use crate::config::ProvidersConfig;
use crate::utils::errors::{ProviderError, ProviderResult};
use super::get_json;

/// One entry of `/coins/markets`
#[derive(Debug, Clone, Deserialize)]
pub struct CoinMarket {
    pub name: String,
    pub symbol: String,
    pub current_price: f64,
    pub market_cap: f64,
    pub price_change_percentage_24h: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
struct FearGreedResponse {
    data: Vec<FearGreedEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FearGreedEntry {
    pub value: String,
    pub value_classification: String,
}

#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    client: Client,
    base_url: String,
    fear_greed_url: String,
}

impl CoinGeckoClient {
    pub fn new(client: Client, config: &ProvidersConfig) -> Self {
        Self {
            client,
            base_url: config.coingecko_url.trim_end_matches('/').to_string(),
            fear_greed_url: config.fear_greed_url.clone(),
        }
    }

    /// Current Bitcoin price in USD
    pub async fn bitcoin_price(&self) -> ProviderResult<String> {
        let url = format!("{}/simple/price", self.base_url);
        let prices: HashMap<String, HashMap<String, f64>> = get_json(
            self.client.get(&url).query(&[("ids", "bitcoin"), ("vs_currencies", "usd")])
        ).await?;

        let usd = prices
            .get("bitcoin")
            .and_then(|quotes| quotes.get("usd"))
            .ok_or_else(|| ProviderError::InvalidResponse("missing bitcoin/usd quote".to_string()))?;

        Ok(format!("{:.2}", usd))
    }

    /// Top three coins by market cap plus the Fear & Greed index
    pub async fn market_summary(&self) -> ProviderResult<String> {
        let url = format!("{}/coins/markets", self.base_url);
        let coins: Vec<CoinMarket> = get_json(self.client.get(&url).query(&[
            ("vs_currency", "usd"),
            ("order", "market_cap_desc"),
            ("per_page", "3"),
            ("page", "1"),
            ("sparkline", "false"),
            ("price_change_percentage", "24h"),
        ])).await?;
        debug!(count = coins.len(), "Fetched top coins");

        let sentiment: FearGreedResponse = get_json(self.client.get(&self.fear_greed_url)).await?;
        let sentiment = sentiment
            .data
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::InvalidResponse("empty fear and greed index".to_string()))?;

        Ok(format_market_summary(&coins, &sentiment))
    }
}

/// Render the market summary message
pub fn format_market_summary(coins: &[CoinMarket], sentiment: &FearGreedEntry) -> String {
    let mut summary = String::from("Top 3 Cryptocurrencies by Market Cap:\n\n");

    for (index, coin) in coins.iter().enumerate() {
        let _ = writeln!(summary, "{}. {} ({}):", index + 1, coin.name, coin.symbol.to_uppercase());
        let _ = writeln!(summary, "   Price: ${:.2}", coin.current_price);
        let _ = writeln!(summary, "   Market Cap: ${:.2} billion", coin.market_cap / 1e9);
        let _ = writeln!(summary, "   24h Change: {:.2}%\n", coin.price_change_percentage_24h.unwrap_or(0.0));
    }

    summary.push_str("Market Sentiment (Fear and Greed Index):\n");
    let _ = writeln!(summary, "Value: {}", sentiment.value);
    let _ = writeln!(summary, "Classification: {}", sentiment.value_classification);

    summary
}
