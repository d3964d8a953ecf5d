//! Covalent balances client
//!
//! Fetches token balances for a wallet on every supported chain and derives
//! the balance report and the portfolio analytics from them.

use std::collections::HashMap;
use std::fmt::Write as _;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use crate::config::ProvidersConfig;
use crate::models::{Holding, PortfolioAnalytics};
use crate::utils::errors::{ProviderError, ProviderResult};
use super::get_json;

/// Chains whose balances make up an account (Covalent chain id, display name)
pub const BALANCE_CHAINS: [(&str, &str); 3] = [
    ("1", "Ethereum"),
    ("137", "Polygon"),
    ("56", "Binance Smart Chain"),
];

/// How many holdings the analytics report lists
const TOP_HOLDINGS: usize = 5;

#[derive(Debug, Clone, Deserialize)]
struct BalancesResponse {
    data: BalancesData,
}

#[derive(Debug, Clone, Deserialize)]
struct BalancesData {
    items: Vec<BalanceItem>,
}

/// One token balance as reported by Covalent
#[derive(Debug, Clone, Deserialize)]
pub struct BalanceItem {
    pub contract_ticker_symbol: Option<String>,
    pub contract_decimals: Option<u32>,
    pub balance: Option<String>,
    pub quote: Option<f64>,
    pub quote_24h: Option<f64>,
}

impl BalanceItem {
    /// Token amount scaled by the contract decimals
    pub fn amount(&self) -> f64 {
        let raw: f64 = self.balance.as_deref().and_then(|b| b.parse().ok()).unwrap_or(0.0);
        raw / 10f64.powi(self.contract_decimals.unwrap_or(0) as i32)
    }

    pub fn symbol(&self) -> &str {
        self.contract_ticker_symbol.as_deref().unwrap_or("UNKNOWN")
    }

    /// Whether the item has a non-zero balance with a positive USD quote
    pub fn is_priced(&self) -> bool {
        self.balance.as_deref().map_or(false, |b| b != "0") && self.quote.unwrap_or(0.0) > 0.0
    }
}

/// Balances of one chain
#[derive(Debug, Clone)]
pub struct ChainBalances {
    pub chain_name: String,
    pub items: Vec<BalanceItem>,
}

#[derive(Debug, Clone)]
pub struct CovalentClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl CovalentClient {
    pub fn new(client: Client, config: &ProvidersConfig) -> Self {
        Self {
            client,
            base_url: config.covalent_url.trim_end_matches('/').to_string(),
            api_key: config.covalent_api_key.clone(),
        }
    }

    /// Fetch balances on every supported chain
    pub async fn fetch_balances(&self, wallet: &str) -> ProviderResult<Vec<ChainBalances>> {
        let mut balances = Vec::with_capacity(BALANCE_CHAINS.len());

        for (chain_id, chain_name) in BALANCE_CHAINS {
            let url = format!("{}/{}/address/{}/balances_v2/", self.base_url, chain_id, wallet);
            let response: BalancesResponse = get_json(
                self.client.get(&url).bearer_auth(&self.api_key)
            ).await?;

            debug!(chain = chain_name, items = response.data.items.len(), "Fetched balances");
            balances.push(ChainBalances {
                chain_name: chain_name.to_string(),
                items: response.data.items,
            });
        }

        Ok(balances)
    }

    pub async fn account_balance(&self, wallet: &str) -> ProviderResult<String> {
        let balances = self.fetch_balances(wallet).await?;
        Ok(format_balances(&balances))
    }

    pub async fn portfolio_analytics(&self, wallet: &str) -> ProviderResult<PortfolioAnalytics> {
        let balances = self.fetch_balances(wallet).await?;
        compute_portfolio(&balances)
    }
}

/// Render the balance report
pub fn format_balances(balances: &[ChainBalances]) -> String {
    let mut details = String::from("Your account balances:\n\n");
    let mut total_usd = 0.0;

    for chain in balances {
        let _ = writeln!(details, "{}:", chain.chain_name);
        let mut chain_total = 0.0;

        for item in chain.items.iter().filter(|item| item.is_priced()) {
            let quote = item.quote.unwrap_or(0.0);
            let _ = writeln!(details, "- {:.4} {}: ${:.2}", item.amount(), item.symbol(), quote);
            chain_total += quote;
        }

        let _ = writeln!(details, "Total on {}: ${:.2}\n", chain.chain_name, chain_total);
        total_usd += chain_total;
    }

    let _ = write!(details, "\nTotal balance across all chains: ${:.2}", total_usd);
    details
}

/// Aggregate holdings across chains into portfolio analytics
pub fn compute_portfolio(balances: &[ChainBalances]) -> ProviderResult<PortfolioAnalytics> {
    let mut values: HashMap<String, (f64, f64)> = HashMap::new();

    for item in balances.iter().flat_map(|chain| chain.items.iter()).filter(|item| item.is_priced()) {
        let quote = item.quote.unwrap_or(0.0);
        let previous = item.quote_24h.unwrap_or(quote);
        let entry = values.entry(item.symbol().to_string()).or_insert((0.0, 0.0));
        entry.0 += quote;
        entry.1 += previous;
    }

    if values.is_empty() {
        return Err(ProviderError::InvalidResponse("no valid token balances found".to_string()));
    }

    let total_value: f64 = values.values().map(|(now, _)| now).sum();
    let previous_value: f64 = values.values().map(|(_, before)| before).sum();
    let daily_change = if previous_value > 0.0 {
        (total_value - previous_value) / previous_value
    } else {
        0.0
    };

    let mut ranked: Vec<(String, f64)> = values.into_iter().map(|(symbol, (now, _))| (symbol, now)).collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let top_holdings = ranked
        .into_iter()
        .take(TOP_HOLDINGS)
        .map(|(symbol, value)| Holding {
            symbol,
            share: value / total_value,
        })
        .collect();

    Ok(PortfolioAnalytics {
        total_value,
        daily_change,
        top_holdings,
    })
}
