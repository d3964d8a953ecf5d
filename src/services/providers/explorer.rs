//! Block explorer client (Etherscan and its Polygon and BSC siblings)

use std::fmt::Write as _;
use chrono::{TimeZone, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use crate::config::ProvidersConfig;
use crate::models::{Chain, GasPrices, Network};
use crate::utils::errors::{ProviderError, ProviderResult};
use crate::utils::helpers::{format_timestamp, format_units, truncate_text};
use super::get_json;

/// Number of transactions listed in a history report
const HISTORY_LIMIT: usize = 10;

#[derive(Debug, Clone, Deserialize)]
struct ExplorerResponse {
    status: String,
    message: String,
    result: Value,
}

/// One transaction of the `txlist` action
#[derive(Debug, Clone, Deserialize)]
pub struct Transaction {
    pub hash: String,
    pub from: String,
    #[serde(default)]
    pub to: String,
    pub value: String,
    pub input: String,
    #[serde(rename = "timeStamp")]
    pub time_stamp: String,
}

impl Transaction {
    pub fn category(&self) -> &'static str {
        if self.input != "0x" {
            "Contract Interaction"
        } else if self.from.eq_ignore_ascii_case(&self.to) {
            "Self Transfer"
        } else if self.value == "0" {
            "Zero Value Transfer"
        } else {
            "Token Transfer"
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GasOracle {
    safe_gas_price: String,
    propose_gas_price: String,
    fast_gas_price: String,
    #[serde(rename = "suggestBaseFee")]
    suggest_base_fee: String,
}

#[derive(Debug, Clone)]
struct Explorer {
    url: String,
    api_key: String,
}

#[derive(Debug, Clone)]
pub struct ExplorerClient {
    client: Client,
    ethereum: Explorer,
    polygon: Explorer,
    bsc: Explorer,
}

impl ExplorerClient {
    pub fn new(client: Client, config: &ProvidersConfig) -> Self {
        Self {
            client,
            ethereum: Explorer {
                url: config.etherscan_url.clone(),
                api_key: config.etherscan_api_key.clone(),
            },
            polygon: Explorer {
                url: config.polygonscan_url.clone(),
                api_key: config.polygonscan_api_key.clone(),
            },
            bsc: Explorer {
                url: config.bscscan_url.clone(),
                api_key: config.bscscan_api_key.clone(),
            },
        }
    }

    fn for_chain(&self, chain: Chain) -> &Explorer {
        match chain {
            Chain::Ethereum => &self.ethereum,
            Chain::Polygon => &self.polygon,
            Chain::BinanceSmartChain => &self.bsc,
        }
    }

    fn for_network(&self, network: Network) -> &Explorer {
        match network {
            Network::Ethereum => &self.ethereum,
            Network::Polygon => &self.polygon,
        }
    }

    /// Most recent transactions of a wallet, newest first
    pub async fn recent_transactions(&self, wallet: &str, chain: Chain) -> ProviderResult<Vec<Transaction>> {
        let explorer = self.for_chain(chain);
        let response: ExplorerResponse = get_json(self.client.get(&explorer.url).query(&[
            ("module", "account"),
            ("action", "txlist"),
            ("address", wallet),
            ("startblock", "0"),
            ("endblock", "99999999"),
            ("sort", "desc"),
            ("apikey", explorer.api_key.as_str()),
        ])).await?;

        if response.status != "1" {
            if response.message.starts_with("No transactions found") {
                return Ok(Vec::new());
            }
            return Err(ProviderError::InvalidResponse(format!("txlist: {}", response.message)));
        }

        let mut transactions: Vec<Transaction> = serde_json::from_value(response.result)
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;
        transactions.truncate(HISTORY_LIMIT);

        debug!(chain = chain.slug(), count = transactions.len(), "Fetched transactions");
        Ok(transactions)
    }

    pub async fn transaction_history(&self, wallet: &str, chain: Chain) -> ProviderResult<String> {
        let transactions = self.recent_transactions(wallet, chain).await?;
        Ok(format_history(wallet, chain, &transactions))
    }

    pub async fn gas_prices(&self, network: Network) -> ProviderResult<GasPrices> {
        let explorer = self.for_network(network);
        let response: ExplorerResponse = get_json(self.client.get(&explorer.url).query(&[
            ("module", "gastracker"),
            ("action", "gasoracle"),
            ("apikey", explorer.api_key.as_str()),
        ])).await?;

        if response.status != "1" || response.message != "OK" {
            return Err(ProviderError::RequestFailed(format!("API Error: {}", response.message)));
        }

        let oracle: GasOracle = serde_json::from_value(response.result)
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        Ok(GasPrices {
            safe: parse_gwei(&oracle.safe_gas_price)?,
            standard: parse_gwei(&oracle.propose_gas_price)?,
            fast: parse_gwei(&oracle.fast_gas_price)?,
            base_fee: parse_gwei(&oracle.suggest_base_fee)?,
        })
    }
}

fn parse_gwei(value: &str) -> ProviderResult<f64> {
    value
        .trim()
        .parse()
        .map_err(|_| ProviderError::InvalidResponse(format!("invalid gas price '{}'", value)))
}

/// Render the transaction history report
pub fn format_history(wallet: &str, chain: Chain, transactions: &[Transaction]) -> String {
    if transactions.is_empty() {
        return format!("No recent transactions found for {}.", wallet);
    }

    let mut report = format!("Recent transactions for {}:\n\n", wallet);
    let mut summary: Vec<(&'static str, usize)> = Vec::new();

    for (index, tx) in transactions.iter().enumerate() {
        let date = tx
            .time_stamp
            .parse::<i64>()
            .ok()
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
            .map(format_timestamp)
            .unwrap_or_else(|| tx.time_stamp.clone());
        let value = format_units(&tx.value, 18).unwrap_or_else(|| tx.value.clone());
        let category = tx.category();

        let _ = writeln!(report, "{}. {}", index + 1, date);
        let _ = writeln!(report, "   Type: {}", category);
        let _ = writeln!(report, "   Value: {} {}", value, chain.native_symbol());
        let _ = writeln!(report, "   To: {}", tx.to);
        let _ = writeln!(report, "   Hash: {}\n", truncate_text(&tx.hash, 13));

        match summary.iter_mut().find(|(kind, _)| *kind == category) {
            Some((_, count)) => *count += 1,
            None => summary.push((category, 1)),
        }
    }

    report.push_str("Transaction Summary:\n");
    for (kind, count) in summary {
        let _ = writeln!(report, "{}: {}", kind, count);
    }

    report
}
