//! Mock market data APIs for testing
//!
//! One wiremock server stands in for CoinGecko, the Fear & Greed index,
//! Covalent and the three block explorers, each under its own path prefix.

use serde_json::{json, Value};
use wiremock::{
    matchers::{header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};
use onchain_bot::config::ProvidersConfig;

pub const COVALENT_KEY: &str = "covalent-test-key";

pub struct ProviderMockServer {
    pub server: MockServer,
}

impl ProviderMockServer {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Provider configuration pointing every client at this server
    pub fn config(&self) -> ProvidersConfig {
        let uri = self.server.uri();
        ProvidersConfig {
            coingecko_url: format!("{}/coingecko", uri),
            fear_greed_url: format!("{}/fng/", uri),
            covalent_url: format!("{}/covalent", uri),
            covalent_api_key: COVALENT_KEY.to_string(),
            etherscan_url: format!("{}/etherscan/api", uri),
            etherscan_api_key: "etherscan-key".to_string(),
            polygonscan_url: format!("{}/polygonscan/api", uri),
            polygonscan_api_key: "polygonscan-key".to_string(),
            bscscan_url: format!("{}/bscscan/api", uri),
            bscscan_api_key: "bscscan-key".to_string(),
            timeout_seconds: 5,
        }
    }

    pub async fn mock_bitcoin_price(&self, usd: f64) {
        Mock::given(method("GET"))
            .and(path("/coingecko/simple/price"))
            .and(query_param("ids", "bitcoin"))
            .and(query_param("vs_currencies", "usd"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "bitcoin": { "usd": usd } })))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_market_summary(&self) {
        Mock::given(method("GET"))
            .and(path("/coingecko/coins/markets"))
            .and(query_param("per_page", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "name": "Bitcoin", "symbol": "btc", "current_price": 64000.0,
                  "market_cap": 1260000000000.0_f64, "price_change_percentage_24h": 1.5 },
                { "name": "Ethereum", "symbol": "eth", "current_price": 3000.0,
                  "market_cap": 360000000000.0_f64, "price_change_percentage_24h": -0.75 },
                { "name": "Tether", "symbol": "usdt", "current_price": 1.0,
                  "market_cap": 110000000000.0_f64, "price_change_percentage_24h": null }
            ])))
            .mount(&self.server)
            .await;

        Mock::given(method("GET"))
            .and(path("/fng/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "Fear and Greed Index",
                "data": [{ "value": "72", "value_classification": "Greed", "timestamp": "1700000000" }]
            })))
            .mount(&self.server)
            .await;
    }

    /// Serve balance items for one wallet on one Covalent chain
    pub async fn mock_balances(&self, wallet: &str, chain_id: &str, items: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/covalent/{}/address/{}/balances_v2/", chain_id, wallet)))
            .and(header("authorization", format!("Bearer {}", COVALENT_KEY).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "address": wallet, "items": items },
                "error": false
            })))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_txlist(&self, explorer: &str, wallet: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/{}/api", explorer)))
            .and(query_param("module", "account"))
            .and(query_param("action", "txlist"))
            .and(query_param("address", wallet))
            .and(query_param("sort", "desc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_gas_oracle(&self, explorer: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/{}/api", explorer)))
            .and(query_param("module", "gastracker"))
            .and(query_param("action", "gasoracle"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_status(&self, route: &str, status: u16) {
        Mock::given(method("GET"))
            .and(path(route.to_string()))
            .respond_with(ResponseTemplate::new(status).set_body_string("upstream unavailable"))
            .mount(&self.server)
            .await;
    }
}

/// Explorer gas oracle payload
pub fn gas_oracle_body(safe: &str, propose: &str, fast: &str, base_fee: &str) -> Value {
    json!({
        "status": "1",
        "message": "OK",
        "result": {
            "LastBlock": "19000000",
            "SafeGasPrice": safe,
            "ProposeGasPrice": propose,
            "FastGasPrice": fast,
            "suggestBaseFee": base_fee,
            "gasUsedRatio": "0.5,0.4"
        }
    })
}

pub fn transaction(hash: &str, from: &str, to: &str, value: &str, input: &str, time_stamp: &str) -> Value {
    json!({
        "blockNumber": "19000000",
        "timeStamp": time_stamp,
        "hash": hash,
        "from": from,
        "to": to,
        "value": value,
        "gas": "21000",
        "gasPrice": "20000000000",
        "gasUsed": "21000",
        "input": input,
        "isError": "0"
    })
}
