//! Market data models returned by the providers

use serde::{Deserialize, Serialize};

/// Gas prices for one network, in Gwei
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GasPrices {
    pub safe: f64,
    pub standard: f64,
    pub fast: f64,
    pub base_fee: f64,
}

/// Share of one token in a portfolio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub symbol: String,
    /// Fraction of the total value, 0.0..=1.0
    pub share: f64,
}

/// Portfolio analytics for one wallet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioAnalytics {
    pub total_value: f64,
    /// Relative change of the total value over the last 24h
    pub daily_change: f64,
    pub top_holdings: Vec<Holding>,
}
