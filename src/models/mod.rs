//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod market;
pub mod network;

// Re-export commonly used models
pub use market::{GasPrices, Holding, PortfolioAnalytics};
pub use network::{Chain, Network};
