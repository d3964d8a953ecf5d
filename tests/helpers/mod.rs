//! Test helpers module
//!
//! This module provides utilities and helpers for testing the OnChain bot.
//! It includes an in-process market data double, a recording notifier, a store
//! that fails on demand, wiremock
//! servers for the HTTP providers and the Telegram API, and test context setup.

#![allow(dead_code)]

pub mod failing_store;
pub mod market_mock;
pub mod provider_mock;
pub mod telegram_mock;
pub mod test_context;

pub use failing_store::*;
pub use market_mock::*;
pub use provider_mock::*;
pub use telegram_mock::*;
pub use test_context::*;
