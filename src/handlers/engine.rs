//! Dialog engine
//!
//! Turns one inbound text of an address into one reply. All conversation
//! context is read from the session store at the start of the call and
//! written back before it returns; the engine itself holds no per-user
//! state.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use crate::handlers::flows::{gas_alert, history};
use crate::handlers::{menu, texts, wait};
use crate::services::{MarketData, Notifier};
use crate::state::context::keys;
use crate::state::{Flow, Session, SessionStore};
use crate::utils::errors::{BotError, Result};
use crate::utils::helpers::{contains_stop_word, is_wallet_address};
use crate::utils::logging::log_user_action;

/// Reply to one inbound message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: Option<String>,
    /// Whether the menu should be shown after the reply
    pub show_menu: bool,
}

impl Reply {
    /// Only the menu, no body
    pub fn menu() -> Self {
        Self {
            text: None,
            show_menu: true,
        }
    }

    pub fn text(text: impl Into<String>, show_menu: bool) -> Self {
        Self {
            text: Some(text.into()),
            show_menu,
        }
    }
}

#[derive(Clone)]
pub struct DialogEngine {
    store: Arc<dyn SessionStore>,
    provider: Arc<dyn MarketData>,
    notifier: Arc<dyn Notifier>,
    wait_delay: Duration,
}

impl DialogEngine {
    pub fn new(
        store: Arc<dyn SessionStore>,
        provider: Arc<dyn MarketData>,
        notifier: Arc<dyn Notifier>,
        wait_delay: Duration,
    ) -> Self {
        Self {
            store,
            provider,
            notifier,
            wait_delay,
        }
    }

    pub fn store(&self) -> &dyn SessionStore {
        self.store.as_ref()
    }

    pub fn provider(&self) -> &dyn MarketData {
        self.provider.as_ref()
    }

    /// Handle one text message from `address`
    pub async fn handle(&self, address: &str, text: &str) -> Result<Reply> {
        let input = text.trim();

        if contains_stop_word(input) {
            return self.unsubscribe(address).await;
        }

        let mut session = Session::load(self.store(), address).await?;
        debug!(address = address, flow = ?session.flow, "Handling input");

        match session.flow.clone() {
            Flow::GasAlert(step) => gas_alert::advance(self, &mut session, step, input).await,
            Flow::Idle => {
                session.transition(self.store(), Flow::Menu).await?;
                Ok(Reply::menu())
            }
            Flow::Menu => menu::dispatch(self, &mut session, input).await,
            Flow::History(step) => history::advance(self, &mut session, step, input).await,
            Flow::Corrupted(kind) => {
                let reason = format!("unknown {:?} step", kind);
                self.reset_corrupted(&mut session, &reason).await
            }
        }
    }

    /// Answer an unresumable session with the generic error and put it back to idle
    pub async fn reset_corrupted(&self, session: &mut Session, reason: &str) -> Result<Reply> {
        let error = BotError::CorruptedState {
            address: session.address.clone(),
            reason: reason.to_string(),
        };
        warn!(severity = %error.severity(), "{}", error);

        session.transition(self.store(), Flow::Idle).await?;
        Ok(Reply::text(texts::GENERIC_ERROR, true))
    }

    /// Remove everything stored for the address and reset both step counters
    pub async fn unsubscribe(&self, address: &str) -> Result<Reply> {
        let removed = Session::purge(self.store(), address).await?;
        Session::new(address).save(self.store()).await?;

        let details = format!("{} keys removed", removed);
        log_user_action(address, "unsubscribe", Some(details.as_str()));
        Ok(Reply::text(texts::UNSUBSCRIBED, true))
    }

    /// Put the session back on the menu, as `/start` does
    pub async fn restart(&self, address: &str) -> Result<()> {
        let mut session = Session::load(self.store(), address).await?;
        session.transition(self.store(), Flow::Menu).await
    }

    /// Link a wallet to the address
    pub async fn link_wallet(&self, address: &str, wallet: &str) -> Result<Reply> {
        let wallet = wallet.trim();
        if !is_wallet_address(wallet) {
            return Ok(Reply::text(texts::INVALID_WALLET, false));
        }

        self.store.set(&keys::linked_wallet(address), wallet).await?;
        log_user_action(address, "link_wallet", Some(wallet));
        Ok(Reply::text(format!("Wallet {} linked. Balance and portfolio reports will use it.", wallet), false))
    }

    /// The wallet whose balances belong to the address: the address itself
    /// when it is a wallet, else the linked wallet
    pub async fn resolve_wallet(&self, address: &str) -> Result<Option<String>> {
        if is_wallet_address(address) {
            return Ok(Some(address.to_string()));
        }
        self.store.get(&keys::linked_wallet(address)).await
    }

    /// Current Bitcoin price reply
    pub async fn spot_price(&self, address: &str) -> Reply {
        match self.fetch(address, self.provider.spot_price()).await {
            Ok(price) => Reply::text(format!("The current Bitcoin price is ${}", price), false),
            Err(e) => {
                warn!(address = address, error = %e, "Spot price unavailable");
                Reply::text(texts::PRICE_FAILED, false)
            }
        }
    }

    /// Await a provider call, sending the wait notice if it is slow
    pub async fn fetch<F>(&self, address: &str, fetch: F) -> F::Output
    where
        F: Future,
    {
        wait::with_wait_notice(self.notifier.as_ref(), address, self.wait_delay, fetch).await
    }
}
