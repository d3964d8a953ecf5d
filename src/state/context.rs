//! Conversation context management
//!
//! This module tracks which flow a user is in and at which step, and maps
//! that typed state onto the per-address keys of the session store.

use tracing::{debug, warn};
use crate::models::Network;
use crate::utils::errors::Result;
use crate::utils::helpers::escape_glob;
use super::storage::SessionStore;

/// Value of the subscription marker key
pub const SUBSCRIBED: &str = "subscribed";

/// Store key layout, all scoped by address
pub mod keys {
    use crate::models::Network;
    use crate::utils::helpers::escape_glob;

    /// Bare address key holding the subscription marker
    pub fn subscription(address: &str) -> String {
        address.to_string()
    }

    pub fn step(address: &str) -> String {
        format!("{}:step", address)
    }

    pub fn gas_step(address: &str) -> String {
        format!("{}:gas_step", address)
    }

    pub fn pending_wallet(address: &str) -> String {
        format!("{}:wallet", address)
    }

    pub fn pending_network(address: &str) -> String {
        format!("{}:gas_network", address)
    }

    pub fn linked_wallet(address: &str) -> String {
        format!("{}:linked_wallet", address)
    }

    pub fn alert(address: &str, network: Network) -> String {
        format!("{}:gas_alert:{}", address, network.id())
    }

    /// Every key under the address, excluding the bare subscription key
    pub fn namespace_pattern(address: &str) -> String {
        format!("{}:*", escape_glob(address))
    }

    pub fn alert_pattern(network: Network) -> String {
        format!("*:gas_alert:{}", network.id())
    }

    /// Recover the address from an alert key for the given network
    pub fn address_from_alert_key(key: &str, network: Network) -> Option<&str> {
        key.strip_suffix(&format!(":gas_alert:{}", network.id()))
            .filter(|address| !address.is_empty())
    }
}

/// The flows a session can be in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowKind {
    Menu,
    History,
    GasAlert,
}

/// Steps of the transaction history flow.
///
/// The pending wallet may be missing from the store; the flow only reads it
/// once the chain choice is valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryStep {
    AwaitingAddress,
    AwaitingChain { wallet: Option<String> },
}

/// Steps of the gas alert flow. A missing or unknown pending network is
/// `None` and only matters once a valid threshold arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GasStep {
    AwaitingNetwork,
    AwaitingConfirmation { network: Option<Network> },
    AwaitingThreshold { network: Option<Network> },
}

/// The single active flow of a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Idle,
    Menu,
    History(HistoryStep),
    GasAlert(GasStep),
    /// The store held a step value no flow knows
    Corrupted(FlowKind),
}

impl Flow {
    /// Decode the flat store fields into a flow.
    ///
    /// A non-zero gas step wins over the top-level step.
    pub fn decode(
        step: Option<&str>,
        gas_step: Option<&str>,
        wallet: Option<&str>,
        network: Option<&str>,
    ) -> Self {
        let network = network.and_then(Network::from_id);

        match gas_step.unwrap_or("0") {
            "0" => {}
            "1" => return Flow::GasAlert(GasStep::AwaitingNetwork),
            "2" => return Flow::GasAlert(GasStep::AwaitingConfirmation { network }),
            "3" => return Flow::GasAlert(GasStep::AwaitingThreshold { network }),
            _ => return Flow::Corrupted(FlowKind::GasAlert),
        }

        match step.unwrap_or("0") {
            "0" => Flow::Idle,
            "1" => Flow::Menu,
            "2" => Flow::History(HistoryStep::AwaitingAddress),
            "3" => Flow::History(HistoryStep::AwaitingChain { wallet: wallet.map(str::to_string) }),
            _ => Flow::Corrupted(FlowKind::Menu),
        }
    }

    /// Top-level step counter stored under `<address>:step`
    pub fn step(&self) -> u8 {
        match self {
            Flow::Menu => 1,
            Flow::History(HistoryStep::AwaitingAddress) => 2,
            Flow::History(HistoryStep::AwaitingChain { .. }) => 3,
            _ => 0,
        }
    }

    /// Gas flow step counter stored under `<address>:gas_step`
    pub fn gas_step(&self) -> u8 {
        match self {
            Flow::GasAlert(GasStep::AwaitingNetwork) => 1,
            Flow::GasAlert(GasStep::AwaitingConfirmation { .. }) => 2,
            Flow::GasAlert(GasStep::AwaitingThreshold { .. }) => 3,
            _ => 0,
        }
    }

    pub fn pending_wallet(&self) -> Option<&str> {
        match self {
            Flow::History(HistoryStep::AwaitingChain { wallet }) => wallet.as_deref(),
            _ => None,
        }
    }

    pub fn pending_network(&self) -> Option<Network> {
        match self {
            Flow::GasAlert(GasStep::AwaitingConfirmation { network })
            | Flow::GasAlert(GasStep::AwaitingThreshold { network }) => *network,
            _ => None,
        }
    }
}

/// Per-address conversation state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub address: String,
    pub flow: Flow,
}

impl Session {
    pub fn new(address: &str) -> Self {
        Self {
            address: address.to_string(),
            flow: Flow::Idle,
        }
    }

    /// Reconstruct the session for an address from the store
    pub async fn load(store: &dyn SessionStore, address: &str) -> Result<Self> {
        let step = store.get(&keys::step(address)).await?;
        let gas_step = store.get(&keys::gas_step(address)).await?;
        let wallet = store.get(&keys::pending_wallet(address)).await?;
        let network = store.get(&keys::pending_network(address)).await?;

        let flow = Flow::decode(step.as_deref(), gas_step.as_deref(), wallet.as_deref(), network.as_deref());
        if let Flow::Corrupted(kind) = flow {
            warn!(address = address, flow = ?kind, step = ?step, gas_step = ?gas_step,
                  "Session store holds an unresumable state");
        }

        debug!(address = address, flow = ?flow, "Session loaded");
        Ok(Self {
            address: address.to_string(),
            flow,
        })
    }

    /// Persist the session. A corrupted flow is written back as idle.
    pub async fn save(&self, store: &dyn SessionStore) -> Result<()> {
        let address = self.address.as_str();

        store.set(&keys::step(address), &self.flow.step().to_string()).await?;
        store.set(&keys::gas_step(address), &self.flow.gas_step().to_string()).await?;

        match self.flow.pending_wallet() {
            Some(wallet) => store.set(&keys::pending_wallet(address), wallet).await?,
            None => {
                store.delete(&keys::pending_wallet(address)).await?;
            }
        }

        match self.flow.pending_network() {
            Some(network) => store.set(&keys::pending_network(address), network.id()).await?,
            None => {
                store.delete(&keys::pending_network(address)).await?;
            }
        }

        debug!(address = address, flow = ?self.flow, "Session saved");
        Ok(())
    }

    /// Move to a new flow and persist it
    pub async fn transition(&mut self, store: &dyn SessionStore, flow: Flow) -> Result<()> {
        self.flow = flow;
        self.save(store).await
    }

    /// Delete every key of the address: subscription marker, session fields,
    /// alerts and the linked wallet. Returns the number of keys removed.
    pub async fn purge(store: &dyn SessionStore, address: &str) -> Result<usize> {
        let mut removed = 0;
        if store.delete(&keys::subscription(address)).await? {
            removed += 1;
        }

        for key in store.keys(&keys::namespace_pattern(address)).await? {
            if store.delete(&key).await? {
                removed += 1;
            }
        }

        debug!(address = address, removed = removed, pattern = %escape_glob(address), "Address namespace purged");
        Ok(removed)
    }
}

/// Mark an address as subscribed to the daily digest
pub async fn subscribe(store: &dyn SessionStore, address: &str) -> Result<()> {
    store.set(&keys::subscription(address), SUBSCRIBED).await
}

/// Whether the address carries the subscription marker
pub async fn is_subscribed(store: &dyn SessionStore, address: &str) -> Result<bool> {
    Ok(store.get(&keys::subscription(address)).await?.as_deref() == Some(SUBSCRIBED))
}
