//! Chain and network models

use serde::{Deserialize, Serialize};

/// Networks supported by the gas alert flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Network {
    Ethereum,
    Polygon,
}

impl Network {
    pub const ALL: [Network; 2] = [Network::Ethereum, Network::Polygon];

    /// Map a menu selection (`"1"`, `"2"`) to a network
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice {
            "1" => Some(Network::Ethereum),
            "2" => Some(Network::Polygon),
            _ => None,
        }
    }

    /// Chain id used in store keys
    pub fn id(&self) -> &'static str {
        match self {
            Network::Ethereum => "1",
            Network::Polygon => "137",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|network| network.id() == id)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Network::Ethereum => "Ethereum",
            Network::Polygon => "Polygon",
        }
    }
}

/// Chains supported by the transaction history flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Chain {
    Ethereum,
    Polygon,
    BinanceSmartChain,
}

impl Chain {
    /// Map a menu selection (`"1"`..`"3"`) to a chain
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice {
            "1" => Some(Chain::Ethereum),
            "2" => Some(Chain::Polygon),
            "3" => Some(Chain::BinanceSmartChain),
            _ => None,
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Chain::Ethereum => "ethereum",
            Chain::Polygon => "polygon",
            Chain::BinanceSmartChain => "bsc",
        }
    }

    /// Ticker of the native coin transaction values are denominated in
    pub fn native_symbol(&self) -> &'static str {
        match self {
            Chain::Ethereum => "ETH",
            Chain::Polygon => "MATIC",
            Chain::BinanceSmartChain => "BNB",
        }
    }
}
