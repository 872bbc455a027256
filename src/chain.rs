//! Chain Definitions
//!
//! The single network the application talks to, plus explorer link helpers.

use serde::{Deserialize, Serialize};

/// Chain id of Base Sepolia
pub const BASE_SEPOLIA_CHAIN_ID: u64 = 84532;

/// Public RPC endpoint used when no RPC URL is configured
pub const DEFAULT_BASE_SEPOLIA_RPC_URL: &str = "https://sepolia.base.org";

/// An EVM network and its block explorer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chain {
    pub id: u64,
    pub name: String,
    pub rpc_url: String,
    pub explorer_name: String,
    /// Browser URL of the explorer (no trailing slash)
    pub explorer_url: String,
    /// Etherscan-compatible API endpoint of the explorer
    pub explorer_api_url: String,
    pub currency_symbol: String,
    pub currency_decimals: u8,
}

impl Chain {
    /// Base Sepolia test network
    pub fn base_sepolia() -> Self {
        Self {
            id: BASE_SEPOLIA_CHAIN_ID,
            name: "Base Sepolia".to_string(),
            rpc_url: DEFAULT_BASE_SEPOLIA_RPC_URL.to_string(),
            explorer_name: "BaseScan".to_string(),
            explorer_url: "https://sepolia.basescan.org".to_string(),
            explorer_api_url: "https://api-sepolia.basescan.org/api".to_string(),
            currency_symbol: "ETH".to_string(),
            currency_decimals: 18,
        }
    }

    /// Replace the RPC endpoint
    pub fn with_rpc_url(mut self, rpc_url: impl Into<String>) -> Self {
        self.rpc_url = rpc_url.into();
        self
    }

    /// Chain id as the `0x`-prefixed hex string wallets expect
    pub fn hex_id(&self) -> String {
        format!("{:#x}", self.id)
    }

    /// Explorer page for a transaction
    pub fn tx_url(&self, tx_hash: &str) -> String {
        format!("{}/tx/{}", self.explorer_url, tx_hash)
    }

    /// Explorer page for an account or contract
    pub fn address_url(&self, address: &str) -> String {
        format!("{}/address/{}", self.explorer_url, address)
    }
}

impl Default for Chain {
    fn default() -> Self {
        Self::base_sepolia()
    }
}

impl std::fmt::Display for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (Chain ID: {})", self.name, self.id)
    }
}
