//! Wallet Context
//!
//! Connection settings handed to the wallet provider and the connection
//! state it exposes to the rest of the application.

use serde::{Deserialize, Serialize};

use crate::chain::Chain;

/// Application name announced to wallets
pub const DEFAULT_APP_NAME: &str = "PHR On-Chain";

/// Placeholder wallet-connect project id used when none is configured
pub const PLACEHOLDER_PROJECT_ID: &str = "demo-project-id";

/// Settings for the wallet provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletConfig {
    pub app_name: String,
    pub project_id: String,
    pub chain: Chain,
}

impl WalletConfig {
    /// Build a config, falling back to the placeholder project id when
    /// `project_id` is missing or blank
    pub fn new(app_name: impl Into<String>, project_id: Option<&str>, chain: Chain) -> Self {
        let project_id = project_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .unwrap_or(PLACEHOLDER_PROJECT_ID)
            .to_string();

        Self {
            app_name: app_name.into(),
            project_id,
            chain,
        }
    }

    /// Whether a real project id was supplied
    pub fn has_project_id(&self) -> bool {
        self.project_id != PLACEHOLDER_PROJECT_ID
    }
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self::new(DEFAULT_APP_NAME, None, Chain::base_sepolia())
    }
}

/// Connection state published by the wallet provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletState {
    address: Option<String>,
    connected: bool,
}

impl WalletState {
    /// No account connected
    pub fn disconnected() -> Self {
        Self::default()
    }

    /// Connected with the given account
    pub fn connected(address: impl Into<String>) -> Self {
        Self {
            address: Some(address.into()),
            connected: true,
        }
    }

    /// Build from the account list a wallet reports. An empty list means
    /// the user disconnected.
    pub fn from_accounts<S: AsRef<str>>(accounts: &[S]) -> Self {
        accounts
            .first()
            .map(|a| a.as_ref().trim())
            .filter(|a| !a.is_empty())
            .map(Self::connected)
            .unwrap_or_default()
    }

    /// True only when connected and an address is known
    pub fn is_connected(&self) -> bool {
        self.connected && self.address.is_some()
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Shortened address for display, e.g. `0x1234…abcd`
    pub fn short_address(&self) -> Option<String> {
        self.address.as_deref().map(|addr| {
            if addr.len() <= 10 || !addr.is_ascii() {
                addr.to_string()
            } else {
                format!("{}…{}", &addr[..6], &addr[addr.len() - 4..])
            }
        })
    }
}
