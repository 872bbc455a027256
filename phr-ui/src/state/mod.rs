//! State Management
//!
//! Global application state and the wallet connection.

pub mod global;
pub mod wallet;

pub use global::{provide_global_state, BrowserAlert, GlobalState};
pub use wallet::{provide_wallet_context, WalletContext};
