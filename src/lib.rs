//! # PHR On-Chain
//!
//! Personal health records with on-chain anchoring. Users submit weight,
//! blood pressure and step count from a connected wallet; the backend
//! returns an LLM summary and the hash of the Base Sepolia transaction
//! anchoring the data.
//!
//! ## Modules
//!
//! - [`submission`]: form state, validation, the submission API client
//! - [`display`]: result panel, bounded history and chart series
//! - [`wallet`] / [`chain`]: wallet provider settings and connection state
//! - [`platform`]: startup choice between interactive and static rendering
//! - `config`, `logging`, `deploy` (feature `native`): configuration,
//!   tracing setup and the registry contract deployment pipeline
//!
//! The browser front end in `phr-ui` builds on this crate with default
//! features disabled.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use phr_onchain::submission::{HttpSubmissionClient, Notifier, SubmissionForm};
//! use phr_onchain::wallet::WalletState;
//!
//! struct Stderr;
//!
//! impl Notifier for Stderr {
//!     fn alert(&self, message: &str) {
//!         eprintln!("{}", message);
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = HttpSubmissionClient::new("http://localhost:8000");
//!     let wallet = WalletState::connected("0x5FbDB2315678afecb367f032d93F642f64180aa3");
//!
//!     let mut form = SubmissionForm::new();
//!     form.set_weight("65.5");
//!     form.set_blood_pressure("120/80");
//!     form.set_steps("8200");
//!
//!     let today = chrono::Local::now().date_naive();
//!     if form.submit(&wallet, &client, &Stderr, today).await.is_ok() {
//!         println!("{}", form.result().unwrap().tx_hash);
//!     }
//! }
//! ```

pub mod chain;
pub mod display;
pub mod platform;
pub mod submission;
pub mod wallet;

#[cfg(feature = "native")]
pub mod config;
#[cfg(feature = "native")]
pub mod deploy;
#[cfg(feature = "native")]
pub mod logging;

// Re-export top-level types for convenience
pub use chain::{Chain, BASE_SEPOLIA_CHAIN_ID};

pub use display::{
    steps_series, weight_series, ChartKind, ChartSeries, History, HistoryEntry, ResultView,
    HISTORY_CAPACITY,
};

pub use platform::{Capabilities, RenderMode};

pub use submission::{
    ClientError, FormState, HealthData, InputError, Notifier, SubmissionClient, SubmissionForm,
    SubmissionRequest, SubmissionResult, SubmitError,
};

#[cfg(feature = "native")]
pub use submission::HttpSubmissionClient;

pub use wallet::{WalletConfig, WalletState};

#[cfg(feature = "native")]
pub use config::{Config, ConfigError, LoggingConfig};

#[cfg(feature = "native")]
pub use deploy::{
    run_deployment, AlloyDeployer, ContractArtifact, ContractDeployer, DeployError,
    DeploymentPlan, DeploymentRecord, ExplorerVerifier, SourceVerifier, VerificationOutcome,
};
