//! Submission error types

use thiserror::Error;

/// Message shown for every network or server failure
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to submit health data. Please try again.";

/// Message shown when submitting without a connected wallet
pub const CONNECT_WALLET_MESSAGE: &str = "Please connect your wallet first";

/// A form field could not be turned into a typed value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("Weight must be a positive number, got {0:?}")]
    InvalidWeight(String),

    #[error("Steps must be a whole number, got {0:?}")]
    InvalidSteps(String),
}

/// Failure talking to the submission API
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The request could not be sent or the response not received
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered outside the 2xx range
    #[error("Server returned status {status}")]
    Status { status: u16 },

    /// The response body was not a submission result
    #[error("Invalid response body: {0}")]
    Decode(String),
}

/// Why a submit attempt did not produce a result
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Wallet not connected")]
    WalletNotConnected,

    #[error("A submission is already in progress")]
    InFlight,

    #[error("Invalid input: {0}")]
    Input(#[from] InputError),

    #[error("Submission failed: {0}")]
    Client(#[from] ClientError),
}

impl SubmitError {
    /// Text for the user-facing alert. Client failures all share one
    /// generic message.
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::WalletNotConnected => CONNECT_WALLET_MESSAGE.to_string(),
            SubmitError::InFlight => "Your previous submission is still in progress".to_string(),
            SubmitError::Input(e) => e.to_string(),
            SubmitError::Client(_) => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}
