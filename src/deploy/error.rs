//! Deployment error types

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;

/// The compiled contract could not be loaded
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("Failed to read {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Contract {0} has no deployable bytecode")]
    EmptyBytecode(String),

    #[error("Invalid bytecode for {contract}: {error}")]
    InvalidBytecode { contract: String, error: String },
}

/// Source verification failed. Never fatal for a deployment.
#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("No block explorer API key configured (set BASESCAN_API_KEY)")]
    MissingApiKey,

    #[error("No build-info file found (set deploy.build_info or compile with Hardhat)")]
    MissingBuildInfo,

    #[error("Invalid build-info: {0}")]
    BuildInfo(#[from] ArtifactError),

    #[error("Explorer request failed: {0}")]
    Request(String),

    #[error("Explorer rejected the verification request: {0}")]
    Rejected(String),

    #[error("Verification failed: {0}")]
    Failed(String),

    #[error("Verification still pending after {0} status checks")]
    Timeout(u32),
}

/// Errors that abort a deployment
#[derive(Error, Debug)]
pub enum DeployError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Artifact error: {0}")]
    Artifact(#[from] ArtifactError),

    #[error("Invalid deployer key: {0}")]
    Signer(String),

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Deployment transaction {tx_hash} reverted")]
    Reverted { tx_hash: String },

    #[error("Receipt for {tx_hash} has no contract address")]
    NoContractAddress { tx_hash: String },

    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for deployment operations
pub type DeployResult<T> = Result<T, DeployError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DeployError::Reverted {
            tx_hash: "0x01".to_string(),
        };
        assert_eq!(err.to_string(), "Deployment transaction 0x01 reverted");

        let err = VerifyError::Timeout(10);
        assert_eq!(
            err.to_string(),
            "Verification still pending after 10 status checks"
        );
    }

    #[test]
    fn test_artifact_error_conversion() {
        let err: DeployError = ArtifactError::EmptyBytecode("PHRRegistry".into()).into();
        assert!(matches!(err, DeployError::Artifact(_)));
    }
}
