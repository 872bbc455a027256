//! Registry Contract Deployment
//!
//! ## Steps
//!
//! 1. Send the creation transaction for the compiled registry contract
//! 2. Wait until it is mined, then for the configured confirmations
//! 3. Try to verify the source on the block explorer. A failure here is
//!    logged and reported but does not abort the run
//! 4. Print the deployment summary
//!
//! Every run deploys a fresh contract instance.

mod artifact;
mod deployer;
mod error;
mod verify;

pub use artifact::{BuildInfo, ContractArtifact};
pub use deployer::{confirmation_count, AlloyDeployer, ContractDeployer, DeployedContract};
pub use error::{ArtifactError, DeployError, DeployResult, VerifyError};
pub use verify::{
    ExplorerResponse, ExplorerVerifier, SourceVerifier, StatusCheck, VerificationRequest,
    VerificationStatus,
};

use alloy_primitives::{Address, TxHash};
use std::io::Write;

use crate::chain::Chain;

/// How source verification ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    Verified,
    AlreadyVerified,
    Failed(String),
}

impl From<Result<VerificationStatus, VerifyError>> for VerificationOutcome {
    fn from(result: Result<VerificationStatus, VerifyError>) -> Self {
        match result {
            Ok(VerificationStatus::Verified) => VerificationOutcome::Verified,
            Ok(VerificationStatus::AlreadyVerified) => VerificationOutcome::AlreadyVerified,
            Err(e) => VerificationOutcome::Failed(e.to_string()),
        }
    }
}

/// What one deployment produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentRecord {
    pub contract_name: String,
    pub address: Address,
    pub tx_hash: TxHash,
    pub block_number: u64,
    pub confirmations: u64,
    pub chain: Chain,
    pub verification: VerificationOutcome,
}

impl DeploymentRecord {
    pub fn explorer_url(&self) -> String {
        self.chain.address_url(&self.address.to_string())
    }
}

/// Inputs of one deployment run
#[derive(Debug, Clone)]
pub struct DeploymentPlan {
    pub artifact: ContractArtifact,
    pub chain: Chain,
    pub confirmations: u64,
}

/// Deploy, confirm, verify and print the summary to `out`.
///
/// Only errors before the summary are returned; verification failures end
/// up in [`DeploymentRecord::verification`].
pub async fn run_deployment<D, V, W>(
    plan: &DeploymentPlan,
    deployer: &D,
    verifier: &V,
    out: &mut W,
) -> DeployResult<DeploymentRecord>
where
    D: ContractDeployer + ?Sized,
    V: SourceVerifier + ?Sized,
    W: Write,
{
    let name = &plan.artifact.contract_name;
    let creation_code = plan.artifact.creation_code()?;

    writeln!(out, "Deploying {} to {}...", name, plan.chain.name)?;
    tracing::info!(
        contract = %name,
        chain_id = plan.chain.id,
        deployer = %deployer.deployer_address(),
        "Starting deployment"
    );

    let tx_hash = deployer.send_deployment(creation_code).await?;
    let deployed = deployer.wait_for_deployment(tx_hash).await?;
    writeln!(out, "{} deployed to: {}", name, deployed.address)?;

    writeln!(out, "\nWaiting for block confirmations...")?;
    let confirmations = deployer
        .wait_for_confirmations(&deployed, plan.confirmations)
        .await?;

    writeln!(out, "\nVerifying contract on {}...", plan.chain.explorer_name)?;
    let request = VerificationRequest {
        address: deployed.address.to_string(),
        contract_name: plan.artifact.qualified_name(),
        constructor_args: String::new(),
    };
    let verification = VerificationOutcome::from(verifier.verify(&request).await);
    match &verification {
        VerificationOutcome::Verified => writeln!(out, "Contract verified successfully!")?,
        VerificationOutcome::AlreadyVerified => writeln!(out, "Contract is already verified")?,
        VerificationOutcome::Failed(reason) => {
            tracing::warn!("Verification failed: {}", reason);
            writeln!(out, "Verification failed: {}", reason)?;
        }
    }

    let record = DeploymentRecord {
        contract_name: name.clone(),
        address: deployed.address,
        tx_hash: deployed.tx_hash,
        block_number: deployed.block_number,
        confirmations,
        chain: plan.chain.clone(),
        verification,
    };

    write_summary(&record, out)?;
    Ok(record)
}

/// Print the deployment summary block
pub fn write_summary<W: Write>(record: &DeploymentRecord, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "\n=== Deployment Summary ===")?;
    writeln!(out, "Contract Address: {}", record.address)?;
    writeln!(out, "Network: {}", record.chain)?;
    writeln!(out, "Explorer: {}", record.explorer_url())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, b256, Bytes};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct StubDeployer {
        sent: Mutex<Vec<Bytes>>,
    }

    impl StubDeployer {
        fn new() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
            }
        }
    }

    const CONTRACT: Address = address!("5FbDB2315678afecb367f032d93F642f64180aa3");
    const TX: TxHash = b256!("00000000000000000000000000000000000000000000000000000000000000aa");

    #[async_trait]
    impl ContractDeployer for StubDeployer {
        fn deployer_address(&self) -> Address {
            Address::ZERO
        }

        async fn send_deployment(&self, creation_code: Bytes) -> DeployResult<TxHash> {
            self.sent.lock().unwrap().push(creation_code);
            Ok(TX)
        }

        async fn wait_for_deployment(&self, tx_hash: TxHash) -> DeployResult<DeployedContract> {
            Ok(DeployedContract {
                address: CONTRACT,
                tx_hash,
                block_number: 10,
            })
        }

        async fn wait_for_confirmations(
            &self,
            _deployed: &DeployedContract,
            confirmations: u64,
        ) -> DeployResult<u64> {
            Ok(confirmations)
        }
    }

    struct FailingDeployer;

    #[async_trait]
    impl ContractDeployer for FailingDeployer {
        fn deployer_address(&self) -> Address {
            Address::ZERO
        }

        async fn send_deployment(&self, _creation_code: Bytes) -> DeployResult<TxHash> {
            Err(DeployError::Rpc("insufficient funds".to_string()))
        }

        async fn wait_for_deployment(&self, _tx_hash: TxHash) -> DeployResult<DeployedContract> {
            unreachable!("nothing was sent")
        }

        async fn wait_for_confirmations(
            &self,
            _deployed: &DeployedContract,
            _confirmations: u64,
        ) -> DeployResult<u64> {
            unreachable!("nothing was sent")
        }
    }

    struct StubVerifier(fn() -> Result<VerificationStatus, VerifyError>);

    #[async_trait]
    impl SourceVerifier for StubVerifier {
        async fn verify(
            &self,
            request: &VerificationRequest,
        ) -> Result<VerificationStatus, VerifyError> {
            assert_eq!(request.contract_name, "contracts/PHRRegistry.sol:PHRRegistry");
            (self.0)()
        }
    }

    fn plan() -> DeploymentPlan {
        DeploymentPlan {
            artifact: ContractArtifact {
                contract_name: "PHRRegistry".to_string(),
                source_name: "contracts/PHRRegistry.sol".to_string(),
                bytecode: "0x6080604052".to_string(),
                abi: serde_json::Value::Null,
            },
            chain: Chain::base_sepolia(),
            confirmations: 5,
        }
    }

    #[tokio::test]
    async fn test_successful_deployment() {
        let deployer = StubDeployer::new();
        let verifier = StubVerifier(|| Ok(VerificationStatus::Verified));
        let mut out = Vec::new();

        let record = run_deployment(&plan(), &deployer, &verifier, &mut out)
            .await
            .unwrap();

        assert_eq!(record.address, CONTRACT);
        assert_eq!(record.confirmations, 5);
        assert_eq!(record.verification, VerificationOutcome::Verified);
        assert_eq!(deployer.sent.lock().unwrap().len(), 1);

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Deploying PHRRegistry to Base Sepolia..."));
        assert!(text.contains("Contract verified successfully!"));
        assert!(text.contains("Network: Base Sepolia (Chain ID: 84532)"));
    }

    #[tokio::test]
    async fn test_verification_failure_still_prints_summary() {
        let deployer = StubDeployer::new();
        let verifier = StubVerifier(|| Err(VerifyError::Rejected("Invalid API Key".to_string())));
        let mut out = Vec::new();

        let record = run_deployment(&plan(), &deployer, &verifier, &mut out)
            .await
            .unwrap();

        assert!(matches!(record.verification, VerificationOutcome::Failed(_)));

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Verification failed: Explorer rejected the verification request: Invalid API Key"));
        assert!(text.contains("=== Deployment Summary ==="));
        assert!(text.contains(&format!("Contract Address: {}", CONTRACT)));
        assert!(text.contains(&format!(
            "Explorer: https://sepolia.basescan.org/address/{}",
            CONTRACT
        )));
    }

    #[tokio::test]
    async fn test_send_failure_aborts_before_summary() {
        let verifier = StubVerifier(|| Ok(VerificationStatus::Verified));
        let mut out = Vec::new();

        let err = run_deployment(&plan(), &FailingDeployer, &verifier, &mut out)
            .await
            .unwrap_err();

        assert!(matches!(err, DeployError::Rpc(_)));
        assert!(!String::from_utf8(out).unwrap().contains("Deployment Summary"));
    }

    #[tokio::test]
    async fn test_empty_bytecode_sends_nothing() {
        let mut plan = plan();
        plan.artifact.bytecode = "0x".to_string();
        let deployer = StubDeployer::new();
        let verifier = StubVerifier(|| Ok(VerificationStatus::Verified));

        let err = run_deployment(&plan, &deployer, &verifier, &mut Vec::new())
            .await
            .unwrap_err();

        assert!(matches!(err, DeployError::Artifact(ArtifactError::EmptyBytecode(_))));
        assert!(deployer.sent.lock().unwrap().is_empty());
    }
}
