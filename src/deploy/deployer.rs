//! Contract deployment over JSON-RPC
//!
//! Sends the creation transaction with a local signer, then polls for the
//! receipt and for confirmations.

use alloy_network::{EthereumWallet, ReceiptResponse, TransactionBuilder};
use alloy_primitives::{Address, Bytes, TxHash};
use alloy_provider::{Provider, ProviderBuilder};
use alloy_rpc_types::TransactionRequest;
use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use alloy_transport_http::Http;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use super::error::{DeployError, DeployResult};
use crate::chain::Chain;

/// A mined contract creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployedContract {
    pub address: Address,
    pub tx_hash: TxHash,
    /// Block the creation transaction was included in
    pub block_number: u64,
}

/// Deploys contracts to one chain
#[async_trait]
pub trait ContractDeployer: Send + Sync {
    /// Account paying for the deployment
    fn deployer_address(&self) -> Address;

    /// Submit the creation transaction
    async fn send_deployment(&self, creation_code: Bytes) -> DeployResult<TxHash>;

    /// Block until the transaction is mined
    async fn wait_for_deployment(&self, tx_hash: TxHash) -> DeployResult<DeployedContract>;

    /// Block until the deployment has `confirmations` confirmations and
    /// return the number observed
    async fn wait_for_confirmations(
        &self,
        deployed: &DeployedContract,
        confirmations: u64,
    ) -> DeployResult<u64>;
}

/// Confirmations of a transaction mined in `mined_in` when the chain head
/// is `head`. The inclusion block counts as the first.
pub fn confirmation_count(mined_in: u64, head: u64) -> u64 {
    if head < mined_in {
        0
    } else {
        head - mined_in + 1
    }
}

/// Alloy-based deployer
pub struct AlloyDeployer {
    provider: Arc<dyn Provider<Http<reqwest::Client>> + Send + Sync>,
    deployer: Address,
    poll_interval: Duration,
}

impl AlloyDeployer {
    /// Connect to `chain.rpc_url` and sign with `private_key`
    pub fn new(chain: &Chain, private_key: &str, poll_interval: Duration) -> DeployResult<Self> {
        let signer: PrivateKeySigner = private_key
            .trim()
            .parse()
            .map_err(|e| DeployError::Signer(format!("{}", e)))?;
        let signer = signer.with_chain_id(Some(chain.id));
        let deployer = signer.address();
        let wallet = EthereumWallet::from(signer);

        let url = chain.rpc_url.parse().map_err(|e| {
            DeployError::Rpc(format!("Invalid RPC URL {}: {}", chain.rpc_url, e))
        })?;

        let provider = ProviderBuilder::new()
            .with_recommended_fillers()
            .wallet(wallet)
            .on_http(url);

        Ok(Self {
            provider: Arc::new(provider),
            deployer,
            poll_interval,
        })
    }

    /// Chain id reported by the RPC endpoint
    pub async fn remote_chain_id(&self) -> DeployResult<u64> {
        self.provider
            .get_chain_id()
            .await
            .map_err(|e| DeployError::Rpc(format!("Failed to get chain id: {}", e)))
    }
}

#[async_trait]
impl ContractDeployer for AlloyDeployer {
    fn deployer_address(&self) -> Address {
        self.deployer
    }

    async fn send_deployment(&self, creation_code: Bytes) -> DeployResult<TxHash> {
        let request = TransactionRequest::default()
            .with_from(self.deployer)
            .with_deploy_code(creation_code);

        // The provider's wallet signs
        let pending = self
            .provider
            .send_transaction(request)
            .await
            .map_err(|e| DeployError::Rpc(format!("Failed to send transaction: {}", e)))?;

        let tx_hash = *pending.tx_hash();
        tracing::info!(tx_hash = %tx_hash, "Submitted deployment transaction");
        Ok(tx_hash)
    }

    async fn wait_for_deployment(&self, tx_hash: TxHash) -> DeployResult<DeployedContract> {
        loop {
            let receipt = match self.provider.get_transaction_receipt(tx_hash).await {
                Ok(Some(receipt)) => receipt,
                Ok(None) => {
                    // Not yet mined
                    tokio::time::sleep(self.poll_interval).await;
                    continue;
                }
                Err(e) => {
                    return Err(DeployError::Rpc(format!("Failed to get receipt: {}", e)));
                }
            };

            if !ReceiptResponse::status(&receipt) {
                return Err(DeployError::Reverted {
                    tx_hash: tx_hash.to_string(),
                });
            }

            let address = ReceiptResponse::contract_address(&receipt).ok_or_else(|| {
                DeployError::NoContractAddress {
                    tx_hash: tx_hash.to_string(),
                }
            })?;
            let block_number = ReceiptResponse::block_number(&receipt).ok_or_else(|| {
                DeployError::Rpc(format!("Receipt for {} has no block number", tx_hash))
            })?;

            tracing::info!(%address, block_number, "Deployment mined");
            return Ok(DeployedContract {
                address,
                tx_hash,
                block_number,
            });
        }
    }

    async fn wait_for_confirmations(
        &self,
        deployed: &DeployedContract,
        confirmations: u64,
    ) -> DeployResult<u64> {
        loop {
            let head = self
                .provider
                .get_block_number()
                .await
                .map_err(|e| DeployError::Rpc(format!("Failed to get block number: {}", e)))?;

            let observed = confirmation_count(deployed.block_number, head);
            if observed >= confirmations {
                return Ok(observed);
            }

            tracing::debug!(observed, confirmations, "Waiting for confirmations");
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmation_count() {
        assert_eq!(confirmation_count(100, 99), 0);
        assert_eq!(confirmation_count(100, 100), 1);
        assert_eq!(confirmation_count(100, 104), 5);
    }

    #[test]
    fn test_new_rejects_bad_key() {
        let result = AlloyDeployer::new(
            &Chain::base_sepolia(),
            "not-a-key",
            Duration::from_millis(10),
        );
        assert!(matches!(result, Err(DeployError::Signer(_))));
    }

    #[test]
    fn test_new_derives_deployer_address() {
        // Well-known first Hardhat/Anvil development key
        let deployer = AlloyDeployer::new(
            &Chain::base_sepolia(),
            "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
            Duration::from_millis(10),
        )
        .unwrap();

        let expected: Address = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".parse().unwrap();
        assert_eq!(deployer.deployer_address(), expected);
    }
}
