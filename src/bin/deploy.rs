//! PHR Registry Deployment
//!
//! Run with: cargo run --bin phr-deploy
//!
//! # Configuration
//!
//! Environment variables:
//! - `PRIVATE_KEY`: Deployer key (required)
//! - `BASE_SEPOLIA_RPC_URL`: RPC endpoint (default: https://sepolia.base.org)
//! - `BASESCAN_API_KEY`: Explorer API key for source verification
//! - `PHR_CONFIG`: Config file with a `[deploy]` section
//! - `RUST_LOG`: Log level (default: info)
//!
//! Exits with status 0 once the summary is printed, 1 on any earlier error.

use anyhow::Context;
use std::process::ExitCode;
use std::time::Duration;

use phr_onchain::config::Config;
use phr_onchain::deploy::{
    run_deployment, AlloyDeployer, ContractArtifact, DeploymentPlan, ExplorerVerifier,
};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::load_default();
    phr_onchain::logging::init(&config.logging);

    tracing::info!("PHR registry deployer v{}", env!("CARGO_PKG_VERSION"));

    match deploy(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Deployment failed: {:#}", e);
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn deploy(config: &Config) -> anyhow::Result<()> {
    let chain = config.chain();
    let artifact = ContractArtifact::load(&config.deploy.artifact)
        .with_context(|| format!("Loading contract artifact {:?}", config.deploy.artifact))?;

    let poll_interval = Duration::from_millis(config.deploy.poll_interval_ms);
    let deployer = AlloyDeployer::new(&chain, config.private_key()?, poll_interval)?;

    let remote_chain_id = deployer.remote_chain_id().await?;
    anyhow::ensure!(
        remote_chain_id == chain.id,
        "RPC endpoint {} serves chain {} but {} expects {}",
        chain.rpc_url,
        remote_chain_id,
        chain.name,
        chain.id
    );

    let verifier = ExplorerVerifier::new(
        chain.explorer_api_url.clone(),
        config.deploy.explorer_api_key.clone(),
        config.deploy.build_info_path(),
    )
    .with_polling(poll_interval.max(Duration::from_secs(3)), config.deploy.verify_poll_attempts);

    let plan = DeploymentPlan {
        artifact,
        chain,
        confirmations: config.deploy.confirmations,
    };

    let mut stdout = std::io::stdout();
    let record = run_deployment(&plan, &deployer, &verifier, &mut stdout).await?;

    tracing::info!(
        address = %record.address,
        tx_hash = %record.tx_hash,
        block = record.block_number,
        confirmations = record.confirmations,
        "Deployment complete"
    );
    Ok(())
}
