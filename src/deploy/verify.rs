//! Source verification on an Etherscan-compatible explorer

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::artifact::BuildInfo;
use super::error::VerifyError;

/// What to verify
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationRequest {
    /// Deployed contract address (0x hex)
    pub address: String,
    /// `source:Name` of the contract
    pub contract_name: String,
    /// ABI-encoded constructor arguments without `0x`, empty for none
    pub constructor_args: String,
}

/// Successful verification outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationStatus {
    Verified,
    AlreadyVerified,
}

/// Verifies deployed contract sources
#[async_trait]
pub trait SourceVerifier: Send + Sync {
    async fn verify(&self, request: &VerificationRequest) -> Result<VerificationStatus, VerifyError>;
}

/// Envelope of every explorer API response
#[derive(Debug, Clone, Deserialize)]
pub struct ExplorerResponse {
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub result: String,
}

/// Reading of one `checkverifystatus` response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusCheck {
    Pending,
    Verified,
    AlreadyVerified,
    Failed(String),
}

impl ExplorerResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "1"
    }

    fn is_already_verified(&self) -> bool {
        self.result.to_ascii_lowercase().contains("already verified")
    }

    pub fn status_check(&self) -> StatusCheck {
        if self.is_already_verified() {
            StatusCheck::AlreadyVerified
        } else if self.result.starts_with("Pending") {
            StatusCheck::Pending
        } else if self.is_ok() || self.result.starts_with("Pass") {
            StatusCheck::Verified
        } else {
            StatusCheck::Failed(self.result.clone())
        }
    }
}

/// Explorer API verifier using the standard JSON input from a Hardhat
/// build-info file
pub struct ExplorerVerifier {
    client: Client,
    api_url: String,
    api_key: Option<String>,
    build_info: Option<PathBuf>,
    poll_interval: Duration,
    max_polls: u32,
}

impl ExplorerVerifier {
    pub fn new(api_url: impl Into<String>, api_key: Option<String>, build_info: Option<PathBuf>) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            build_info,
            poll_interval: Duration::from_secs(5),
            max_polls: 10,
        }
    }

    /// Adjust status polling
    pub fn with_polling(mut self, interval: Duration, max_polls: u32) -> Self {
        self.poll_interval = interval;
        self.max_polls = max_polls.max(1);
        self
    }

    async fn submit_source(
        &self,
        api_key: &str,
        build_info: &BuildInfo,
        request: &VerificationRequest,
    ) -> Result<ExplorerResponse, VerifyError> {
        let source = serde_json::to_string(&build_info.input)
            .map_err(|e| VerifyError::Request(format!("Failed to encode compiler input: {}", e)))?;
        let compiler_version = build_info.compiler_version();

        let form = [
            ("apikey", api_key),
            ("module", "contract"),
            ("action", "verifysourcecode"),
            ("contractaddress", request.address.as_str()),
            ("sourceCode", source.as_str()),
            ("codeformat", "solidity-standard-json-input"),
            ("contractname", request.contract_name.as_str()),
            ("compilerversion", compiler_version.as_str()),
            // Misspelling is part of the explorer API
            ("constructorArguements", request.constructor_args.as_str()),
        ];

        let response = self
            .client
            .post(&self.api_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| VerifyError::Request(e.to_string()))?;

        read_response(response).await
    }

    async fn check_status(&self, api_key: &str, guid: &str) -> Result<ExplorerResponse, VerifyError> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("apikey", api_key),
                ("module", "contract"),
                ("action", "checkverifystatus"),
                ("guid", guid),
            ])
            .send()
            .await
            .map_err(|e| VerifyError::Request(e.to_string()))?;

        read_response(response).await
    }
}

async fn read_response(response: reqwest::Response) -> Result<ExplorerResponse, VerifyError> {
    let status = response.status();
    if !status.is_success() {
        return Err(VerifyError::Request(format!("Explorer returned status {}", status)));
    }

    response
        .json()
        .await
        .map_err(|e| VerifyError::Request(format!("Invalid explorer response: {}", e)))
}

#[async_trait]
impl SourceVerifier for ExplorerVerifier {
    async fn verify(&self, request: &VerificationRequest) -> Result<VerificationStatus, VerifyError> {
        let api_key = self.api_key.as_deref().ok_or(VerifyError::MissingApiKey)?;
        let path = self.build_info.as_deref().ok_or(VerifyError::MissingBuildInfo)?;
        let build_info = BuildInfo::load(path)?;

        let submitted = self.submit_source(api_key, &build_info, request).await?;
        if !submitted.is_ok() {
            if submitted.is_already_verified() {
                return Ok(VerificationStatus::AlreadyVerified);
            }
            return Err(VerifyError::Rejected(submitted.result));
        }

        let guid = submitted.result;
        tracing::info!(%guid, "Verification submitted");

        for attempt in 1..=self.max_polls {
            tokio::time::sleep(self.poll_interval).await;

            let check = self.check_status(api_key, &guid).await?;
            match check.status_check() {
                StatusCheck::Pending => {
                    tracing::debug!(attempt, "Verification pending");
                }
                StatusCheck::Verified => return Ok(VerificationStatus::Verified),
                StatusCheck::AlreadyVerified => return Ok(VerificationStatus::AlreadyVerified),
                StatusCheck::Failed(reason) => return Err(VerifyError::Failed(reason)),
            }
        }

        Err(VerifyError::Timeout(self.max_polls))
    }
}
