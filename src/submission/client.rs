//! Submission API Client
//!
//! A single `POST {base}/api/phr/submit` per call. No timeout, no retry.

use async_trait::async_trait;

use super::error::ClientError;
use super::types::{SubmissionRequest, SubmissionResult};

/// Path of the submission endpoint, relative to the API base URL
pub const SUBMIT_PATH: &str = "/api/phr/submit";

/// Full submission URL for an API base (trailing slashes ignored)
pub fn submit_url(api_base: &str) -> String {
    format!("{}{}", api_base.trim_end_matches('/'), SUBMIT_PATH)
}

/// Sends a submission and returns the anchoring result.
///
/// Futures are not required to be `Send` so the browser client can
/// implement this too.
#[async_trait(?Send)]
pub trait SubmissionClient {
    async fn submit(&self, request: &SubmissionRequest) -> Result<SubmissionResult, ClientError>;
}

#[cfg(feature = "native")]
pub use http::HttpSubmissionClient;

#[cfg(feature = "native")]
mod http {
    use super::*;
    use reqwest::Client;

    /// reqwest-backed submission client
    #[derive(Debug, Clone)]
    pub struct HttpSubmissionClient {
        client: Client,
        url: String,
    }

    impl HttpSubmissionClient {
        pub fn new(api_base: &str) -> Self {
            Self::with_client(Client::new(), api_base)
        }

        /// Reuse an existing reqwest client
        pub fn with_client(client: Client, api_base: &str) -> Self {
            Self {
                client,
                url: submit_url(api_base),
            }
        }

        pub fn url(&self) -> &str {
            &self.url
        }
    }

    #[async_trait(?Send)]
    impl SubmissionClient for HttpSubmissionClient {
        async fn submit(
            &self,
            request: &SubmissionRequest,
        ) -> Result<SubmissionResult, ClientError> {
            tracing::debug!(url = %self.url, wallet = %request.wallet_address, "Submitting health data");

            // `.json()` sets `Content-Type: application/json`
            let response = self
                .client
                .post(&self.url)
                .json(request)
                .send()
                .await
                .map_err(|e| ClientError::Network(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(ClientError::Status {
                    status: status.as_u16(),
                });
            }

            let body = response
                .text()
                .await
                .map_err(|e| ClientError::Network(e.to_string()))?;

            serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
        }
    }
}
