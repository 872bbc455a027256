//! HTTP API Client
//!
//! Browser implementation of the submission client.

use async_trait::async_trait;
use gloo_net::http::Request;

use phr_onchain::submission::{
    submit_url, ClientError, SubmissionClient, SubmissionRequest, SubmissionResult,
};

/// Local storage key that overrides the build-time API base URL
pub const API_BASE_STORAGE_KEY: &str = "phr_api_url";

/// API base baked in at build time. Empty means same origin.
pub const BUILD_API_BASE: &str = match option_env!("PHR_API_BASE_URL") {
    Some(url) => url,
    None => "",
};

/// Get the API base URL from local storage or the build-time value
pub fn get_api_base() -> String {
    let stored = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_BASE_STORAGE_KEY).ok().flatten());
    resolve_api_base(stored.as_deref(), BUILD_API_BASE)
}

fn resolve_api_base(stored: Option<&str>, built: &str) -> String {
    let url = stored
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .unwrap_or(built);
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

/// gloo-net backed submission client
#[derive(Debug, Clone)]
pub struct BrowserSubmissionClient {
    url: String,
}

impl BrowserSubmissionClient {
    pub fn new(api_base: &str) -> Self {
        Self {
            url: submit_url(api_base),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait(?Send)]
impl SubmissionClient for BrowserSubmissionClient {
    async fn submit(&self, request: &SubmissionRequest) -> Result<SubmissionResult, ClientError> {
        let response = Request::post(&self.url)
            .json(request)
            .map_err(|e| ClientError::Network(format!("Request build error: {}", e)))?
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(ClientError::Status {
                status: response.status(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }
}
