use std::future::Future;
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;

use crate::services::query::{build_url, CacheBuster, NO_STORE_HEADERS};

/// Errors that can occur when calling the recommendation service
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Service unavailable: {0}")]
    Unavailable(StatusCode),

    #[error("API returned status {0}")]
    Http(StatusCode),

    #[error("Invalid response format: {0}")]
    Format(String),
}

impl UpstreamError {
    /// 503 / 504: the service is warming up or overloaded
    pub fn is_unavailable(&self) -> bool {
        matches!(self, UpstreamError::Unavailable(_))
    }

    /// Whether the caller may be told to come back later
    ///
    /// A service that is warming up or not answering at all keeps being
    /// polled until the early-exit point instead.
    pub fn allows_loading_reply(&self) -> bool {
        !matches!(self, UpstreamError::Unavailable(_) | UpstreamError::Timeout(_))
    }
}

/// Something that answers recommendation queries with a JSON body
pub trait ThemeSource: Send + Sync {
    /// Issue one GET for `params`; a `buster` makes the URL unique and tags the request
    fn fetch_themes(
        &self,
        params: &[(String, String)],
        buster: Option<&CacheBuster>,
    ) -> impl Future<Output = Result<Value, UpstreamError>> + Send;
}

/// HTTP client for the external recommendation service
pub struct UpstreamClient {
    endpoint: String,
    client: Client,
}

impl UpstreamClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, UpstreamError> {
        let client = Client::builder().build()?;

        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST an arbitrary profile body and relay the JSON answer
    pub async fn forward_suggestions(
        &self,
        body: &Value,
        timeout: Duration,
    ) -> Result<Value, UpstreamError> {
        tracing::debug!("Forwarding gift suggestion request to: {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .timeout(timeout)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Http(status));
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| UpstreamError::Format(format!("Failed to parse body: {}", e)))
    }
}

impl ThemeSource for UpstreamClient {
    async fn fetch_themes(
        &self,
        params: &[(String, String)],
        buster: Option<&CacheBuster>,
    ) -> Result<Value, UpstreamError> {
        let mut all_params = params.to_vec();
        if let Some(buster) = buster {
            all_params.extend(buster.params());
        }
        let url = build_url(&self.endpoint, &all_params);

        tracing::debug!("Requesting recommendations from: {}", url);

        let mut request = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json");
        for (name, value) in NO_STORE_HEADERS {
            request = request.header(name, value);
        }
        if let Some(buster) = buster {
            request = request.header("X-Request-ID", buster.request_id());
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::SERVICE_UNAVAILABLE || status == StatusCode::GATEWAY_TIMEOUT {
            return Err(UpstreamError::Unavailable(status));
        }
        if !status.is_success() {
            return Err(UpstreamError::Http(status));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !content_type.contains("application/json") {
            return Err(UpstreamError::Format(format!(
                "Invalid content type: {:?}",
                content_type
            )));
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| UpstreamError::Format(format!("Failed to parse body: {}", e)))
    }
}
