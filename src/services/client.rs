use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;

use crate::config::ClientSettings;
use crate::core::mock::mock_theme_set;
use crate::core::payload::{decode_payload, ApiPayload};
use crate::models::{RecipientProfile, ThemeSet};
use crate::services::query::{build_url, CacheBuster, NO_STORE_HEADERS};

/// Failures on the way to the proxy endpoint; always recovered with mock data
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API returned status {0}")]
    Http(StatusCode),

    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Fetches gift themes for a profile through the proxy endpoint
///
/// [`fetch_themes`](Self::fetch_themes) never fails: timeouts, transport
/// errors, non-2xx statuses, "still loading" answers and unusable bodies all
/// resolve to the built-in mock themes flagged with `isMockData: true`.
pub struct RecommendationClient {
    proxy_url: String,
    timeout: Duration,
    client: Client,
}

impl RecommendationClient {
    pub fn new(proxy_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder().build()?;

        Ok(Self {
            proxy_url: proxy_url.into(),
            timeout,
            client,
        })
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self, ClientError> {
        Self::new(
            settings.proxy_url.clone(),
            Duration::from_millis(settings.timeout_ms),
        )
    }

    pub async fn fetch_themes(&self, profile: &RecipientProfile) -> ThemeSet {
        let body = match self.request(profile).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Error fetching gift suggestions, using mock data: {}", e);
                return mock_theme_set();
            }
        };

        match decode_payload(&body) {
            ApiPayload::Loading => {
                tracing::info!("API is still processing, returning mock data for now");
                mock_theme_set()
            }
            ApiPayload::Unrecognized => {
                tracing::warn!("Unexpected API response format or empty data, using mock data");
                mock_theme_set()
            }
            payload => {
                tracing::debug!(shape = payload.kind(), "Received gift themes");
                payload.into_theme_set().unwrap_or_else(mock_theme_set)
            }
        }
    }

    async fn request(&self, profile: &RecipientProfile) -> Result<Value, ClientError> {
        let mut params = profile.to_query_params();
        params.extend(CacheBuster::fresh().params());
        let url = build_url(&self.proxy_url, &params);

        tracing::debug!("Fetching gift suggestions from: {}", url);

        let mut request = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .timeout(self.timeout);
        for (name, value) in NO_STORE_HEADERS {
            request = request.header(name, value);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Http(status));
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
