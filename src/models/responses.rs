use serde::{Deserialize, Serialize};
use crate::models::domain::ScoredGift;

/// Response for the local scoring endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreResponse {
    pub gifts: Vec<ScoredGift>,
    pub total: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Share acknowledgment; no mail is actually sent
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareResponse {
    pub success: bool,
    pub message: String,
    pub preview_url: Option<String>,
}

/// "Still working, ask again" body sent with HTTP 202
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadingResponse {
    pub status: String,
    pub message: String,
    pub attempt: u32,
    pub elapsed: u64,
}

impl LoadingResponse {
    pub fn new(attempt: u32, elapsed_secs: u64) -> Self {
        Self {
            status: "loading".to_string(),
            message: "The API request is still processing. Please wait...".to_string(),
            attempt,
            elapsed: elapsed_secs,
        }
    }
}
