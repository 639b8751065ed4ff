use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::json;

use crate::models::{CallsResponse, TranscriptResponse};

/// Configuration for the Gong API client
#[derive(Debug, Clone)]
pub struct GongConfig {
    /// Access token (from GONG_API_TOKEN env var), sent as Basic auth
    pub access_token: String,
    /// API base URL (e.g., "https://api.gong.io/v2")
    pub base_url: String,
}

impl GongConfig {
    /// Create config from environment variables
    pub fn from_env() -> Result<Self> {
        let access_token = std::env::var("GONG_API_TOKEN")
            .context("GONG_API_TOKEN environment variable not set")?;
        let base_url = std::env::var("GONG_BASE_URL")
            .unwrap_or_else(|_| "https://api.gong.io/v2".to_string());

        Ok(Self {
            access_token,
            base_url,
        })
    }

    /// Create with custom settings
    pub fn new(access_token: String, base_url: String) -> Self {
        Self {
            access_token,
            base_url,
        }
    }
}

/// Gong API client
pub struct GongClient {
    client: Client,
    config: GongConfig,
}

impl GongClient {
    pub fn new(config: GongConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Fetch call metadata (title, media, parties) for the given call ids
    pub async fn fetch_calls(&self, call_ids: &[u64]) -> Result<CallsResponse> {
        let body = json!({
            "contentSelector": {
                "context": "Basic",
                "exposedFields": {
                    "collaboration": {
                        "publicComments": true
                    },
                    "content": {
                        "pointsOfInterest": true,
                        "structure": true,
                        "topics": true,
                        "trackerOccurrences": false,
                        "trackers": true
                    },
                    "interaction": {
                        "personInteractionStats": true,
                        "questions": true,
                        "speakers": true,
                        "video": true
                    },
                    "media": true,
                    "parties": true
                }
            },
            "filter": {
                "callIds": call_ids
            }
        });

        self.post("calls/extensive", &body)
            .await?
            .json()
            .await
            .context("Failed to parse Gong calls response")
    }

    /// Fetch the diarized transcripts for the given call ids
    pub async fn fetch_transcripts(&self, call_ids: &[u64]) -> Result<TranscriptResponse> {
        let body = json!({
            "filter": {
                "callIds": call_ids
            }
        });

        self.post("calls/transcript", &body)
            .await?
            .json()
            .await
            .context("Failed to parse Gong transcript response")
    }

    async fn post(&self, path: &str, body: &serde_json::Value) -> Result<reqwest::Response> {
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), path);

        let response = self
            .client
            .post(&url)
            .header(
                "Authorization",
                format!("Basic {}", self.config.access_token),
            )
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", url))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Gong API error: {} - {}", status, body);
        }

        Ok(response)
    }
}
