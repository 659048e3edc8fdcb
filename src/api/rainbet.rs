// Rainbet affiliate API client
// Returns the raw payload; shaping happens in models::affiliate

use std::fmt;

use anyhow::Result;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tracing::{debug, error, info};

/// Thin wrapper over the affiliates endpoint. Cheap to clone.
#[derive(Clone)]
pub struct RainbetClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl fmt::Debug for RainbetClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RainbetClient")
            .field("http", &"reqwest::Client")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl RainbetClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Fetch raw affiliate stats for an inclusive date window.
    ///
    /// Single attempt: a transport failure or non-success status is
    /// returned as an error, never retried.
    pub async fn fetch_affiliates(&self, start_at: &str, end_at: &str) -> Result<Value> {
        info!(
            "Calling Rainbet API: {}?start_at={}&end_at={}",
            self.base_url, start_at, end_at
        );

        let response = self
            .http
            .get(&self.base_url)
            .header(CONTENT_TYPE, "application/json")
            .query(&[
                ("start_at", start_at),
                ("end_at", end_at),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("");
            let status_line = format!("{} {}", status.as_u16(), reason);
            let status_line = status_line.trim_end();
            error!("Rainbet API HTTP error: {}", status_line);
            anyhow::bail!("Rainbet API error: {}", status_line);
        }

        let payload: Value = response.json().await?;
        debug!("Rainbet API response: {}", payload);

        Ok(payload)
    }
}
