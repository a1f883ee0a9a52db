use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use super::{ProviderError, WeatherProvider};

pub const DEFAULT_BASE_URL: &str = "https://api.bmkg.go.id/publik/prakiraan-cuaca";

/// Client for the public BMKG forecast endpoint.
#[derive(Debug, Clone)]
pub struct BmkgProvider {
    base_url: String,
    http: Client,
}

impl BmkgProvider {
    pub fn new(base_url: String, timeout: Duration) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for BMKG")?;

        Ok(Self { base_url, http })
    }
}

#[async_trait]
impl WeatherProvider for BmkgProvider {
    async fn fetch_forecast(&self, adm4: &str) -> Result<Value, ProviderError> {
        tracing::debug!(url = %self.base_url, adm4, "requesting BMKG forecast");

        let res = self
            .http
            .get(&self.base_url)
            .query(&[("adm4", adm4)])
            .send()
            .await
            .map_err(|source| ProviderError::Request {
                url: self.base_url.clone(),
                source,
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|source| ProviderError::Request {
            url: self.base_url.clone(),
            source,
        })?;

        if !status.is_success() {
            return Err(ProviderError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
