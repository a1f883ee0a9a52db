use crate::{Config, provider::bmkg::BmkgProvider};
use async_trait::async_trait;
use serde_json::Value;
use std::{fmt::Debug, time::Duration};
use thiserror::Error;

pub mod bmkg;

/// Failure to obtain a forecast document from upstream.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("upstream returned status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("upstream response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Fetch the raw forecast document for a village-level (`adm4`) code.
    async fn fetch_forecast(&self, adm4: &str) -> Result<Value, ProviderError>;
}

/// Construct the upstream provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let provider = BmkgProvider::new(
        config.upstream.base_url.clone(),
        Duration::from_secs(config.upstream.timeout_secs),
    )?;

    Ok(Box::new(provider))
}
