//! HTTP client for the remote hotspot catalog.

use super::CatalogSource;
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::time::Duration;
use wayfarer_models::Hotspot;

/// Reads the catalog with a single bounded `GET`.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    client: reqwest::Client,
    url: String,
}

impl HttpCatalogClient {
    /// Create a client for `url`. `timeout` bounds the whole request.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogClient {
    async fn fetch(&self) -> Result<Vec<Hotspot>> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let hotspots: Vec<Hotspot> = serde_json::from_str(&body)?;
        tracing::debug!(url = %self.url, count = hotspots.len(), "Fetched catalog");
        Ok(hotspots)
    }
}
