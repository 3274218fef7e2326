//! PyPI client for fetching package metadata

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::source::error::FetchError;
use crate::source::types::PackageDocument;
use crate::source::{PackageIndex, check_status};

/// PyPI JSON API client
pub struct PypiClient {
    client: Client,
    base_url: String,
}

impl PypiClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl PackageIndex for PypiClient {
    async fn fetch_package(&self, name: &str) -> Result<PackageDocument, FetchError> {
        let url = format!("{}/pypi/{}/json", self.base_url, name);
        debug!("Fetching PyPI package: {}", url);

        let response = self.client.get(&url).send().await?;
        check_status(&response, name)?;

        let document: PackageDocument = response
            .json()
            .await
            .map_err(|e| FetchError::InvalidResponse(e.to_string()))?;

        debug!(
            "Found {} releases for package {}",
            document.releases.len(),
            name
        );

        Ok(document)
    }
}
