//! pypistats client for recent download counts

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::source::error::FetchError;
use crate::source::types::RecentDownloads;
use crate::source::{DownloadStats, check_status};

pub struct PypiStatsClient {
    client: Client,
    base_url: String,
}

impl PypiStatsClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl DownloadStats for PypiStatsClient {
    async fn fetch_recent(&self, name: &str) -> Result<RecentDownloads, FetchError> {
        let url = format!("{}/api/packages/{}/recent", self.base_url, name);
        debug!("Fetching pypistats downloads: {}", url);

        let response = self.client.get(&url).send().await?;
        check_status(&response, name)?;

        response
            .json()
            .await
            .map_err(|e| FetchError::InvalidResponse(e.to_string()))
    }
}
