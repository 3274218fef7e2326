//! GitHub REST API client for star counts and README content

use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::source::error::FetchError;
use crate::source::{SourceHost, check_status};

/// Response from the GitHub repository API
#[derive(Debug, Deserialize)]
struct Repository {
    stargazers_count: Option<u64>,
}

pub struct GitHubClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl GitHubClient {
    /// Creates a client; requests are authenticated when `token` is set
    pub fn new(client: Client, base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            token,
        }
    }

    fn get(&self, url: &str) -> RequestBuilder {
        let request = self.client.get(url);
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Fetches the star count of a repository
    pub async fn fetch_stars(&self, repo: &str) -> Result<u64, FetchError> {
        let url = format!("{}/repos/{}", self.base_url, repo);
        debug!("Fetching GitHub repository: {}", url);

        let response = self
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .send()
            .await?;
        check_status(&response, repo)?;

        let repository: Repository = response
            .json()
            .await
            .map_err(|e| FetchError::InvalidResponse(e.to_string()))?;

        repository
            .stargazers_count
            .ok_or_else(|| FetchError::InvalidResponse("missing stargazers_count".to_string()))
    }

    /// Fetches the raw README of a repository
    pub async fn fetch_readme(&self, repo: &str) -> Result<String, FetchError> {
        let url = format!("{}/repos/{}/readme", self.base_url, repo);
        debug!("Fetching GitHub README: {}", url);

        let response = self
            .get(&url)
            .header("Accept", "application/vnd.github.raw")
            .send()
            .await?;
        check_status(&response, repo)?;

        Ok(response.text().await?)
    }
}

#[async_trait::async_trait]
impl SourceHost for GitHubClient {
    async fn stars(&self, repo: &str) -> Option<u64> {
        self.fetch_stars(repo)
            .await
            .inspect_err(|e| warn!("Error fetching stars for {}: {}", repo, e))
            .ok()
    }

    async fn readme(&self, repo: &str) -> Option<String> {
        self.fetch_readme(repo)
            .await
            .inspect_err(|e| warn!("Error fetching README for {}: {}", repo, e))
            .ok()
            .filter(|content| !content.trim().is_empty())
    }
}
