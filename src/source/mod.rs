//! Read-only clients for the upstream services a plugin record is enriched from
//!
//! ```text
//! ┌──────────────┐  ┌───────────────┐  ┌──────────────┐
//! │ PackageIndex │  │ DownloadStats │  │  SourceHost  │
//! │    (PyPI)    │  │  (pypistats)  │  │   (GitHub)   │
//! └──────────────┘  └───────────────┘  └──────────────┘
//!    Result<_, FetchError>               Option<_>, best effort
//! ```
//!
//! Every call is a single attempt. The package index and download stats
//! report failures to the caller; the source host swallows them and
//! reports "no data".

#[cfg(test)]
use mockall::automock;

pub mod error;
pub mod github;
pub mod pypi;
pub mod pypistats;
pub mod types;

use std::time::Duration;

use reqwest::Client;

pub use error::FetchError;
pub use github::GitHubClient;
pub use pypi::PypiClient;
pub use pypistats::PypiStatsClient;
pub use types::{DownloadCounts, PackageDocument, PackageInfo, RecentDownloads, ReleaseFile};

use crate::config::USER_AGENT;

/// Package metadata lookup
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait PackageIndex: Send + Sync {
    /// Fetches the full index document for a package
    async fn fetch_package(&self, name: &str) -> Result<PackageDocument, FetchError>;
}

/// Download statistics lookup
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait DownloadStats: Send + Sync {
    /// Fetches the recent download counts for a package
    async fn fetch_recent(&self, name: &str) -> Result<RecentDownloads, FetchError>;
}

/// Source hosting platform lookup
///
/// Both calls are best effort: any failure is logged and reported as `None`.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait SourceHost: Send + Sync {
    /// Star count of an `owner/repo`
    async fn stars(&self, repo: &str) -> Option<u64>;

    /// Raw README content of an `owner/repo`
    async fn readme(&self, repo: &str) -> Option<String>;
}

/// Shared HTTP client for all upstream requests
pub fn http_client(timeout_ms: u64) -> Result<Client, FetchError> {
    Ok(Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_millis(timeout_ms))
        .build()?)
}

/// Map a non-success status to the matching error
fn check_status(response: &reqwest::Response, subject: &str) -> Result<(), FetchError> {
    let status = response.status();

    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(FetchError::NotFound(subject.to_string()));
    }

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());
        return Err(FetchError::RateLimited {
            retry_after_secs: retry_after,
        });
    }

    if !status.is_success() {
        return Err(FetchError::InvalidResponse(format!(
            "Unexpected status: {}",
            status
        )));
    }

    Ok(())
}
