//! In-process stand-ins for PyPI, pypistats and GitHub

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use plugin_sync::source::{
    DownloadCounts, DownloadStats, FetchError, PackageDocument, PackageIndex, RecentDownloads,
    SourceHost,
};
use plugin_sync::sync::Sources;

/// Serves canned responses; names without an entry fail or return no data
#[derive(Default)]
pub struct FakeSources {
    stars: HashMap<String, u64>,
    readmes: HashMap<String, String>,
    packages: HashMap<String, PackageDocument>,
    downloads: HashMap<String, u64>,
    delay: Option<Duration>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    calls: AtomicUsize,
}

impl FakeSources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stars(mut self, repo: &str, stars: u64) -> Self {
        self.stars.insert(repo.to_string(), stars);
        self
    }

    pub fn with_readme(mut self, repo: &str, content: &str) -> Self {
        self.readmes.insert(repo.to_string(), content.to_string());
        self
    }

    pub fn with_package(mut self, name: &str, document: PackageDocument) -> Self {
        self.packages.insert(name.to_string(), document);
        self
    }

    pub fn with_downloads(mut self, name: &str, last_month: u64) -> Self {
        self.downloads.insert(name.to_string(), last_month);
        self
    }

    /// Every star lookup sleeps for `delay` while counted as in flight
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Total upstream calls served
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn into_sources(self: Arc<Self>) -> Sources {
        Sources {
            package_index: self.clone(),
            download_stats: self.clone(),
            source_host: self,
        }
    }

    async fn track<T>(&self, value: T) -> T {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let Some(delay) = self.delay else {
            return value;
        };

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
        tokio::time::sleep(delay).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        value
    }
}

#[async_trait]
impl PackageIndex for FakeSources {
    async fn fetch_package(&self, name: &str) -> Result<PackageDocument, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.packages
            .get(name)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(name.to_string()))
    }
}

#[async_trait]
impl DownloadStats for FakeSources {
    async fn fetch_recent(&self, name: &str) -> Result<RecentDownloads, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.downloads
            .get(name)
            .map(|last_month| RecentDownloads {
                data: DownloadCounts {
                    last_day: None,
                    last_week: None,
                    last_month: Some(*last_month),
                },
            })
            .ok_or_else(|| FetchError::NotFound(name.to_string()))
    }
}

#[async_trait]
impl SourceHost for FakeSources {
    async fn stars(&self, repo: &str) -> Option<u64> {
        let stars = self.stars.get(repo).copied();
        self.track(stars).await
    }

    async fn readme(&self, repo: &str) -> Option<String> {
        let readme = self.readmes.get(repo).cloned();
        self.track(readme).await
    }
}
