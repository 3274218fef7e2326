//! Upstream documents returned by the source fetchers

use indexmap::IndexMap;
use serde::Deserialize;

/// PyPI JSON API document (`/pypi/<name>/json`)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PackageDocument {
    #[serde(default)]
    pub info: PackageInfo,
    /// Release version → uploaded files
    #[serde(default)]
    pub releases: IndexMap<String, Vec<ReleaseFile>>,
}

/// `info` section of a PyPI document
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PackageInfo {
    /// Latest version (according to PyPI)
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub requires_python: Option<String>,
    /// Label → URL, as declared in the package metadata
    #[serde(default)]
    pub project_urls: Option<IndexMap<String, String>>,
}

/// One uploaded distribution file of a release
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReleaseFile {
    #[serde(default)]
    pub upload_time: Option<String>,
    #[serde(default)]
    pub upload_time_iso_8601: Option<String>,
}

impl ReleaseFile {
    pub fn upload_timestamp(&self) -> Option<&str> {
        self.upload_time
            .as_deref()
            .or(self.upload_time_iso_8601.as_deref())
    }
}

/// pypistats recent downloads document (`/api/packages/<name>/recent`)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RecentDownloads {
    #[serde(default)]
    pub data: DownloadCounts,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DownloadCounts {
    #[serde(default)]
    pub last_day: Option<u64>,
    #[serde(default)]
    pub last_week: Option<u64>,
    #[serde(default)]
    pub last_month: Option<u64>,
}
