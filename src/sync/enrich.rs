//! Enrichment of a single plugin record from its upstream sources
//!
//! Steps run in order; every upstream step is skipped when its identifier is
//! missing and leaves the record untouched when the fetch fails:
//!
//! 1. load the record (missing → [`SyncError::NotFound`])
//! 2. resolve the icon (declared but missing → [`SyncError::Validation`])
//! 3. GitHub stars
//! 4. PyPI metadata: latest version, python compatibility, project URLs,
//!    first/last upload time
//! 5. pypistats monthly downloads
//! 6. structural round-trip through the record schema
//! 7. save

use std::sync::Arc;

use chrono::{DateTime, NaiveDateTime, Utc};
use indexmap::IndexMap;
use tracing::{debug, info, warn};

use crate::config::{DEFAULT_PLUGIN_ICON, SyncConfig};
use crate::plugin::PluginRecord;
use crate::source::{
    DownloadStats, FetchError, GitHubClient, PackageDocument, PackageIndex, PypiClient,
    PypiStatsClient, SourceHost, http_client,
};
use crate::store::{FsRecordStore, IconSet, RecordStore};
use crate::sync::error::SyncError;
use crate::version::requires_python;

const CHANGELOG_URL_KEYS: &[&str] = &["Changelog", "Changes", "Release Notes"];
const ISSUES_URL_KEYS: &[&str] = &["Issue", "Issues", "Issue Tracker", "Bug Tracker"];

/// Upstream services a record is enriched from
#[derive(Clone)]
pub struct Sources {
    pub package_index: Arc<dyn PackageIndex>,
    pub download_stats: Arc<dyn DownloadStats>,
    pub source_host: Arc<dyn SourceHost>,
}

impl Sources {
    /// PyPI, pypistats and GitHub clients sharing one HTTP client
    pub fn from_config(config: &SyncConfig) -> Result<Self, FetchError> {
        let client = http_client(config.fetch_timeout_ms)?;
        let registries = &config.registries;

        Ok(Self {
            package_index: Arc::new(PypiClient::new(client.clone(), &registries.pypi)),
            download_stats: Arc::new(PypiStatsClient::new(client.clone(), &registries.pypistats)),
            source_host: Arc::new(GitHubClient::new(
                client,
                &registries.github,
                config.github_token.clone(),
            )),
        })
    }
}

pub struct Enricher {
    store: Arc<dyn RecordStore>,
    icons: IconSet,
    sources: Sources,
}

impl Enricher {
    pub fn new(store: Arc<dyn RecordStore>, icons: IconSet, sources: Sources) -> Self {
        Self {
            store,
            icons,
            sources,
        }
    }

    /// Enricher over the file store and icon set under `config.root`
    pub fn from_config(config: &SyncConfig) -> Result<Self, FetchError> {
        Ok(Self::new(
            Arc::new(FsRecordStore::new(config.plugins_dir())),
            IconSet::new(config.icons_dir()),
            Sources::from_config(config)?,
        ))
    }

    pub fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }

    pub fn sources(&self) -> &Sources {
        &self.sources
    }

    /// Enrich the record stored under `key` and persist the result
    pub async fn enrich(&self, key: &str) -> Result<PluginRecord, SyncError> {
        let Some(mut record) = self.store.load(key).await? else {
            return Err(SyncError::NotFound(key.to_string()));
        };

        self.resolve_icon(&mut record).await?;
        self.apply_stars(&mut record).await;
        self.apply_package_index(&mut record).await;
        self.apply_download_stats(&mut record).await;

        let record = normalize(record)?;
        self.store.save(&record).await?;

        info!(
            plugin_key = %record.key,
            category = record.category.as_str(),
            "Plugin synced"
        );
        Ok(record)
    }

    async fn resolve_icon(&self, record: &mut PluginRecord) -> Result<(), SyncError> {
        match record.icon_name().map(str::to_string) {
            Some(icon) => {
                if !self.icons.contains(&icon).await {
                    return Err(SyncError::Validation {
                        key: record.key.clone(),
                        icon,
                    });
                }
            }
            None => {
                record.icon = Some(DEFAULT_PLUGIN_ICON.to_string());
                warn!(
                    plugin_key = %record.key,
                    icon = DEFAULT_PLUGIN_ICON,
                    "Assigned default icon to plugin {}",
                    record.name
                );
            }
        }
        Ok(())
    }

    async fn apply_stars(&self, record: &mut PluginRecord) {
        let Some(repo) = record.repo_id().map(str::to_string) else {
            return;
        };

        if let Some(stars) = self.sources.source_host.stars(&repo).await {
            debug!(plugin_key = %record.key, stars, "Updated stars");
            record.stars = stars;
        }
    }

    async fn apply_package_index(&self, record: &mut PluginRecord) {
        let Some(name) = record.pypi_name().map(str::to_string) else {
            return;
        };

        match self.sources.package_index.fetch_package(&name).await {
            Ok(document) => apply_package_document(record, &document),
            Err(e) => warn!(
                plugin_key = %record.key,
                source = "pypi",
                "Failed to fetch package {}: {}",
                name,
                e
            ),
        }
    }

    async fn apply_download_stats(&self, record: &mut PluginRecord) {
        let Some(name) = record.pypi_name().map(str::to_string) else {
            return;
        };

        match self.sources.download_stats.fetch_recent(&name).await {
            Ok(recent) => {
                if let Some(last_month) = recent.data.last_month {
                    record.monthly_downloads = last_month;
                }
            }
            Err(e) => warn!(
                plugin_key = %record.key,
                source = "pypistats",
                "Failed to fetch downloads for {}: {}",
                name,
                e
            ),
        }
    }
}

/// Merge a package index document into the record's derived fields
pub fn apply_package_document(record: &mut PluginRecord, document: &PackageDocument) {
    let info = &document.info;

    if let Some(version) = &info.version {
        record.latest_version = Some(version.clone());
    }

    record.python_compatibility_raw = info.requires_python.clone();
    record.python_compatibility = Some(requires_python::resolve(
        info.requires_python.as_deref().unwrap_or_default(),
    ));

    if let Some(urls) = info.project_urls.as_ref().filter(|urls| !urls.is_empty()) {
        record.changelog = project_url(urls, CHANGELOG_URL_KEYS);
        record.issues = project_url(urls, ISSUES_URL_KEYS);
    }

    if let Some((created_at, updated_at)) = publication_range(document) {
        record.created_at = Some(created_at);
        record.updated_at = Some(updated_at);
    }
}

/// First URL whose label matches one of `labels`, ignoring case
///
/// Besides the exact `Changelog` and `Issue` labels, common variants such as
/// `Release Notes` and `Bug Tracker` are also accepted.
fn project_url(urls: &IndexMap<String, String>, labels: &[&str]) -> Option<String> {
    labels.iter().find_map(|label| {
        urls.iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(label))
            .map(|(_, url)| url.clone())
    })
}

/// Oldest and newest upload time across every file of every release
fn publication_range(document: &PackageDocument) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let mut upload_times: Vec<DateTime<Utc>> = document
        .releases
        .values()
        .flatten()
        .filter_map(|file| file.upload_timestamp())
        .filter_map(parse_upload_time)
        .collect();

    upload_times.sort();
    Some((*upload_times.first()?, *upload_times.last()?))
}

/// Parse RFC 3339 or zone-less ISO 8601 timestamps; the latter are UTC
fn parse_upload_time(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Round-trip through the structural form so the saved shape is the schema's
fn normalize(record: PluginRecord) -> Result<PluginRecord, SyncError> {
    let key = record.key.clone();
    record
        .to_structural()
        .and_then(PluginRecord::from_structural)
        .map_err(|source| SyncError::Schema { key, source })
}
