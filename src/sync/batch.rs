//! Best-effort sweeps over every stored plugin
//!
//! Items run on the calling task, at most `limit` in flight, and a failing
//! item is logged and counted without affecting its siblings.

use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::source::SourceHost;
use crate::store::{ReadmeStore, RecordStore, StoreError};
use crate::sync::enrich::Enricher;
use crate::sync::error::SyncError;

/// Outcome of [`sync_all`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SyncSummary {
    /// Plugins attempted
    pub count: usize,
    /// Plugins enriched and saved without error
    pub success_count: usize,
    /// Always `true`: per-item failures show only in `success_count` and the logs
    pub success: bool,
}

impl SyncSummary {
    pub fn failure_count(&self) -> usize {
        self.count - self.success_count
    }
}

/// Outcome of [`collect_readmes`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReadmeSummary {
    /// Plugins with a repository that were attempted
    pub total: usize,
    /// READMEs written
    pub saved: usize,
}

/// Enrich every stored plugin
///
/// Only failing to enumerate the store is an error; every per-plugin error is
/// absorbed into the summary.
pub async fn sync_all(enricher: &Enricher, limit: usize) -> Result<SyncSummary, StoreError> {
    let keys = enricher.store().keys().await?;
    info!(count = keys.len(), "Starting sync all");

    let outcomes: Vec<bool> = stream::iter(keys.iter())
        .map(|key| async move {
            info!(plugin_key = %key, "Syncing plugin {}", key);
            enricher
                .enrich(key)
                .await
                .inspect_err(|e| error!(plugin_key = %key, error = %e, "Error syncing plugin {}", key))
                .is_ok()
        })
        .buffer_unordered(limit.max(1))
        .collect()
        .await;

    let summary = SyncSummary {
        count: outcomes.len(),
        success_count: outcomes.iter().filter(|ok| **ok).count(),
        success: true,
    };

    info!(
        count = summary.count,
        success_count = summary.success_count,
        success = summary.success,
        "Sync all completed"
    );
    Ok(summary)
}

enum ReadmeOutcome {
    /// Record has no repository
    Skipped,
    Saved,
    Missing,
    Failed,
}

/// Fetch and save the README of every plugin that has a repository
pub async fn collect_readmes(
    store: &dyn RecordStore,
    source_host: &dyn SourceHost,
    readmes: &ReadmeStore,
    limit: usize,
) -> Result<ReadmeSummary, StoreError> {
    info!("Get README process started");
    let keys = store.keys().await?;

    let outcomes: Vec<ReadmeOutcome> = stream::iter(keys.iter())
        .map(|key| async move {
            fetch_readme(store, source_host, readmes, key)
                .await
                .unwrap_or_else(|e| {
                    error!(plugin_key = %key, error = %e, "Error fetching README for {}", key);
                    ReadmeOutcome::Failed
                })
        })
        .buffer_unordered(limit.max(1))
        .collect()
        .await;

    let summary = ReadmeSummary {
        total: outcomes
            .iter()
            .filter(|outcome| !matches!(outcome, ReadmeOutcome::Skipped))
            .count(),
        saved: outcomes
            .iter()
            .filter(|outcome| matches!(outcome, ReadmeOutcome::Saved))
            .count(),
    };

    info!(
        count = summary.saved,
        total = summary.total,
        "Get README process completed"
    );
    Ok(summary)
}

async fn fetch_readme(
    store: &dyn RecordStore,
    source_host: &dyn SourceHost,
    readmes: &ReadmeStore,
    key: &str,
) -> Result<ReadmeOutcome, SyncError> {
    let record = store
        .load(key)
        .await?
        .ok_or_else(|| SyncError::NotFound(key.to_string()))?;

    let Some(repo) = record.repo_id() else {
        return Ok(ReadmeOutcome::Skipped);
    };

    info!(plugin_key = %key, "Fetching README for plugin {}", key);
    match source_host.readme(repo).await {
        Some(content) => {
            readmes.save(&record.key, &content).await?;
            info!(plugin_key = %key, "README saved for {}", key);
            Ok(ReadmeOutcome::Saved)
        }
        None => {
            warn!(plugin_key = %key, "No README found for {}", key);
            Ok(ReadmeOutcome::Missing)
        }
    }
}
