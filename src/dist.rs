//! Consolidated distribution file consumed by the catalog website

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::info;

use crate::store::{RecordStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum DistError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Stored record {0} disappeared during the build")]
    Missing(String),

    #[error("Failed to encode distribution: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Structural form of every stored record, in key order
async fn collect_records(store: &dyn RecordStore) -> Result<Vec<Value>, DistError> {
    let keys = store.keys().await?;

    let mut records = Vec::with_capacity(keys.len());
    for key in keys {
        let record = store.load(&key).await?.ok_or(DistError::Missing(key))?;
        records.push(record.to_structural()?);
    }
    Ok(records)
}

/// JSON array with two-space indentation and a trailing newline
fn encode(records: &[Value]) -> Result<String, DistError> {
    let mut output = serde_json::to_string_pretty(records)?;
    output.push('\n');
    Ok(output)
}

/// Rewrite the distribution file at `path` from the current records
///
/// Returns the number of records written.
pub async fn build_distribution(store: &dyn RecordStore, path: &Path) -> Result<usize, DistError> {
    let records = collect_records(store).await?;
    let output = encode(&records)?;

    tokio::fs::write(path, output)
        .await
        .map_err(|source| DistError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    info!(count = records.len(), "Wrote distribution to {:?}", path);
    Ok(records.len())
}
