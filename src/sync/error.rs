use thiserror::Error;

use crate::store::StoreError;

/// Failure that aborts the enrichment of a single plugin
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Plugin with key {0} not found")]
    NotFound(String),

    #[error("Icon {icon} does not exist for {key}")]
    Validation { key: String, icon: String },

    #[error("Record {key} does not match the plugin schema: {source}")]
    Schema {
        key: String,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}
