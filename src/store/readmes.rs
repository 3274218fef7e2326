//! README artifacts, one `<key>.md` per plugin

use std::path::PathBuf;

use tracing::debug;

use crate::store::error::StoreError;
use crate::store::records::is_valid_key;

pub struct ReadmeStore {
    dir: PathBuf,
}

impl ReadmeStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Write the README for `key`, creating the directory on demand
    pub async fn save(&self, key: &str, content: &str) -> Result<PathBuf, StoreError> {
        if !is_valid_key(key) {
            return Err(StoreError::InvalidKey(key.to_string()));
        }

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| StoreError::io(&self.dir, e))?;

        let path = self.dir.join(format!("{}.md", key));
        tokio::fs::write(&path, content)
            .await
            .map_err(|e| StoreError::io(&path, e))?;

        debug!("Saved README {:?}", path);
        Ok(path)
    }
}
