//! YAML file store for plugin records, one `<key>.yml` per plugin

use std::path::PathBuf;
use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use tracing::{debug, warn};

use crate::plugin::PluginRecord;
use crate::store::error::StoreError;

const RECORD_EXTENSION: &str = "yml";

static KEY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("valid key pattern"));

/// Whether `key` can be used as a record filename stem
pub fn is_valid_key(key: &str) -> bool {
    KEY_PATTERN.is_match(key)
}

/// Durable storage for plugin records
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Load one record, `None` when no record exists for `key`
    async fn load(&self, key: &str) -> Result<Option<PluginRecord>, StoreError>;

    /// Replace the stored record for `record.key`
    async fn save(&self, record: &PluginRecord) -> Result<(), StoreError>;

    /// All stored keys, sorted
    async fn keys(&self) -> Result<Vec<String>, StoreError>;
}

pub struct FsRecordStore {
    dir: PathBuf,
}

impl FsRecordStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        if !is_valid_key(key) {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.{}", key, RECORD_EXTENSION)))
    }
}

#[async_trait]
impl RecordStore for FsRecordStore {
    async fn load(&self, key: &str) -> Result<Option<PluginRecord>, StoreError> {
        let path = self.path_for(key)?;

        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::io(path, e)),
        };

        let record: PluginRecord =
            serde_yaml::from_str(&content).map_err(|source| StoreError::Parse {
                path: path.clone(),
                source,
            })?;

        if record.key != key {
            return Err(StoreError::KeyMismatch {
                path,
                declared: record.key,
            });
        }

        Ok(Some(record))
    }

    async fn save(&self, record: &PluginRecord) -> Result<(), StoreError> {
        let path = self.path_for(&record.key)?;
        let content = serde_yaml::to_string(record).map_err(|source| StoreError::Serialize {
            key: record.key.clone(),
            source,
        })?;

        // Write beside the target, then rename over it
        let tmp_path = path.with_extension(format!("{}.tmp", RECORD_EXTENSION));
        tokio::fs::write(&tmp_path, content)
            .await
            .map_err(|e| StoreError::io(&tmp_path, e))?;
        tokio::fs::rename(&tmp_path, &path)
            .await
            .map_err(|e| StoreError::io(&path, e))?;

        debug!("Saved record {:?}", path);
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>, StoreError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("Plugin directory {:?} does not exist", self.dir);
                return Ok(Vec::new());
            }
            Err(e) => return Err(StoreError::io(&self.dir, e)),
        };

        let mut keys = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StoreError::io(&self.dir, e))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(RECORD_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str())
                && is_valid_key(stem)
            {
                keys.push(stem.to_string());
            }
        }

        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    const RECORD_YAML: &str = r#"key: litestar-saq
name: SAQ
description: Simple async queue plugin
pypi: litestar-saq
repo: cofin/litestar-saq
github: https://github.com/cofin/litestar-saq
website: ''
documentation: https://docs.example.org/saq
category: Background Processing
type: 3rd-party
maintainers:
- name: Cody
  github: cofin
  avatar: https://avatars.example.org/cofin
compatibility:
  litestar: '>=2.0'
stars: 42
"#;

    fn store_with(files: &[(&str, &str)]) -> (TempDir, FsRecordStore) {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            std::fs::write(dir.path().join(name), content).unwrap();
        }
        let store = FsRecordStore::new(dir.path());
        (dir, store)
    }

    #[tokio::test]
    async fn load_parses_yaml_record() {
        let (_dir, store) = store_with(&[("litestar-saq.yml", RECORD_YAML)]);

        let record = store.load("litestar-saq").await.unwrap().unwrap();

        assert_eq!(record.name, "SAQ");
        assert_eq!(record.stars, 42);
        assert_eq!(record.maintainers.len(), 1);
        assert_eq!(record.icon, None);
    }

    #[tokio::test]
    async fn load_returns_none_for_missing_record() {
        let (_dir, store) = store_with(&[]);

        assert!(store.load("absent").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn load_reports_malformed_record() {
        let (_dir, store) = store_with(&[("broken.yml", "key: broken\nname: [unterminated")]);

        let result = store.load("broken").await;

        assert!(matches!(result, Err(StoreError::Parse { .. })));
    }

    #[tokio::test]
    async fn load_rejects_record_declaring_another_key() {
        let (_dir, store) = store_with(&[("alpha.yml", RECORD_YAML)]);

        let result = store.load("alpha").await;

        assert!(matches!(
            result,
            Err(StoreError::KeyMismatch { ref declared, .. }) if declared == "litestar-saq"
        ));
    }

    #[tokio::test]
    async fn save_replaces_record_and_reloads_identically() {
        let (dir, store) = store_with(&[("litestar-saq.yml", RECORD_YAML)]);
        let mut record = store.load("litestar-saq").await.unwrap().unwrap();
        record.stars = 99;

        store.save(&record).await.unwrap();

        assert_eq!(store.load("litestar-saq").await.unwrap(), Some(record));
        assert!(!dir.path().join("litestar-saq.yml.tmp").exists());
    }

    #[tokio::test]
    async fn keys_lists_sorted_yml_stems_only() {
        let (_dir, store) = store_with(&[
            ("zeta.yml", RECORD_YAML),
            ("alpha.yml", RECORD_YAML),
            ("notes.txt", "ignored"),
            ("draft.yaml", RECORD_YAML),
        ]);

        assert_eq!(store.keys().await.unwrap(), vec!["alpha", "zeta"]);
    }

    #[tokio::test]
    async fn keys_is_empty_when_directory_is_missing() {
        let dir = TempDir::new().unwrap();
        let store = FsRecordStore::new(dir.path().join("missing"));

        assert!(store.keys().await.unwrap().is_empty());
    }

    #[rstest]
    #[case("litestar-granian", true)]
    #[case("advanced_alchemy.v2", true)]
    #[case("", false)]
    #[case("../etc/passwd", false)]
    #[case("nested/key", false)]
    #[case(".hidden", false)]
    fn is_valid_key_accepts_filename_safe_keys(#[case] key: &str, #[case] expected: bool) {
        assert_eq!(is_valid_key(key), expected);
    }

    #[tokio::test]
    async fn load_rejects_path_traversal_key() {
        let (_dir, store) = store_with(&[]);

        let result = store.load("../outside").await;

        assert!(matches!(result, Err(StoreError::InvalidKey(_))));
    }
}
