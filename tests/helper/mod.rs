//! Shared fixtures for integration tests

#![allow(dead_code)]

pub mod sources;

pub use sources::FakeSources;

use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use plugin_sync::store::{FsRecordStore, IconSet};
use plugin_sync::sync::Enricher;

/// Temporary repository root with `plugins/`, `icons/` and `readmes/`
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("plugins")).unwrap();
        std::fs::create_dir(dir.path().join("icons")).unwrap();
        Self { dir }
    }

    pub fn plugins_dir(&self) -> PathBuf {
        self.dir.path().join("plugins")
    }

    pub fn icons_dir(&self) -> PathBuf {
        self.dir.path().join("icons")
    }

    pub fn readmes_dir(&self) -> PathBuf {
        self.dir.path().join("readmes")
    }

    pub fn record_path(&self, key: &str) -> PathBuf {
        self.plugins_dir().join(format!("{}.yml", key))
    }

    pub fn store(&self) -> FsRecordStore {
        FsRecordStore::new(self.plugins_dir())
    }

    pub fn enricher(&self, sources: Arc<FakeSources>) -> Enricher {
        Enricher::new(
            Arc::new(self.store()),
            IconSet::new(self.icons_dir()),
            sources.into_sources(),
        )
    }

    /// Write a record authored by hand; `extra` lines are appended verbatim
    pub fn write_record(&self, key: &str, extra: &str) {
        let content = format!(
            "key: {key}\n\
             name: Plugin {key}\n\
             description: Test plugin {key}\n\
             pypi: {key}\n\
             repo: owner/{key}\n\
             github: https://github.com/owner/{key}\n\
             website: ''\n\
             documentation: https://docs.example.org/{key}\n\
             category: Database\n\
             type: official\n\
             maintainers:\n\
             - name: Maintainer\n  github: maintainer\n  avatar: https://avatars.example.org/m\n\
             compatibility:\n  litestar: '>=2.0'\n\
             {extra}"
        );
        std::fs::write(self.record_path(key), content).unwrap();
    }

    pub fn write_raw(&self, key: &str, content: &str) {
        std::fs::write(self.record_path(key), content).unwrap();
    }

    pub fn write_icon(&self, name: &str) {
        std::fs::write(self.icons_dir().join(name), "<svg/>").unwrap();
    }

    pub fn read_record(&self, key: &str) -> String {
        std::fs::read_to_string(self.record_path(key)).unwrap()
    }
}
