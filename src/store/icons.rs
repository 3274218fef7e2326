//! Icon directory lookups

use std::path::PathBuf;

use crate::config::DEFAULT_PLUGIN_ICON;

/// Directory of icon files a record may reference by filename
#[derive(Debug, Clone)]
pub struct IconSet {
    dir: PathBuf,
}

impl IconSet {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Whether `name` resolves to an icon; the default icon always does
    pub async fn contains(&self, name: &str) -> bool {
        if name == DEFAULT_PLUGIN_ICON {
            return true;
        }
        // Bare filenames only
        if name.contains(['/', '\\']) || name.starts_with('.') {
            return false;
        }

        tokio::fs::try_exists(self.dir.join(name))
            .await
            .unwrap_or(false)
    }
}
