use serde::Deserialize;
use std::path::{Path, PathBuf};

// =============================================================================
// Pipeline constants
// =============================================================================

/// Maximum number of enrichments (or README fetches) in flight at once
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Timeout for a single upstream request in milliseconds (30 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 30_000;

/// Icon assigned to plugins that do not declare one
pub const DEFAULT_PLUGIN_ICON: &str = "_default_icon.svg";

/// Environment variable holding the GitHub bearer token
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";

/// User agent sent with every upstream request
pub const USER_AGENT: &str = "plugin-sync";

pub const DEFAULT_PYPI_URL: &str = "https://pypi.org";
pub const DEFAULT_PYPISTATS_URL: &str = "https://pypistats.org";
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

const PLUGINS_DIR: &str = "plugins";
const ICONS_DIR: &str = "icons";
const READMES_DIR: &str = "readmes";
const DIST_FILENAME: &str = "plugins.json";

/// Pipeline configuration
///
/// Every field has a default, so a partial JSON file only overrides what it names.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SyncConfig {
    /// Repository root holding `plugins/`, `icons/` and `readmes/`
    pub root: PathBuf,
    pub registries: RegistriesConfig,
    pub concurrency: usize,
    pub fetch_timeout_ms: u64,
    /// Bearer token for GitHub, read from the environment only
    #[serde(skip)]
    pub github_token: Option<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            registries: RegistriesConfig::default(),
            concurrency: DEFAULT_CONCURRENCY,
            fetch_timeout_ms: FETCH_TIMEOUT_MS,
            github_token: None,
        }
    }
}

/// Upstream base URLs
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct RegistriesConfig {
    pub pypi: String,
    pub pypistats: String,
    pub github: String,
}

impl Default for RegistriesConfig {
    fn default() -> Self {
        Self {
            pypi: DEFAULT_PYPI_URL.to_string(),
            pypistats: DEFAULT_PYPISTATS_URL.to_string(),
            github: DEFAULT_GITHUB_API_URL.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl SyncConfig {
    /// Load configuration from an optional JSON file, then apply the root
    /// override and the GitHub token from the environment.
    pub fn load(file: Option<&Path>, root: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(root) = root {
            config.root = root;
        }
        config.github_token = github_token_from(std::env::var(GITHUB_TOKEN_ENV).ok());

        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn plugins_dir(&self) -> PathBuf {
        self.root.join(PLUGINS_DIR)
    }

    pub fn icons_dir(&self) -> PathBuf {
        self.root.join(ICONS_DIR)
    }

    pub fn readmes_dir(&self) -> PathBuf {
        self.root.join(READMES_DIR)
    }

    pub fn dist_file(&self) -> PathBuf {
        self.root.join(DIST_FILENAME)
    }

    /// Concurrency limit, never below one
    pub fn concurrency_limit(&self) -> usize {
        self.concurrency.max(1)
    }
}

/// Blank tokens count as absent
fn github_token_from(value: Option<String>) -> Option<String> {
    value
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}
