//! Plugin record types shared by the store, the enrichment engine and the distribution

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Catalog category of a plugin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "AI")]
    Ai,
    Analytics,
    Authentication,
    #[serde(rename = "Background Processing")]
    BackgroundProcessing,
    Database,
    Deployment,
    Monitoring,
    Performance,
    Serialization,
    Security,
    Testing,
    #[serde(rename = "UI")]
    Ui,
}

impl Category {
    /// Returns the label used in records and the distribution
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Ai => "AI",
            Category::Analytics => "Analytics",
            Category::Authentication => "Authentication",
            Category::BackgroundProcessing => "Background Processing",
            Category::Database => "Database",
            Category::Deployment => "Deployment",
            Category::Monitoring => "Monitoring",
            Category::Performance => "Performance",
            Category::Serialization => "Serialization",
            Category::Security => "Security",
            Category::Testing => "Testing",
            Category::Ui => "UI",
        }
    }
}

/// Who distributes the plugin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DistributionType {
    #[serde(rename = "official")]
    Official,
    #[serde(rename = "3rd-party", alias = "third-party")]
    ThirdParty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maintainer {
    pub name: String,
    /// GitHub handle
    pub github: String,
    pub avatar: String,
}

/// Framework versions the plugin declares support for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameworkCompatibility {
    pub litestar: String,
}

/// Python versions admitted by a package's `requires_python`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PythonCompatibility {
    /// Expression as published upstream
    pub raw: String,
    /// Normalized specifier set, or `"Invalid format"`
    pub specifier_set: String,
    /// Candidate labels the specifier set admits, in candidate order
    pub compatible: Vec<String>,
}

/// One catalog entry, persisted as `plugins/<key>.yml`
///
/// Authored fields come first; everything from `stars` on is owned by
/// enrichment and never edited by hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginRecord {
    pub key: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub pypi: Option<String>,
    #[serde(default)]
    pub repo: Option<String>,
    #[serde(default)]
    pub github: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub documentation: String,
    pub category: Category,
    #[serde(rename = "type")]
    pub distribution: DistributionType,
    #[serde(default)]
    pub maintainers: Vec<Maintainer>,
    pub compatibility: FrameworkCompatibility,
    #[serde(default)]
    pub icon: Option<String>,

    #[serde(default)]
    pub stars: u64,
    #[serde(default)]
    pub monthly_downloads: u64,
    #[serde(default)]
    pub latest_version: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub python_compatibility_raw: Option<String>,
    #[serde(default)]
    pub python_compatibility: Option<PythonCompatibility>,
    #[serde(default)]
    pub changelog: Option<String>,
    #[serde(default)]
    pub issues: Option<String>,
}

impl PluginRecord {
    /// Package index identifier, if one is set
    pub fn pypi_name(&self) -> Option<&str> {
        non_blank(self.pypi.as_deref())
    }

    /// `owner/repo` identifier, if one is set
    pub fn repo_id(&self) -> Option<&str> {
        non_blank(self.repo.as_deref())
    }

    /// Declared icon filename, if one is set
    pub fn icon_name(&self) -> Option<&str> {
        non_blank(self.icon.as_deref())
    }

    /// Generic tree-of-maps form used by the distribution
    pub fn to_structural(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }

    /// Rebuild a record from its structural form, dropping unknown fields
    pub fn from_structural(value: serde_json::Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
