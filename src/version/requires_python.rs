//! Python compatibility resolution using PEP 440 version specifiers

use std::str::FromStr;

use pep508_rs::pep440_rs::{Version, VersionSpecifiers};
use tracing::warn;

use crate::plugin::PythonCompatibility;

/// Python versions a plugin can be advertised as compatible with
pub const PYTHON_VERSION_CANDIDATES: &[&str] = &["3.9", "3.10", "3.11", "3.12", "3.13", "3.14"];

/// Specifier set reported for expressions that fail to parse
pub const INVALID_FORMAT: &str = "Invalid format";

/// Resolve a `requires_python` expression against the candidate versions
///
/// Never fails: an empty expression yields an empty result and a malformed
/// one yields [`INVALID_FORMAT`] with no compatible versions.
pub fn resolve(raw: &str) -> PythonCompatibility {
    if raw.trim().is_empty() {
        return PythonCompatibility {
            raw: raw.to_string(),
            ..PythonCompatibility::default()
        };
    }

    let clauses = non_empty_clauses(raw);
    if clauses.is_empty() {
        return PythonCompatibility {
            raw: raw.to_string(),
            specifier_set: String::new(),
            compatible: PYTHON_VERSION_CANDIDATES
                .iter()
                .map(|candidate| candidate.to_string())
                .collect(),
        };
    }

    let Ok(specifiers) = VersionSpecifiers::from_str(&clauses).inspect_err(|e| {
        warn!("Failed to parse requires_python '{}': {}", raw, e);
    }) else {
        return PythonCompatibility {
            raw: raw.to_string(),
            specifier_set: INVALID_FORMAT.to_string(),
            compatible: Vec::new(),
        };
    };

    let compatible = PYTHON_VERSION_CANDIDATES
        .iter()
        .filter(|candidate| {
            Version::from_str(candidate)
                .map(|version| specifiers.contains(&version))
                .unwrap_or(false)
        })
        .map(|candidate| candidate.to_string())
        .collect();

    PythonCompatibility {
        raw: raw.to_string(),
        specifier_set: normalize(&specifiers),
        compatible,
    }
}

/// Comma-separated clauses with empty pieces dropped, so `">=3.7,"` parses
fn non_empty_clauses(raw: &str) -> String {
    raw.split(',')
        .map(str::trim)
        .filter(|clause| !clause.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

/// Canonical clause strings, sorted and comma-joined without spaces
fn normalize(specifiers: &VersionSpecifiers) -> String {
    let mut clauses: Vec<String> = specifiers.iter().map(|s| s.to_string()).collect();
    clauses.sort();
    clauses.join(",")
}
