//! Emitted-artifact matching for production resolution.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// One unit of emitted production output.
///
/// Bundlers rename processed assets (content hashes), so the served name
/// differs from the source path. Recent host pipelines expose the original
/// source path on each artifact; older ones only expose a symbolic name
/// with no guaranteed path relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildArtifact {
    /// Final served name, e.g. `assets/a.1a2b.png`.
    pub final_name: String,
    /// Symbolic asset name, usually the original file name.
    pub name: Option<String>,
    /// Pre-transform source path, when the pipeline exposes it.
    pub source_path: Option<String>,
}

impl BuildArtifact {
    pub fn new(final_name: impl Into<String>) -> Self {
        Self {
            final_name: final_name.into(),
            name: None,
            source_path: None,
        }
    }

    /// Artifact with a symbolic name only (older pipelines).
    pub fn named(final_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            final_name: final_name.into(),
            name: Some(name.into()),
            source_path: None,
        }
    }

    /// Artifact with its pre-transform source path.
    pub fn with_source(final_name: impl Into<String>, source_path: impl Into<String>) -> Self {
        Self {
            final_name: final_name.into(),
            name: None,
            source_path: Some(source_path.into()),
        }
    }
}

/// Map a pattern's expanded source paths to emitted artifact names.
///
/// Two-tier strategy with an early-return branch:
///
/// 1. **Exact**: when any artifact exposes a source path, an artifact
///    matches iff its source path is a member of the expansion set.
/// 2. **Fallback**: when none does (older pipelines), match by testing
///    whether an expanded file *name* is a substring of the artifact's
///    symbolic name. Looser on purpose: same-named files from unrelated
///    directories also match. Accepted imprecision, kept as-is.
pub fn match_artifacts<'a>(expanded: &[String], artifacts: &'a [BuildArtifact]) -> Vec<&'a str> {
    let exact = artifacts.iter().any(|a| a.source_path.is_some());

    if exact {
        let sources: FxHashSet<&str> = expanded.iter().map(String::as_str).collect();
        return artifacts
            .iter()
            .filter(|a| a.source_path.as_deref().is_some_and(|s| sources.contains(s)))
            .map(|a| a.final_name.as_str())
            .collect();
    }

    let file_names: Vec<&str> = expanded
        .iter()
        .filter_map(|p| p.rsplit('/').next())
        .collect();
    artifacts
        .iter()
        .filter(|a| {
            a.name
                .as_deref()
                .is_some_and(|sym| file_names.iter().any(|name| sym.contains(name)))
        })
        .map(|a| a.final_name.as_str())
        .collect()
}
