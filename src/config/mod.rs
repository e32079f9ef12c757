//! `[preload]` section configuration.
//!
//! Declares which image assets to preload and how the client scheduler
//! should pace them:
//!
//! ```toml
//! [preload]
//! dirs = [
//!     "src/assets/banners/*.png",             # processed by the bundler
//!     { dir = "covers/*.webp", public_dir = true }, # served from the public root
//! ]
//! batch_size = 2
//! timeout = 3000
//! attrs = { rel = "preload", crossorigin = "anonymous" }
//! ```
//!
//! Validation is eager and aggregating: every violation found is reported
//! in one [`ConfigDiagnostics`] batch before any resolution work runs.

mod error;

pub use error::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, FieldPath};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Field paths
// ============================================================================

pub(crate) struct Fields {
    pub dirs: FieldPath,
    pub attrs: FieldPath,
    pub batch_size: FieldPath,
    pub timeout: FieldPath,
}

// ============================================================================
// Main Config
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreloadConfig {
    /// Asset patterns to preload.
    /// Examples:
    /// - `"src/assets/*.png"` → expanded against the project root
    /// - `{ dir = "covers/*.webp", public_dir = true }` → expanded against the public root
    pub dirs: Dirs,

    /// Extra attributes copied onto each generated `<link>` element.
    /// `rel` defaults to `"prefetch"` and `fetchpriority` to `"low"`;
    /// `as` and `href` are reserved and rejected.
    pub attrs: BTreeMap<String, String>,

    /// Number of images fetched concurrently by the client scheduler.
    pub batch_size: usize,

    /// Default origin for bare-string patterns: when true they are
    /// expanded against the public root instead of the project root.
    pub public_dir: bool,

    /// Per-image timeout in milliseconds (minimum 1000).
    pub timeout: u64,
}

impl Default for PreloadConfig {
    fn default() -> Self {
        Self {
            dirs: Dirs::default(),
            attrs: BTreeMap::new(),
            batch_size: 2,
            public_dir: false,
            timeout: 3000,
        }
    }
}

impl PreloadConfig {
    pub(crate) const FIELDS: Fields = Fields {
        dirs: FieldPath::new("preload.dirs"),
        attrs: FieldPath::new("preload.attrs"),
        batch_size: FieldPath::new("preload.batch_size"),
        timeout: FieldPath::new("preload.timeout"),
    };

    /// Parse a `[preload]` table from TOML and validate it.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config
            .validate()
            .map_err(ConfigError::Diagnostics)
            .map(|()| config)
    }

    /// Validate the configuration, collecting every violation.
    ///
    /// Runs before any resolution work. Checks:
    /// - `batch_size >= 1` and `timeout >= 1000`
    /// - every pattern non-empty and glob-expandable
    /// - reserved `<link>` attributes not overridden
    pub fn validate(&self) -> Result<(), ConfigDiagnostics> {
        let mut diag = ConfigDiagnostics::new();

        if self.batch_size < 1 {
            diag.error(Self::FIELDS.batch_size, "must be at least 1");
        }

        if self.timeout < 1000 {
            diag.error(
                Self::FIELDS.timeout,
                format!("{} ms is below the 1000 ms minimum", self.timeout),
            );
        }

        let total = self.dirs.entries().len();
        for (i, entry) in self.dirs.entries().iter().enumerate() {
            // Only show index if there are multiple entries
            let prefix = if total > 1 {
                format!("[{i}] ")
            } else {
                String::new()
            };

            let pattern = entry.pattern();
            if pattern.trim().is_empty() {
                diag.error(Self::FIELDS.dirs, format!("{prefix}pattern must not be empty"));
            } else if let Err(e) = glob::Pattern::new(pattern) {
                diag.error(
                    Self::FIELDS.dirs,
                    format!("{prefix}pattern '{pattern}' is not a valid glob: {e}"),
                );
            }
        }

        for reserved in LinkAttributes::RESERVED {
            if self.attrs.contains_key(reserved) {
                diag.error_with_hint(
                    Self::FIELDS.attrs,
                    format!("'{reserved}' is reserved and cannot be overridden"),
                    "the scheduler always sets as=\"image\" and href to the resolved URL",
                );
            }
        }

        diag.into_result()
    }
}

// ============================================================================
// Dirs (single pattern or list)
// ============================================================================

/// The `dirs` field accepts either one pattern or a list of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dirs {
    /// Single bare pattern, normalized to a one-element sequence.
    One(TargetEntry),
    /// Ordered sequence of patterns.
    Many(Vec<TargetEntry>),
}

impl Default for Dirs {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl Dirs {
    /// View the declared targets as an ordered slice.
    pub fn entries(&self) -> &[TargetEntry] {
        match self {
            Self::One(entry) => std::slice::from_ref(entry),
            Self::Many(entries) => entries,
        }
    }
}

// ============================================================================
// Target Entry
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TargetEntry {
    /// Simple pattern string.
    Simple(String),
    /// Full format with a per-target public-root flag.
    Full {
        /// Glob pattern (relative to the project or public root).
        dir: String,
        /// Expand against the public root (overrides the config default).
        public_dir: Option<bool>,
    },
}

impl TargetEntry {
    /// Get the glob pattern.
    pub fn pattern(&self) -> &str {
        match self {
            Self::Simple(p) => p,
            Self::Full { dir, .. } => dir,
        }
    }

    /// Whether this target is expanded against the public root.
    pub fn from_public_root(&self, default: bool) -> bool {
        match self {
            Self::Simple(_) => default,
            Self::Full { public_dir, .. } => public_dir.unwrap_or(default),
        }
    }

    /// Create a simple entry.
    #[cfg(test)]
    pub fn simple(pattern: impl Into<String>) -> Self {
        Self::Simple(pattern.into())
    }

    /// Create a full entry with an explicit public-root flag.
    #[cfg(test)]
    pub fn with_public(pattern: impl Into<String>, public_dir: bool) -> Self {
        Self::Full {
            dir: pattern.into(),
            public_dir: Some(public_dir),
        }
    }
}

// ============================================================================
// Link Attributes
// ============================================================================

/// Final attribute set for generated `<link>` elements.
///
/// Merges user attributes over the defaults (`rel = "prefetch"`,
/// `fetchpriority = "low"`). `as` and `href` are owned by the scheduler
/// and stripped here even though validation already rejects them.
#[derive(Debug, Clone, Serialize)]
pub struct LinkAttributes(BTreeMap<String, String>);

impl LinkAttributes {
    /// Attributes the scheduler always sets itself.
    pub const RESERVED: [&'static str; 2] = ["as", "href"];

    pub fn merged(attrs: &BTreeMap<String, String>) -> Self {
        let mut map = attrs.clone();
        for reserved in Self::RESERVED {
            map.remove(reserved);
        }
        map.entry("rel".to_string())
            .or_insert_with(|| "prefetch".to_string());
        map.entry("fetchpriority".to_string())
            .or_insert_with(|| "low".to_string());
        Self(map)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Serialize as a JSON object for template injection.
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.0).unwrap_or_else(|_| "{}".to_string())
    }
}

// ============================================================================
// Tests
// ============================================================================
