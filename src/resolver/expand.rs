//! Memoized glob expansion, scoped to one resolution pass.

use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};

/// Pass-lifetime expansion cache.
///
/// Expanding a pattern walks the filesystem, so repeated targets sharing a
/// pattern reuse the first expansion. The cache lives for one resolution
/// pass only; the source tree is not mutated mid-pass, which makes the
/// memoization safe.
#[derive(Debug, Default)]
pub struct Expander {
    cache: FxHashMap<(String, PathBuf), Vec<String>>,
}

impl Expander {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expand `pattern` relative to `cwd`.
    ///
    /// Returns matched files as forward-slash paths relative to `cwd`, in
    /// filesystem order. A pattern matching nothing yields an empty slice;
    /// that is a normal outcome, not an error.
    pub fn expand(&mut self, pattern: &str, cwd: &Path) -> &[String] {
        self.cache
            .entry((pattern.to_string(), cwd.to_path_buf()))
            .or_insert_with(|| expand_uncached(pattern, cwd))
    }

    #[cfg(test)]
    pub(crate) fn cached_patterns(&self) -> usize {
        self.cache.len()
    }
}

fn expand_uncached(pattern: &str, cwd: &Path) -> Vec<String> {
    let full = cwd.join(pattern);
    let Some(full) = full.to_str() else {
        return Vec::new();
    };
    // Invalid patterns are rejected at config validation; treat a failure
    // here as an empty expansion
    let Ok(paths) = glob::glob(full) else {
        return Vec::new();
    };

    paths
        .filter_map(Result::ok)
        .filter(|p| p.is_file())
        .filter_map(|p| {
            let rel = p.strip_prefix(cwd).unwrap_or(&p);
            to_url_path(rel)
        })
        .collect()
}

/// Convert a relative filesystem path to a forward-slash URL path.
fn to_url_path(path: &Path) -> Option<String> {
    let parts: Vec<&str> = path
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<_>>()?;
    Some(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        let assets = dir.path().join("src/assets");
        fs::create_dir_all(&assets).unwrap();
        fs::write(assets.join("a.png"), "fake png").unwrap();
        fs::write(assets.join("b.png"), "fake png").unwrap();
        fs::write(assets.join("notes.txt"), "not an image").unwrap();
        dir
    }

    #[test]
    fn test_expand_simple() {
        let dir = fixture();
        let mut expander = Expander::new();

        let matches = expander.expand("src/assets/*.png", dir.path());
        assert_eq!(matches, ["src/assets/a.png", "src/assets/b.png"]);
    }

    #[test]
    fn test_expand_no_matches() {
        let dir = fixture();
        let mut expander = Expander::new();

        assert!(expander.expand("src/assets/*.avif", dir.path()).is_empty());
        assert!(expander.expand("missing/**/*.png", dir.path()).is_empty());
    }

    #[test]
    fn test_expand_skips_directories() {
        let dir = fixture();
        let mut expander = Expander::new();

        // `src/*` would match the assets directory itself
        let matches = expander.expand("src/*", dir.path()).to_vec();
        assert!(matches.is_empty());
    }

    #[test]
    fn test_expansion_memoized_per_key() {
        let dir = fixture();
        let mut expander = Expander::new();

        let first = expander.expand("src/assets/*.png", dir.path()).to_vec();
        let second = expander.expand("src/assets/*.png", dir.path()).to_vec();
        assert_eq!(first, second);
        assert_eq!(expander.cached_patterns(), 1);

        // Different cwd is a different key
        let other = TempDir::new().unwrap();
        expander.expand("src/assets/*.png", other.path());
        assert_eq!(expander.cached_patterns(), 2);
    }
}
