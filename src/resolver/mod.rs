//! Pattern-to-URL resolution for both build modes.
//!
//! ```text
//! resolver/
//! ├── artifact   # BuildArtifact + two-tier source->output matching
//! ├── expand     # memoized glob expansion (pass-scoped cache)
//! └── mod.rs     # resolve() (this file)
//! ```
//!
//! Dev mode serves source files unbundled, so expansion output is the URL
//! list. Production mode rewrites processed assets to their emitted
//! artifact names; public-root assets are copied verbatim and keep their
//! dev-resolved paths in both modes.

pub mod artifact;
pub mod expand;

pub use artifact::{BuildArtifact, match_artifacts};
pub use expand::Expander;

use rustc_hash::FxHashSet;
use std::path::Path;

use crate::config::PreloadConfig;
use crate::debug;

/// Which flavor of output the host is producing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    /// Unbundled dev serving: source paths are URLs.
    Dev,
    /// Bundled production output: processed assets are renamed.
    Prod,
}

/// Resolve the configured targets into preload URLs.
///
/// Targets contribute in declaration order; the result is deduplicated
/// keeping the first occurrence. Targets that expand to nothing, and
/// public-root targets when `public_root` is `None`, contribute zero URLs
/// without raising an error - partial configurations are normal.
///
/// `artifacts` is consulted only in [`BuildMode::Prod`] for targets not
/// rooted in the public directory.
pub fn resolve(
    mode: BuildMode,
    config: &PreloadConfig,
    project_root: &Path,
    public_root: Option<&Path>,
    artifacts: &[BuildArtifact],
    expander: &mut Expander,
) -> Vec<String> {
    let mut urls = Vec::new();
    let mut seen = FxHashSet::default();

    for entry in config.dirs.entries() {
        let pattern = entry.pattern();

        if entry.from_public_root(config.public_dir) {
            // Public assets are copied verbatim to the output, so their
            // dev-resolved paths equal their production paths
            let Some(root) = public_root else {
                debug!("resolver"; "skipping '{pattern}': no public directory configured");
                continue;
            };
            for path in expander.expand(pattern, root) {
                push_unique(&mut urls, &mut seen, path.clone());
            }
            continue;
        }

        match mode {
            BuildMode::Dev => {
                for path in expander.expand(pattern, project_root) {
                    push_unique(&mut urls, &mut seen, path.clone());
                }
            }
            BuildMode::Prod => {
                let expanded = expander.expand(pattern, project_root).to_vec();
                if expanded.is_empty() {
                    debug!("resolver"; "pattern '{pattern}' matched no source files");
                    continue;
                }
                for final_name in match_artifacts(&expanded, artifacts) {
                    push_unique(&mut urls, &mut seen, final_name.to_string());
                }
            }
        }
    }

    urls
}

fn push_unique(urls: &mut Vec<String>, seen: &mut FxHashSet<String>, url: String) {
    if seen.insert(url.clone()) {
        urls.push(url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Dirs, TargetEntry};
    use std::fs;
    use tempfile::TempDir;

    fn project() -> TempDir {
        let dir = TempDir::new().unwrap();
        let assets = dir.path().join("src/assets");
        fs::create_dir_all(&assets).unwrap();
        fs::write(assets.join("a.png"), "fake png").unwrap();
        fs::write(assets.join("b.png"), "fake png").unwrap();

        let public = dir.path().join("public/covers");
        fs::create_dir_all(&public).unwrap();
        fs::write(public.join("hero.webp"), "fake webp").unwrap();
        dir
    }

    fn config_with(entries: Vec<TargetEntry>) -> PreloadConfig {
        PreloadConfig {
            dirs: Dirs::Many(entries),
            ..PreloadConfig::default()
        }
    }

    #[test]
    fn test_dev_resolution_passes_expansion_through() {
        let dir = project();
        let config = config_with(vec![TargetEntry::simple("src/assets/*.png")]);
        let mut expander = Expander::new();

        let urls = resolve(
            BuildMode::Dev,
            &config,
            dir.path(),
            None,
            &[],
            &mut expander,
        );
        assert_eq!(urls, ["src/assets/a.png", "src/assets/b.png"]);
    }

    #[test]
    fn test_dev_resolution_is_deterministic() {
        let dir = project();
        let config = config_with(vec![TargetEntry::simple("src/assets/*.png")]);

        let first = resolve(
            BuildMode::Dev,
            &config,
            dir.path(),
            None,
            &[],
            &mut Expander::new(),
        );
        let second = resolve(
            BuildMode::Dev,
            &config,
            dir.path(),
            None,
            &[],
            &mut Expander::new(),
        );
        assert_eq!(first, second);
    }

    #[test]
    fn test_duplicate_targets_deduplicated_in_order() {
        let dir = project();
        let config = config_with(vec![
            TargetEntry::simple("src/assets/a.png"),
            TargetEntry::simple("src/assets/*.png"),
        ]);

        let urls = resolve(
            BuildMode::Dev,
            &config,
            dir.path(),
            None,
            &[],
            &mut Expander::new(),
        );
        // a.png keeps its first-seen position
        assert_eq!(urls, ["src/assets/a.png", "src/assets/b.png"]);
    }

    #[test]
    fn test_public_target_without_public_root_contributes_nothing() {
        let dir = project();
        let config = config_with(vec![
            TargetEntry::with_public("covers/*.webp", true),
            TargetEntry::simple("src/assets/*.png"),
        ]);

        let urls = resolve(
            BuildMode::Dev,
            &config,
            dir.path(),
            None,
            &[],
            &mut Expander::new(),
        );
        assert_eq!(urls, ["src/assets/a.png", "src/assets/b.png"]);
    }

    #[test]
    fn test_public_target_resolves_relative_to_public_root() {
        let dir = project();
        let public = dir.path().join("public");
        let config = config_with(vec![TargetEntry::with_public("covers/*.webp", true)]);

        for mode in [BuildMode::Dev, BuildMode::Prod] {
            let urls = resolve(
                mode,
                &config,
                dir.path(),
                Some(&public),
                &[],
                &mut Expander::new(),
            );
            assert_eq!(urls, ["covers/hero.webp"]);
        }
    }

    #[test]
    fn test_prod_maps_sources_to_artifact_names() {
        let dir = project();
        let config = config_with(vec![TargetEntry::simple("src/assets/*.png")]);
        let artifacts = vec![
            BuildArtifact::with_source("assets/a.1a2b.png", "src/assets/a.png"),
            BuildArtifact::with_source("assets/b.3c4d.png", "src/assets/b.png"),
            BuildArtifact::with_source("assets/index.5e6f.js", "src/main.js"),
        ];

        let urls = resolve(
            BuildMode::Prod,
            &config,
            dir.path(),
            None,
            &artifacts,
            &mut Expander::new(),
        );
        assert_eq!(urls, ["assets/a.1a2b.png", "assets/b.3c4d.png"]);
    }

    #[test]
    fn test_prod_fallback_by_symbolic_name() {
        let dir = project();
        let config = config_with(vec![TargetEntry::simple("src/assets/*.png")]);
        let artifacts = vec![
            BuildArtifact::named("assets/a.1a2b.png", "a.png"),
            BuildArtifact::named("assets/index.5e6f.js", "index.js"),
        ];

        let urls = resolve(
            BuildMode::Prod,
            &config,
            dir.path(),
            None,
            &artifacts,
            &mut Expander::new(),
        );
        assert_eq!(urls, ["assets/a.1a2b.png"]);
    }

    #[test]
    fn test_prod_mixed_public_and_processed() {
        let dir = project();
        let public = dir.path().join("public");
        let config = config_with(vec![
            TargetEntry::with_public("covers/*.webp", true),
            TargetEntry::simple("src/assets/*.png"),
        ]);
        let artifacts = vec![BuildArtifact::with_source(
            "assets/a.1a2b.png",
            "src/assets/a.png",
        )];

        let urls = resolve(
            BuildMode::Prod,
            &config,
            dir.path(),
            Some(&public),
            &artifacts,
            &mut Expander::new(),
        );
        assert_eq!(urls, ["covers/hero.webp", "assets/a.1a2b.png"]);
    }

    #[test]
    fn test_empty_expansion_contributes_nothing() {
        let dir = project();
        let config = config_with(vec![TargetEntry::simple("src/assets/*.avif")]);

        for mode in [BuildMode::Dev, BuildMode::Prod] {
            let urls = resolve(mode, &config, dir.path(), None, &[], &mut Expander::new());
            assert!(urls.is_empty());
        }
    }

    #[test]
    fn test_shared_pattern_expanded_once_per_pass() {
        let dir = project();
        let config = config_with(vec![
            TargetEntry::simple("src/assets/*.png"),
            TargetEntry::simple("src/assets/*.png"),
        ]);
        let mut expander = Expander::new();

        let urls = resolve(BuildMode::Dev, &config, dir.path(), None, &[], &mut expander);
        assert_eq!(urls, ["src/assets/a.png", "src/assets/b.png"]);
        assert_eq!(expander.cached_patterns(), 1);
    }
}
