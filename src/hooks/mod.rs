//! Host build-pipeline hook surface.
//!
//! The host calls three notifications over one build:
//!
//! 1. [`PreloadPlugin::config_resolved`] - project root and (optional)
//!    public root are known;
//! 2. [`PreloadPlugin::bundle_finalized`] - production artifact set is
//!    known (production builds only);
//! 3. [`PreloadPlugin::transform_html`] - the page is being assembled and
//!    injectable head elements are requested.
//!
//! Construction validates the configuration eagerly; after that nothing
//! in the hook path returns an error to the host - a misbehaving target
//! degrades to contributing zero URLs.

use std::path::PathBuf;

use crate::config::{ConfigDiagnostics, LinkAttributes, PreloadConfig};
use crate::embed::{PRELOAD_JS, PreloadVars, ScriptElement};
use crate::resolver::{BuildArtifact, BuildMode, Expander, resolve};
use crate::{debug, log};

/// The image-preload plugin, driven by the host's build lifecycle.
#[derive(Debug)]
pub struct PreloadPlugin {
    config: PreloadConfig,
    project_root: PathBuf,
    public_root: Option<PathBuf>,
    artifacts: Vec<BuildArtifact>,
}

impl PreloadPlugin {
    /// Create a plugin from an already-deserialized configuration.
    ///
    /// Fails fast with every violation found, before any resolution work.
    pub fn new(config: PreloadConfig) -> Result<Self, ConfigDiagnostics> {
        config.validate()?;
        Ok(Self {
            config,
            project_root: PathBuf::from("."),
            public_root: None,
            artifacts: Vec::new(),
        })
    }

    /// "Configuration resolved" notification.
    ///
    /// `public_root` is `None` when the host project defines no
    /// public-assets directory; public-root targets then resolve to
    /// nothing.
    pub fn config_resolved(
        &mut self,
        project_root: impl Into<PathBuf>,
        public_root: Option<PathBuf>,
    ) {
        self.project_root = project_root.into();
        self.public_root = public_root;
    }

    /// "Bundle finalized" notification (production builds only).
    pub fn bundle_finalized(&mut self, artifacts: Vec<BuildArtifact>) {
        debug!("preload"; "bundle finalized with {} artifacts", artifacts.len());
        self.artifacts = artifacts;
    }

    /// "HTML transform" notification.
    ///
    /// Runs one resolution pass with a fresh expansion cache and renders
    /// the scheduler script. Returns `None` when no URLs resolve, so the
    /// host injects nothing.
    pub fn transform_html(&self, mode: BuildMode) -> Option<ScriptElement> {
        let mut expander = Expander::new();
        let urls = resolve(
            mode,
            &self.config,
            &self.project_root,
            self.public_root.as_deref(),
            &self.artifacts,
            &mut expander,
        );

        if urls.is_empty() {
            debug!("preload"; "no preload targets resolved, skipping injection");
            return None;
        }

        log!("preload"; "scheduling {} image{} (batch {}, timeout {} ms)",
            urls.len(),
            if urls.len() == 1 { "" } else { "s" },
            self.config.batch_size,
            self.config.timeout,
        );

        let vars = PreloadVars {
            urls,
            batch_size: self.config.batch_size,
            timeout_ms: self.config.timeout,
            attrs: LinkAttributes::merged(&self.config.attrs),
        };
        Some(ScriptElement::new(PRELOAD_JS.render(&vars)))
    }
}
