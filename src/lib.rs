//! Prewarm - image preloading for static build pipelines.
//!
//! The crate is consumed as a library by a host build tool (static site
//! generator or dev server). It has two halves:
//!
//! - **Resolver**: expands the configured asset patterns into a
//!   deduplicated, ordered list of browser-loadable URLs. In dev mode the
//!   expansion output is served as-is; in production mode processed assets
//!   are mapped to their renamed/hashed artifact names.
//! - **Scheduler**: an embedded JavaScript template, instantiated with the
//!   resolved URLs, that prefetches them in the browser with a bounded
//!   worker pool and a per-image timeout.
//!
//! # Usage
//!
//! ```ignore
//! let config: PreloadConfig = toml::from_str(raw)?;
//! let mut plugin = PreloadPlugin::new(config)?;
//!
//! // host "configuration resolved" hook
//! plugin.config_resolved(project_root, Some(public_root));
//!
//! // host "bundle finalized" hook (production builds only)
//! plugin.bundle_finalized(artifacts);
//!
//! // host "HTML transform" hook
//! if let Some(script) = plugin.transform_html(BuildMode::Prod) {
//!     head.push(script.render());
//! }
//! ```

pub mod config;
pub mod embed;
pub mod hooks;
pub mod logger;
pub mod resolver;

pub use config::{ConfigDiagnostics, ConfigError, LinkAttributes, PreloadConfig, TargetEntry};
pub use embed::ScriptElement;
pub use hooks::PreloadPlugin;
pub use resolver::{BuildArtifact, BuildMode, Expander, resolve};
