//! Embedded client runtime for the preload scheduler.
//!
//! The scheduler itself is JavaScript (`preload.js`), embedded at compile
//! time and instantiated per build with the resolved URL list and pacing
//! options. Its runtime behavior:
//!
//! - one shared queue, drained front-to-back in resolver order;
//! - `batch_size` workers, each awaiting one image to completion before
//!   popping the next, joined at the end (at most `batch_size` in flight);
//! - per image: a `<link>` hint appended to `<head>`, racing
//!   {load, error, timeout}; the first outcome cancels the other two;
//! - error and timeout log a `console.warn` and count as done - one bad
//!   image never aborts its siblings.
//!
//! # Usage
//!
//! ```ignore
//! use embed::{PRELOAD_JS, PreloadVars, ScriptElement};
//!
//! let code = PRELOAD_JS.render(&vars);
//! let script = ScriptElement::new(code);
//! head.push(script.render());
//! ```

mod template;

pub use template::{Template, TemplateVars};

use crate::config::LinkAttributes;

/// Variables for preload.js.
pub struct PreloadVars {
    pub urls: Vec<String>,
    pub batch_size: usize,
    pub timeout_ms: u64,
    pub attrs: LinkAttributes,
}

impl TemplateVars for PreloadVars {
    fn apply(&self, content: &str) -> String {
        content
            .replace(
                "__PREWARM_URLS__",
                &serde_json::to_string(&self.urls).unwrap_or_else(|_| "[]".to_string()),
            )
            .replace("__PREWARM_BATCH__", &self.batch_size.to_string())
            .replace("__PREWARM_TIMEOUT__", &self.timeout_ms.to_string())
            .replace("__PREWARM_ATTRS__", &self.attrs.to_json())
    }
}

/// Preload scheduler JavaScript with build-time parameter injection.
pub const PRELOAD_JS: Template<PreloadVars> = Template::new(include_str!("preload.js"));

// ============================================================================
// Script Element
// ============================================================================

/// One injectable `<script>` element for the document head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptElement {
    code: String,
}

impl ScriptElement {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }

    /// The raw JavaScript body.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Render as an HTML element for head injection.
    pub fn render(&self) -> String {
        format!("<script>{}</script>", self.code)
    }
}
