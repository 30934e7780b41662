//! `[build]` section configuration.
//!
//! Contains output settings for the rendered page.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[build]` section in folio.toml - page output configuration.
///
/// # Example
/// ```toml
/// [build]
/// output = "public"          # Output directory
/// skeleton = "index.html"    # Page markup to render into
/// minify = true              # Minify HTML
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    /// Site root directory (set from the CLI, never read from file).
    #[serde(skip)]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Output directory for `index.html`.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Page skeleton; the embedded one is used when unset.
    #[serde(default = "defaults::build::skeleton")]
    #[educe(Default = defaults::build::skeleton())]
    pub skeleton: Option<PathBuf>,

    /// Minify the written HTML.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub minify: bool,
}
