//! `[data]` section configuration.
//!
//! Locations of the two data documents the page is rendered from.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[data]` section in folio.toml - where the profile and projects live.
///
/// A location is either an `http(s)://` URL or a path relative to the site root.
///
/// # Example
/// ```toml
/// [data]
/// config = "data/config.json"
/// projects = "https://example.com/projects.json"
/// timeout = 10
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct DataConfig {
    /// Location of the site profile document.
    #[serde(default = "defaults::data::config")]
    #[educe(Default = defaults::data::config())]
    pub config: String,

    /// Location of the project list document.
    #[serde(default = "defaults::data::projects")]
    #[educe(Default = defaults::data::projects())]
    pub projects: String,

    /// Request timeout in seconds for remote locations.
    #[serde(default = "defaults::data::timeout")]
    #[educe(Default = defaults::data::timeout())]
    pub timeout: u64,
}
