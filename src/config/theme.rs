//! `[theme]` and `[sound]` section configuration.

use super::defaults;
use crate::theme::Theme;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[theme]` section in folio.toml - display preference resolution.
///
/// # Example
/// ```toml
/// [theme]
/// initial = "light"                    # Used when nothing is stored
/// prefers_light = false                # System light-scheme signal
/// store = "~/.config/folio/prefs.toml" # Where the toggle is persisted
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ThemeConfig {
    /// Explicit initial theme, below a stored preference.
    #[serde(default)]
    pub initial: Option<Theme>,

    /// Whether the system asks for a light color scheme.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub prefers_light: bool,

    /// Preference file (relative to the site root, `~` expanded).
    #[serde(default = "defaults::theme::store")]
    #[educe(Default = defaults::theme::store())]
    pub store: PathBuf,
}

/// `[sound]` section in folio.toml - interaction cues.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SoundConfig {
    /// Ring the terminal bell on click/open/close cues.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enable: bool,
}

#[cfg(test)]
mod tests {
    use super::super::FolioConfig;
    use crate::theme::Theme;
    use std::path::PathBuf;

    #[test]
    fn test_theme_config() {
        let config = r#"
            [theme]
            initial = "light"
            prefers_light = true
            store = "prefs.toml"

            [sound]
            enable = false
        "#;
        let config: FolioConfig = toml::from_str(config).unwrap();

        assert_eq!(config.theme.initial, Some(Theme::Light));
        assert!(config.theme.prefers_light);
        assert_eq!(config.theme.store, PathBuf::from("prefs.toml"));
        assert!(!config.sound.enable);
    }

    #[test]
    fn test_theme_config_defaults() {
        let config: FolioConfig = toml::from_str("").unwrap();

        assert_eq!(config.theme.initial, None);
        assert!(!config.theme.prefers_light);
        assert_eq!(config.theme.store, PathBuf::from(".folio/preferences.toml"));
        assert!(config.sound.enable);
    }

    #[test]
    fn test_invalid_initial_theme() {
        let config = r#"
            [theme]
            initial = "sepia"
        "#;
        let result: Result<FolioConfig, _> = toml::from_str(config);
        assert!(result.is_err());
    }
}
