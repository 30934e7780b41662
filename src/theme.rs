//! Display theme resolution and persistence.
//!
//! Resolution precedence:
//!
//! ```text
//! stored preference  >  [theme].initial  >  [theme].prefers_light  >  dark
//! ```
//!
//! The applied theme lives on the document element: `data-theme="light"` for
//! light, no attribute for dark. Toggling writes `"light"` or `"dark"` under
//! the single [`THEME_KEY`] preference.

use crate::{cli::ThemeAction, config::FolioConfig, dom::Document, log, notify::Notifier};
use anyhow::Result;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fmt, fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Preference key holding the theme.
pub const THEME_KEY: &str = "theme";

/// Attribute on the document element carrying the applied theme.
const THEME_ATTR: &str = "data-theme";

// ============================================================================
// Theme
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parse a stored value; anything but `"light"`/`"dark"` is rejected.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which rule produced the resolved theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeSource {
    Stored,
    Initial,
    System,
    Default,
}

impl fmt::Display for ThemeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Stored => "stored preference",
            Self::Initial => "[theme].initial",
            Self::System => "[theme].prefers_light",
            Self::Default => "default",
        })
    }
}

// ============================================================================
// Preference Store
// ============================================================================

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error on preference file `{0}`")]
    Io(PathBuf, #[source] io::Error),

    #[error("Preference file `{0}` is not valid TOML")]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("Failed to encode preferences")]
    Encode(#[from] toml::ser::Error),
}

/// Key/value string preferences.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store, for tests and one-off renders.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<FxHashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.values.write().insert(key.to_owned(), value.to_owned());
        store
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.write().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Preferences persisted as a flat TOML table.
///
/// Read once on open; every `set` rewrites the whole file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: RwLock<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`; a missing file is an empty store.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let values = match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content)
                .map_err(|err| StoreError::Parse(path.to_path_buf(), err))?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(StoreError::Io(path.to_path_buf(), err)),
        };

        Ok(Self {
            path: path.to_path_buf(),
            values: RwLock::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self.values.write();
        values.insert(key.to_owned(), value.to_owned());

        let content = toml::to_string(&*values)?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| StoreError::Io(parent.to_path_buf(), err))?;
        }
        fs::write(&self.path, content).map_err(|err| StoreError::Io(self.path.clone(), err))
    }
}

// ============================================================================
// Theme Manager
// ============================================================================

/// Resolves, applies and persists the display theme.
pub struct ThemeManager<'a> {
    store: &'a dyn PreferenceStore,
    initial: Option<Theme>,
    prefers_light: bool,
}

impl<'a> ThemeManager<'a> {
    pub fn new(store: &'a dyn PreferenceStore, initial: Option<Theme>, prefers_light: bool) -> Self {
        Self {
            store,
            initial,
            prefers_light,
        }
    }

    pub fn resolve(&self) -> Theme {
        self.resolve_with_source().0
    }

    /// Resolve the theme and report which rule decided it.
    ///
    /// A stored value other than `"light"`/`"dark"` counts as absent.
    pub fn resolve_with_source(&self) -> (Theme, ThemeSource) {
        if let Some(theme) = self.store.get(THEME_KEY).as_deref().and_then(Theme::parse) {
            return (theme, ThemeSource::Stored);
        }
        if let Some(theme) = self.initial {
            return (theme, ThemeSource::Initial);
        }
        if self.prefers_light {
            return (Theme::Light, ThemeSource::System);
        }
        (Theme::Dark, ThemeSource::Default)
    }

    /// Resolve and apply to the document.
    pub fn init(&self, doc: &mut Document) -> Theme {
        let theme = self.resolve();
        apply_theme(doc, theme);
        theme
    }

    /// Flip the applied theme, persist it, and fire the click cue.
    ///
    /// The document is updated even when persisting fails.
    pub fn toggle(&self, doc: &mut Document, notifier: &dyn Notifier) -> Result<Theme, StoreError> {
        let next = current_theme(doc).toggled();
        apply_theme(doc, next);
        let saved = self.persist(next);
        notifier.click();
        saved.map(|()| next)
    }

    pub fn persist(&self, theme: Theme) -> Result<(), StoreError> {
        self.store.set(THEME_KEY, theme.as_str())
    }
}

/// Theme currently applied to the document.
pub fn current_theme(doc: &Document) -> Theme {
    let light = doc
        .document_element()
        .and_then(|root| doc.attr(root, THEME_ATTR))
        == Some("light");
    if light { Theme::Light } else { Theme::Dark }
}

/// Set `data-theme="light"` on the document element, or remove it for dark.
pub fn apply_theme(doc: &mut Document, theme: Theme) {
    let Some(root) = doc.document_element() else {
        return;
    };
    match theme {
        Theme::Light => doc.set_attr(root, THEME_ATTR, "light"),
        Theme::Dark => doc.remove_attr(root, THEME_ATTR),
    }
}

// ============================================================================
// Command
// ============================================================================

/// `folio theme [show|toggle]`
pub fn run_theme_command(config: &'static FolioConfig, action: ThemeAction) -> Result<()> {
    let store = FileStore::open(&config.store_path())?;
    let manager = ThemeManager::new(&store, config.theme.initial, config.theme.prefers_light);
    let (theme, source) = manager.resolve_with_source();

    match action {
        ThemeAction::Show => {
            log!("theme"; "{theme} ({source})");
        }
        ThemeAction::Toggle => {
            let next = theme.toggled();
            manager.persist(next)?;
            log!("theme"; "{theme} -> {next}, saved to {}", store.path().display());
        }
    }

    Ok(())
}
