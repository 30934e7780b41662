//! Site configuration management for `folio.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                          |
//! |-------------|--------------------------------------------------|
//! | `[data]`    | Locations of the profile and project documents   |
//! | `[build]`   | Output directory, page skeleton, minification    |
//! | `[theme]`   | Initial theme, system signal, preference store   |
//! | `[sound]`   | Interaction cues                                 |
//!
//! # Example
//!
//! ```toml
//! [data]
//! config = "data/config.json"
//! projects = "data/projects.json"
//!
//! [build]
//! output = "public"
//! minify = true
//!
//! [theme]
//! prefers_light = true
//!
//! [sound]
//! enable = false
//! ```

mod build;
mod data;
pub mod defaults;
mod error;
mod theme;

use build::BuildConfig;
use data::DataConfig;
use error::ConfigError;
use theme::{SoundConfig, ThemeConfig};

use crate::cli::{Cli, Commands};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing folio.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct FolioConfig {
    /// CLI arguments reference
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Data document locations
    #[serde(default)]
    pub data: DataConfig,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Theme preference settings
    #[serde(default)]
    pub theme: ThemeConfig,

    /// Interaction cue settings
    #[serde(default)]
    pub sound: SoundConfig,
}

impl FolioConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: FolioConfig = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Path of the theme preference file, with `~` expanded.
    pub fn store_path(&self) -> PathBuf {
        let raw = self.theme.store.to_string_lossy();
        let expanded = PathBuf::from(shellexpand::tilde(&raw).into_owned());
        if expanded.is_relative() {
            self.get_root().join(expanded)
        } else {
            expanded
        }
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &'static Cli) {
        self.cli = Some(cli);

        let base = cli
            .root
            .as_ref()
            .cloned()
            .unwrap_or_else(|| self.get_root().to_owned());
        let root = match &cli.command {
            Commands::Init { name: Some(name) } => base.join(name),
            _ => base,
        };

        self.set_root(&root);
        self.update_path_with_root(&root);

        if let Commands::Build { minify, .. } = &cli.command {
            Self::update_option(&mut self.build.minify, minify.as_ref());
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Update all paths relative to root directory and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path) {
        let cli = self.cli;

        if let Some(cli) = cli {
            Self::update_option(&mut self.build.output, cli.output.as_ref());
        }

        let root = Self::normalize_path(root);
        self.set_root(&root);

        if let Some(cli) = cli {
            self.config_path = Self::normalize_path(&root.join(&cli.config));
        }

        self.build.output = Self::normalize_path(&root.join(&self.build.output));
        if let Some(skeleton) = self.build.skeleton.as_ref() {
            self.build.skeleton = Some(Self::normalize_path(&root.join(skeleton)));
        }
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration for the current command
    pub fn validate(&self) -> Result<()> {
        if self.data.config.trim().is_empty() {
            bail!(ConfigError::Validation("[data.config] must not be empty".into()));
        }
        if self.data.projects.trim().is_empty() {
            bail!(ConfigError::Validation(
                "[data.projects] must not be empty".into()
            ));
        }
        if self.data.timeout == 0 {
            bail!(ConfigError::Validation(
                "[data.timeout] must be at least 1 second".into()
            ));
        }

        match &self.build.skeleton {
            Some(path) if !path.exists() => {
                bail!(ConfigError::Validation("[build.skeleton] not found".into()))
            }
            Some(path) if !path.is_file() => {
                bail!(ConfigError::Validation(
                    "[build.skeleton] is not a file".into()
                ))
            }
            _ => {}
        }

        Ok(())
    }
}
