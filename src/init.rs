//! Site initialization module.
//!
//! Creates a new site with default configuration, data documents and page
//! skeleton.

use crate::{
    config::FolioConfig,
    log,
    model::defaults,
    page::DEFAULT_SKELETON,
};
use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Files to write ignore patterns to
const IGNORE_FILES: &[&str] = &[".gitignore", ".ignore"];

/// Default config filename
const CONFIG_FILE: &str = "folio.toml";

/// Page skeleton filename
const SKELETON_FILE: &str = "index.html";

/// Default site directory structure
const SITE_DIRS: &[&str] = &["data", "assets"];

/// Create a new site with default structure
pub fn new_site(config: &'static FolioConfig, has_name: bool) -> Result<()> {
    let root = config.get_root();

    // Init in place requires an empty directory
    if !has_name && !is_dir_empty(root)? {
        bail!(
            "Current directory is not empty. Use `folio init <SITE_NAME>` to create in a subdirectory."
        );
    }

    init_site_structure(root)?;
    init_default_config(root)?;
    init_data_documents(root, config)?;
    fs::write(root.join(SKELETON_FILE), DEFAULT_SKELETON)?;
    init_ignored_files(root, &[Path::new("/public/"), Path::new("/.folio/")])?;

    log!("init"; "created site at {}", root.display());
    Ok(())
}

/// Check if a directory is completely empty
fn is_dir_empty(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    Ok(fs::read_dir(path)?.next().is_none())
}

/// Write default configuration file, pointing at the written skeleton
fn init_default_config(root: &Path) -> Result<()> {
    let mut config = FolioConfig::default();
    config.build.skeleton = Some(PathBuf::from(SKELETON_FILE));

    let content = toml::to_string_pretty(&config)?;
    fs::write(root.join(CONFIG_FILE), content)?;
    Ok(())
}

/// Write the built-in profile and project list to the configured locations
fn init_data_documents(root: &Path, config: &FolioConfig) -> Result<()> {
    write_json(root, &config.data.config, &defaults::site_config())?;
    write_json(root, &config.data.projects, &defaults::projects())
}

fn write_json<T: Serialize>(root: &Path, location: &str, value: &T) -> Result<()> {
    if crate::source::is_remote(location) {
        return Ok(());
    }
    let path = root.join(location);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(value)?;
    fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))
}

/// Create site directory structure
fn init_site_structure(root: &Path) -> Result<()> {
    for dir in SITE_DIRS {
        let path = root.join(dir);
        if path.exists() {
            bail!(
                "Path `{}` already exists. Try `folio init <SITE_NAME>` instead.",
                path.display()
            );
        }
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
    }
    Ok(())
}

/// Initialize .gitignore and .ignore files with specified paths
fn init_ignored_files(root: &Path, paths: &[&Path]) -> Result<()> {
    let content = paths
        .iter()
        .filter_map(|p| p.to_str())
        .collect::<Vec<_>>()
        .join("\n");

    for filename in IGNORE_FILES {
        let path = root.join(filename);
        if !path.exists() {
            fs::write(&path, &content)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Project, SiteConfig};

    fn leak_config(root: &Path) -> &'static FolioConfig {
        let mut config = FolioConfig::default();
        config.set_root(root);
        Box::leak(Box::new(config))
    }

    #[test]
    fn test_new_site_layout() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("site");
        new_site(leak_config(&root), true).unwrap();

        for file in ["folio.toml", "index.html", "data/config.json", "data/projects.json", ".gitignore"] {
            assert!(root.join(file).is_file(), "{file}");
        }
        assert!(root.join("assets").is_dir());
    }

    #[test]
    fn test_written_documents_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        new_site(leak_config(dir.path()), false).unwrap();

        let config = FolioConfig::from_path(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config.build.skeleton, Some(PathBuf::from(SKELETON_FILE)));

        let profile: SiteConfig =
            serde_json::from_str(&fs::read_to_string(dir.path().join("data/config.json")).unwrap())
                .unwrap();
        assert_eq!(profile, defaults::site_config());

        let projects: Vec<Project> = serde_json::from_str(
            &fs::read_to_string(dir.path().join("data/projects.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(projects, defaults::projects());
    }

    #[test]
    fn test_remote_locations_not_written() {
        let dir = tempfile::tempdir().unwrap();
        write_json(dir.path(), "https://example.com/projects.json", &defaults::projects()).unwrap();
        write_json(dir.path(), "data/projects.json", &defaults::projects()).unwrap();

        assert!(dir.path().join("data/projects.json").is_file());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_init_in_place_requires_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "keep").unwrap();

        let err = new_site(leak_config(dir.path()), false).unwrap_err();
        assert!(err.to_string().contains("not empty"));
    }

    #[test]
    fn test_ignore_file_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".gitignore"), "target").unwrap();

        init_ignored_files(dir.path(), &[Path::new("/public/")]).unwrap();
        assert_eq!(fs::read_to_string(dir.path().join(".gitignore")).unwrap(), "target");
        assert_eq!(fs::read_to_string(dir.path().join(".ignore")).unwrap(), "/public/");
    }
}
