//! Page building orchestration.
//!
//! # Architecture
//!
//! ```text
//! build_page()
//!     │
//!     ├── load_site_data() ──► profile + projects (fetched or built-in)
//!     │
//!     ├── load_skeleton() ──► page markup → Document
//!     │
//!     ├── Page::mount() ──► theme, profile, tag filter, grid
//!     │
//!     ├── apply_controls() ──► CLI query/tag/sort, optional open modal
//!     │
//!     └── write_page() ──► <output>/index.html (optionally minified)
//! ```

use crate::{
    cli::{Cli, Commands, FilterArgs},
    config::FolioConfig,
    dom::{self, Document},
    log,
    notify::{Bell, Notifier},
    page::{DEFAULT_SKELETON, Page, PageOptions},
    source::{Fetcher, SiteData, load_site_data},
    theme::{FileStore, MemoryStore, PreferenceStore},
    utils::minify::minify_html,
};
use anyhow::{Context, Result, anyhow};
use std::{fs, path::PathBuf, time::Duration};

/// Output file name inside the output directory.
const INDEX_FILE: &str = "index.html";

/// Render the page and write it to the output directory.
pub fn build_page(config: &'static FolioConfig, cli: &'static Cli) -> Result<()> {
    let data = load_data(config);
    let doc = load_skeleton(config)?;

    let store = open_store(config);
    let bell = Bell::new(config.sound.enable);

    let (filter, open) = match &cli.command {
        Commands::Build { filter, open, .. } => (filter.clone(), open.as_deref()),
        _ => (FilterArgs::default(), None),
    };

    let doc = render(doc, data, store.as_ref(), &bell, PageOptions::from_config(config), &filter, open)?;
    let path = write_page(&doc, config)?;

    log!("build"; "wrote {}", path.display());
    Ok(())
}

/// Fetch both data documents, logging where each came from.
pub fn load_data(config: &FolioConfig) -> SiteData {
    let fetcher = Fetcher::new(config.get_root(), Duration::from_secs(config.data.timeout));
    let data = load_site_data(&fetcher, &config.data.config, &config.data.projects);

    log!(
        "data";
        "profile: {} ({}), projects: {} ({})",
        config.data.config,
        data.config_origin,
        config.data.projects,
        data.projects_origin
    );
    data
}

/// Parse the configured skeleton, or the built-in one.
fn load_skeleton(config: &FolioConfig) -> Result<Document> {
    let content = match &config.build.skeleton {
        Some(path) => fs::read(path)
            .with_context(|| format!("Failed to read skeleton {}", path.display()))?,
        None => DEFAULT_SKELETON.as_bytes().to_vec(),
    };
    dom::parse_html(&content).context("Failed to parse page skeleton")
}

/// Preference file store; an unreadable file degrades to an in-memory store.
fn open_store(config: &FolioConfig) -> Box<dyn PreferenceStore> {
    match FileStore::open(&config.store_path()) {
        Ok(store) => Box::new(store),
        Err(err) => {
            log!("theme"; "{err}, preferences will not be saved");
            Box::new(MemoryStore::new())
        }
    }
}

/// Mount the page, then replay the CLI controls as user input.
fn render(
    doc: Document,
    data: SiteData,
    store: &dyn PreferenceStore,
    notifier: &dyn Notifier,
    options: PageOptions,
    filter: &FilterArgs,
    open: Option<&str>,
) -> Result<Document> {
    let mut page = Page::mount(doc, data.config, data.projects, store, notifier, options)?;
    apply_controls(&mut page, filter);

    if let Some(title) = open {
        let index = page
            .find_project(title)
            .ok_or_else(|| anyhow!("No project titled `{title}`"))?;
        page.open_project(index);
    }

    let visible = page.visible_projects().len();
    log!("build"; "{visible} of {} projects visible", page.projects().len());
    Ok(page.into_document())
}

/// Feed non-default filter values through the page's input handling.
fn apply_controls(page: &mut Page<'_>, filter: &FilterArgs) {
    let controls = page.targets().filters;
    if !filter.query.is_empty() {
        page.input(controls.search_input, &filter.query);
    }
    if !filter.tag.is_empty() {
        page.input(controls.tag_filter, &filter.tag);
    }
    if !filter.sort.is_empty() {
        page.input(controls.sort_select, &filter.sort);
    }
}

/// Serialize, minify if enabled, and write `<output>/index.html`.
fn write_page(doc: &Document, config: &FolioConfig) -> Result<PathBuf> {
    let output = &config.build.output;
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory {}", output.display()))?;

    let html = dom::to_html(doc);
    let html = minify_html(html.as_bytes(), config);

    let path = output.join(INDEX_FILE);
    fs::write(&path, &*html).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{notify::Silent, theme::THEME_KEY};

    const OPTIONS: PageOptions = PageOptions {
        initial_theme: None,
        prefers_light: false,
        year: 2026,
    };

    fn skeleton() -> Document {
        dom::parse_html(DEFAULT_SKELETON.as_bytes()).unwrap()
    }

    fn render_with(filter: &FilterArgs, open: Option<&str>) -> Result<Document> {
        let store = MemoryStore::new();
        render(skeleton(), SiteData::fallback(), &store, &Silent, OPTIONS, filter, open)
    }

    fn card_count(doc: &Document) -> usize {
        let grid = doc.get_element_by_id("projectsGrid").unwrap();
        doc.children(grid)
            .iter()
            .filter(|&&node| doc.has_class(node, "card"))
            .count()
    }

    #[test]
    fn test_render_defaults() {
        let doc = render_with(&FilterArgs::default(), None).unwrap();
        assert_eq!(card_count(&doc), 3);

        let html = dom::to_html(&doc);
        assert!(html.contains("RAG System for Enterprise Docs"));
        assert!(!html.contains("data-theme"));
        assert!(html.contains("2026"));
    }

    #[test]
    fn test_render_applies_filter() {
        let filter = FilterArgs {
            tag: "RAG".into(),
            sort: "alpha".into(),
            ..Default::default()
        };
        let doc = render_with(&filter, None).unwrap();
        assert_eq!(card_count(&doc), 1);

        let tag_filter = doc.get_element_by_id("tagFilter").unwrap();
        let selected: Vec<_> = doc
            .children(tag_filter)
            .iter()
            .filter(|&&o| doc.has_attr(o, "selected"))
            .map(|&o| doc.text_content(o))
            .collect();
        assert_eq!(selected, ["RAG"]);
    }

    #[test]
    fn test_render_open_project() {
        let doc = render_with(&FilterArgs::default(), Some("Demand Forecasting Platform")).unwrap();
        let modal = doc.get_element_by_id("projectModal").unwrap();
        assert_eq!(doc.attr(modal, "aria-hidden"), Some("false"));

        let err = render_with(&FilterArgs::default(), Some("Missing")).unwrap_err();
        assert!(err.to_string().contains("Missing"));
    }

    #[test]
    fn test_render_uses_stored_theme() {
        let store = MemoryStore::with(THEME_KEY, "light");
        let doc = render(
            skeleton(),
            SiteData::fallback(),
            &store,
            &Silent,
            OPTIONS,
            &FilterArgs::default(),
            None,
        )
        .unwrap();
        let root = doc.document_element().unwrap();
        assert_eq!(doc.attr(root, "data-theme"), Some("light"));
    }

    #[test]
    fn test_skeleton_without_targets_fails() {
        let store = MemoryStore::new();
        let doc = dom::parse_html(b"<html><body><p>empty</p></body></html>").unwrap();
        let result = render(doc, SiteData::fallback(), &store, &Silent, OPTIONS, &FilterArgs::default(), None);
        assert!(result.is_err());
    }

    #[test]
    fn test_write_page_creates_output() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = FolioConfig::default();
        config.build.output = dir.path().join("public");

        let doc = render_with(&FilterArgs::default(), None).unwrap();
        let path = write_page(&doc, &config).unwrap();

        assert_eq!(path, dir.path().join("public/index.html"));
        let written = fs::read_to_string(path).unwrap();
        assert!(written.starts_with("<!DOCTYPE html>"));
        assert!(written.contains(r#"id="projectsGrid""#));
    }

    #[test]
    fn test_load_skeleton_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        fs::write(&path, "<html><body><h1 id=\"x\">Hi</h1></body></html>").unwrap();

        let mut config = FolioConfig::default();
        config.build.skeleton = Some(path);
        let doc = load_skeleton(&config).unwrap();
        assert!(doc.get_element_by_id("x").is_some());
    }

    #[test]
    fn test_open_store_falls_back_on_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = FolioConfig::default();
        config.set_root(dir.path());
        fs::create_dir_all(dir.path().join(".folio")).unwrap();
        fs::write(dir.path().join(".folio/preferences.toml"), "not = [valid").unwrap();

        let store = open_store(&config);
        assert_eq!(store.get(THEME_KEY), None);
        assert!(store.set(THEME_KEY, "light").is_ok());
    }
}
