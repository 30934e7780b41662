//! Page controller.
//!
//! Owns the document and replays the page's lifecycle on it:
//!
//! ```text
//! mount:  theme ─► bind targets ─► profile ─► tag filter ─► grid
//! click:  card ─► close control ─► theme toggle ─► nav ─► click cue
//! key:    Escape closes the modal, Enter on a card opens it
//! input:  control value ─► grid
//! ```
//!
//! Event dispatch goes by element attributes (`data-project`,
//! `data-close-modal`, `data-click-sfx`) and the bound target handles.

use crate::{
    config::FolioConfig,
    dom::{Document, NodeId},
    log,
    model::{Project, SiteConfig},
    notify::Notifier,
    pipeline::{self, SortMode},
    render::{
        self, CLICK_CUE_ATTR, CLOSE_MODAL_ATTR, ModalController, ModalState, PROJECT_INDEX_ATTR,
        RenderError, Targets,
    },
    theme::{PreferenceStore, Theme, ThemeManager, current_theme},
};
use chrono::Datelike;

/// Built-in page skeleton exposing every insertion point.
pub const DEFAULT_SKELETON: &str = include_str!("embed/index.html");

/// Settings the page reads at mount time.
#[derive(Debug, Clone, Copy)]
pub struct PageOptions {
    pub initial_theme: Option<Theme>,
    pub prefers_light: bool,
    /// Year shown in the footer.
    pub year: i32,
}

impl PageOptions {
    pub fn from_config(config: &FolioConfig) -> Self {
        Self {
            initial_theme: config.theme.initial,
            prefers_light: config.theme.prefers_light,
            year: chrono::Local::now().year(),
        }
    }
}

pub struct Page<'a> {
    doc: Document,
    projects: Vec<Project>,
    targets: Targets,
    modal: ModalController,
    theme: ThemeManager<'a>,
    notifier: &'a dyn Notifier,
}

impl<'a> Page<'a> {
    /// Apply the theme and render everything once.
    pub fn mount(
        mut doc: Document,
        config: SiteConfig,
        projects: Vec<Project>,
        store: &'a dyn PreferenceStore,
        notifier: &'a dyn Notifier,
        options: PageOptions,
    ) -> Result<Self, RenderError> {
        let theme = ThemeManager::new(store, options.initial_theme, options.prefers_light);
        theme.init(&mut doc);

        let targets = Targets::bind(&doc)?;
        let modal = ModalController::new(&mut doc, targets.modal);

        render::render_config(&mut doc, &targets.config, &config, options.year);
        render::render_tag_filter(&mut doc, &targets.filters, &pipeline::tag_universe(&projects), "");

        let mut page = Self {
            doc,
            projects,
            targets,
            modal,
            theme,
            notifier,
        };
        page.render_projects();
        Ok(page)
    }

    // ------------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------------

    /// Deliver a click on `target`.
    pub fn click(&mut self, target: NodeId) {
        if let Some(index) = self.card_index(target)
            && self.link_inside_card(target).is_none()
        {
            self.open_project(index);
        }

        if self.doc.closest(target, &attr_selector(CLOSE_MODAL_ATTR)).is_some() {
            self.close_modal();
        }

        if self.is_inside(self.targets.chrome.theme_toggle, target) {
            self.toggle_theme();
        }

        if let Some(nav) = self.targets.chrome.nav {
            if self.is_inside(self.targets.chrome.nav_toggle, target) {
                self.doc.toggle_class(nav, "open");
            }
            if self
                .doc
                .closest(target, "a")
                .is_some_and(|link| self.doc.is_inclusive_ancestor(nav, link))
            {
                self.doc.remove_class(nav, "open");
            }
        }

        // Document-level listener: runs after the element handlers
        if self.doc.closest(target, &attr_selector(CLICK_CUE_ATTR)).is_some() {
            self.notifier.click();
        }
    }

    /// Deliver a key press with focus on `target`.
    pub fn key_down(&mut self, target: NodeId, key: &str) {
        match key {
            "Enter" => {
                if let Some(index) = self.card_index(target)
                    && self.link_inside_card(target).is_none()
                {
                    self.open_project(index);
                }
            }
            "Escape" => self.close_modal(),
            _ => {}
        }
    }

    /// Deliver a value change on a form control.
    ///
    /// The three list controls store the value in the document and re-render
    /// the grid; other controls are ignored.
    pub fn input(&mut self, control: NodeId, value: &str) {
        let filters = self.targets.filters;
        if control == filters.search_input {
            self.doc.set_attr(control, "value", value);
        } else if control == filters.tag_filter || control == filters.sort_select {
            select_option(&mut self.doc, control, value);
        } else {
            return;
        }
        self.render_projects();
    }

    // ------------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------------

    /// Flip the theme; a preference that cannot be saved is logged.
    pub fn toggle_theme(&mut self) -> Theme {
        if let Err(err) = self.theme.toggle(&mut self.doc, self.notifier) {
            log!("theme"; "{err}");
        }
        current_theme(&self.doc)
    }

    /// Open the modal on the project at `index` of the full list.
    pub fn open_project(&mut self, index: usize) -> bool {
        let Some(project) = self.projects.get(index) else {
            return false;
        };
        self.modal.open(&mut self.doc, project, self.notifier);
        true
    }

    pub fn close_modal(&mut self) {
        self.modal.close(&mut self.doc, self.notifier);
    }

    /// Projects for the current control values.
    pub fn visible_projects(&self) -> Vec<&Project> {
        let (query, tag, sort) = self.controls();
        pipeline::visible_projects(&self.projects, &query, &tag, sort)
    }

    /// Index of the project titled `title`; exact match first, then ignoring case.
    pub fn find_project(&self, title: &str) -> Option<usize> {
        self.projects
            .iter()
            .position(|p| p.title == title)
            .or_else(|| {
                let title = title.to_lowercase();
                self.projects.iter().position(|p| p.title.to_lowercase() == title)
            })
    }

    pub const fn modal_state(&self) -> ModalState {
        self.modal.state()
    }

    pub const fn targets(&self) -> &Targets {
        &self.targets
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub const fn document(&self) -> &Document {
        &self.doc
    }

    pub fn into_document(self) -> Document {
        self.doc
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    fn render_projects(&mut self) {
        let (query, tag, sort) = self.controls();
        let visible = pipeline::visible_indices(&self.projects, &query, &tag, sort);
        let projects = &self.projects;
        render::render_grid(
            &mut self.doc,
            &self.targets.grid,
            visible.into_iter().map(|index| (index, &projects[index])),
        );
    }

    /// Current (query, tag, sort) read back from the controls.
    fn controls(&self) -> (String, String, SortMode) {
        let filters = &self.targets.filters;
        let query = self
            .doc
            .attr(filters.search_input, "value")
            .unwrap_or_default()
            .to_owned();
        let tag = select_value(&self.doc, filters.tag_filter);
        let sort = SortMode::parse(&select_value(&self.doc, filters.sort_select));
        (query, tag, sort)
    }

    /// Project index of the grid card containing `target`.
    fn card_index(&self, target: NodeId) -> Option<usize> {
        let card = self.doc.closest(target, "article.card")?;
        if !self.doc.is_inclusive_ancestor(self.targets.grid.grid, card) {
            return None;
        }
        self.doc.attr(card, PROJECT_INDEX_ATTR)?.parse().ok()
    }

    /// Anchor between `target` and its card, if any.
    fn link_inside_card(&self, target: NodeId) -> Option<NodeId> {
        let card = self.doc.closest(target, "article.card")?;
        self.doc
            .closest(target, "a")
            .filter(|&link| self.doc.is_inclusive_ancestor(card, link))
    }

    fn is_inside(&self, element: Option<NodeId>, target: NodeId) -> bool {
        element.is_some_and(|element| self.doc.is_inclusive_ancestor(element, target))
    }
}

fn attr_selector(attr: &str) -> String {
    format!("[{attr}]")
}

/// Value of a `<select>`: its `selected` option, else the first one.
///
/// An option without a `value` attribute stands for its text.
fn select_value(doc: &Document, select: NodeId) -> String {
    let options: Vec<NodeId> = doc
        .children(select)
        .iter()
        .copied()
        .filter(|&node| doc.tag(node) == Some("option"))
        .collect();
    let chosen = options
        .iter()
        .copied()
        .find(|&option| doc.has_attr(option, "selected"))
        .or_else(|| options.first().copied());

    chosen
        .map(|option| match doc.attr(option, "value") {
            Some(value) => value.to_owned(),
            None => doc.text_content(option),
        })
        .unwrap_or_default()
}

/// Mark the option whose value is `value` as selected, unmarking the rest.
fn select_option(doc: &mut Document, select: NodeId, value: &str) {
    let options = doc.children(select).to_vec();
    for option in options {
        let matches = match doc.attr(option, "value") {
            Some(v) => v == value,
            None => doc.text_content(option) == value,
        };
        if matches {
            doc.set_attr(option, "selected", "");
        } else {
            doc.remove_attr(option, "selected");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dom::parse_html,
        model::defaults,
        notify::testing::{Cue, Recorder},
        theme::{MemoryStore, THEME_KEY},
    };

    const OPTIONS: PageOptions = PageOptions {
        initial_theme: None,
        prefers_light: false,
        year: 2026,
    };

    fn mount<'a>(store: &'a MemoryStore, recorder: &'a Recorder) -> Page<'a> {
        let doc = parse_html(DEFAULT_SKELETON.as_bytes()).unwrap();
        Page::mount(
            doc,
            defaults::site_config(),
            defaults::projects(),
            store,
            recorder,
            OPTIONS,
        )
        .unwrap()
    }

    /// First descendant of `node` matching `selector`.
    fn find(doc: &Document, node: NodeId, selector: &str) -> NodeId {
        let selector = crate::dom::Selector::parse(selector);
        doc.descendants(node)
            .into_iter()
            .find(|&n| doc.matches(n, &selector))
            .unwrap()
    }

    fn grid_titles(page: &Page<'_>) -> Vec<String> {
        let doc = page.document();
        doc.children(page.targets().grid.grid)
            .iter()
            .map(|&card| doc.text_content(find(doc, card, "h3.card-title")))
            .collect()
    }

    fn card(page: &Page<'_>, position: usize) -> NodeId {
        page.document().children(page.targets().grid.grid)[position]
    }

    #[test]
    fn test_mount_renders_everything() {
        let store = MemoryStore::new();
        let recorder = Recorder::default();
        let page = mount(&store, &recorder);
        let doc = page.document();

        assert_eq!(doc.text_content(page.targets().config.brand_name), "Your Name");
        assert_eq!(doc.children(page.targets().filters.tag_filter).len(), 9);
        assert_eq!(
            grid_titles(&page),
            [
                "RAG System for Enterprise Docs",
                "Demand Forecasting Platform",
                "Defect Detection (Vision)"
            ]
        );
        assert_eq!(page.modal_state(), ModalState::Closed);
        assert!(recorder.cues().is_empty());
    }

    #[test]
    fn test_mount_missing_target_fails() {
        let doc = parse_html(b"<html><body></body></html>").unwrap();
        let store = MemoryStore::new();
        let result = Page::mount(
            doc,
            SiteConfig::default(),
            Vec::new(),
            &store,
            &crate::notify::Silent,
            OPTIONS,
        );
        assert!(matches!(result, Err(RenderError::MissingTarget(_))));
    }

    #[test]
    fn test_input_filters_and_sorts() {
        let store = MemoryStore::new();
        let recorder = Recorder::default();
        let mut page = mount(&store, &recorder);
        let filters = page.targets().filters;

        page.input(filters.sort_select, "alpha");
        assert_eq!(
            grid_titles(&page),
            [
                "Defect Detection (Vision)",
                "Demand Forecasting Platform",
                "RAG System for Enterprise Docs"
            ]
        );

        page.input(filters.tag_filter, "RAG");
        assert_eq!(grid_titles(&page), ["RAG System for Enterprise Docs"]);

        page.input(filters.tag_filter, "");
        page.input(filters.search_input, "  PYTHON ");
        page.input(filters.sort_select, "stars");
        assert_eq!(
            grid_titles(&page),
            ["RAG System for Enterprise Docs", "Demand Forecasting Platform"]
        );
        assert_eq!(page.visible_projects().len(), 2);
    }

    #[test]
    fn test_card_click_opens_but_link_click_does_not() {
        let store = MemoryStore::new();
        let recorder = Recorder::default();
        let mut page = mount(&store, &recorder);

        let first = card(&page, 0);
        let link = find(page.document(), first, "a");
        page.click(link);
        assert_eq!(page.modal_state(), ModalState::Closed);
        assert_eq!(recorder.cues(), [Cue::Click]);

        let title = find(page.document(), first, "h3.card-title");
        page.click(title);
        assert_eq!(page.modal_state(), ModalState::Open);
        let modal_title = page.document().get_element_by_id("modalTitle").unwrap();
        assert_eq!(
            page.document().text_content(modal_title),
            "RAG System for Enterprise Docs"
        );
        assert_eq!(recorder.cues(), [Cue::Click, Cue::Open]);
    }

    #[test]
    fn test_card_click_resolves_filtered_index() {
        let store = MemoryStore::new();
        let recorder = Recorder::default();
        let mut page = mount(&store, &recorder);

        let tag_filter = page.targets().filters.tag_filter;
        page.input(tag_filter, "ML");
        page.click(card(&page, 0));

        let modal_title = page.document().get_element_by_id("modalTitle").unwrap();
        assert_eq!(
            page.document().text_content(modal_title),
            "Defect Detection (Vision)"
        );
    }

    #[test]
    fn test_enter_on_card_opens_escape_closes() {
        let store = MemoryStore::new();
        let recorder = Recorder::default();
        let mut page = mount(&store, &recorder);

        let first = card(&page, 1);
        page.key_down(first, "Enter");
        assert_eq!(page.modal_state(), ModalState::Open);

        let body = page.document().query("body").unwrap();
        page.key_down(body, "Escape");
        assert_eq!(page.modal_state(), ModalState::Closed);
        assert_eq!(recorder.cues(), [Cue::Open, Cue::Close]);

        page.key_down(first, "a");
        assert_eq!(page.modal_state(), ModalState::Closed);
    }

    #[test]
    fn test_close_controls() {
        let store = MemoryStore::new();
        let recorder = Recorder::default();
        let mut page = mount(&store, &recorder);
        let modal = page.targets().modal.modal;

        let controls = page.document().query_all("[data-close-modal]");
        assert_eq!(controls.len(), 2);
        for close in controls {
            assert!(page.open_project(0));
            page.click(close);
            assert_eq!(page.modal_state(), ModalState::Closed);
            assert_eq!(page.document().attr(modal, "aria-hidden"), Some("true"));
        }
        assert!(!page.open_project(99));
    }

    #[test]
    fn test_theme_toggle_click() {
        let store = MemoryStore::new();
        let recorder = Recorder::default();
        let mut page = mount(&store, &recorder);
        let toggle = page.targets().chrome.theme_toggle.unwrap();

        page.click(toggle);
        assert_eq!(current_theme(page.document()), Theme::Light);
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("light"));
        assert_eq!(recorder.cues(), [Cue::Click]);

        page.click(toggle);
        assert_eq!(current_theme(page.document()), Theme::Dark);
        assert_eq!(recorder.cues(), [Cue::Click, Cue::Click]);
    }

    #[test]
    fn test_stored_theme_applied_on_mount() {
        let store = MemoryStore::with(THEME_KEY, "light");
        let recorder = Recorder::default();
        let page = mount(&store, &recorder);
        let root = page.document().document_element().unwrap();
        assert_eq!(page.document().attr(root, "data-theme"), Some("light"));
    }

    #[test]
    fn test_nav_toggle_and_link() {
        let store = MemoryStore::new();
        let recorder = Recorder::default();
        let mut page = mount(&store, &recorder);
        let nav = page.targets().chrome.nav.unwrap();
        let toggle = page.targets().chrome.nav_toggle.unwrap();

        page.click(toggle);
        assert!(page.document().has_class(nav, "open"));

        let link = find(page.document(), nav, "a");
        page.click(link);
        assert!(!page.document().has_class(nav, "open"));
    }

    #[test]
    fn test_find_project() {
        let store = MemoryStore::new();
        let recorder = Recorder::default();
        let page = mount(&store, &recorder);
        assert_eq!(page.find_project("Demand Forecasting Platform"), Some(1));
        assert_eq!(page.find_project("demand forecasting platform"), Some(1));
        assert_eq!(page.find_project("nope"), None);
    }

    #[test]
    fn test_select_value_without_selection_is_first() {
        let doc = parse_html(
            b"<select id=\"s\"><option>one</option><option value=\"2\">two</option></select>",
        )
        .unwrap();
        let select = doc.get_element_by_id("s").unwrap();
        assert_eq!(select_value(&doc, select), "one");
    }
}
