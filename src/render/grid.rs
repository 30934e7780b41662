//! Tag filter options and project cards.

use super::{FilterTargets, GridTargets, PROJECT_INDEX_ATTR, css_url, external_link};
use crate::{
    dom::{Document, NodeId},
    model::Project,
    pipeline::ALL_TAGS_LABEL,
};

/// Fill the tag `<select>`: the "All tags" option (empty value) then one
/// option per tag. The option whose value equals `selected` is marked; an
/// unknown value selects "All tags".
pub fn render_tag_filter(doc: &mut Document, targets: &FilterTargets, tags: &[&str], selected: &str) {
    let select = targets.tag_filter;
    doc.clear_children(select);

    let all = doc.el_text("option", &[("value", "")], ALL_TAGS_LABEL);
    doc.append(select, all);
    let mut chosen = all;

    for &tag in tags {
        let option = doc.el_text("option", &[("value", tag)], tag);
        doc.append(select, option);
        if tag == selected {
            chosen = option;
        }
    }
    doc.set_attr(chosen, "selected", "");
}

/// Replace the grid with one card per project, in the given order.
///
/// Each item pairs the project with its index in the full list; the index
/// is what a click on the card resolves back to.
pub fn render_grid<'a>(
    doc: &mut Document,
    targets: &GridTargets,
    projects: impl IntoIterator<Item = (usize, &'a Project)>,
) {
    doc.clear_children(targets.grid);
    for (index, project) in projects {
        let card = project_card(doc, index, project);
        doc.append(targets.grid, card);
    }
}

/// `article.card` with media, body (title, description, tag chips) and
/// action links for the present URLs.
pub fn project_card(doc: &mut Document, index: usize, project: &Project) -> NodeId {
    let card = doc.el(
        "article",
        &[
            ("class", "card"),
            ("tabindex", "0"),
            (PROJECT_INDEX_ATTR, index.to_string().as_str()),
        ],
    );

    let media = doc.el("div", &[("class", "card-media")]);
    if !project.image.is_empty() {
        doc.set_style(media, "background-image", Some(css_url(&project.image).as_str()));
    }

    let body = doc.el("div", &[("class", "card-body")]);
    let title = doc.el_text("h3", &[("class", "card-title")], &project.title);
    let desc = doc.el_text("p", &[("class", "card-desc")], &project.description);
    let chips = chip_row(doc, &project.tags);
    doc.append_all(body, [title, desc, chips]);

    let actions = action_links(doc, project);
    doc.append_all(card, [media, body, actions]);
    card
}

/// `div.chip-row` with one `span.chip` per label.
pub(super) fn chip_row(doc: &mut Document, labels: &[String]) -> NodeId {
    let row = doc.el("div", &[("class", "chip-row")]);
    for label in labels {
        let chip = doc.el_text("span", &[("class", "chip")], label);
        doc.append(row, chip);
    }
    row
}

/// `div.card-actions` with GitHub and Demo links when present.
pub(super) fn action_links(doc: &mut Document, project: &Project) -> NodeId {
    let actions = doc.el("div", &[("class", "card-actions")]);
    for (href, label) in [(&project.github, "GitHub"), (&project.demo, "Demo")] {
        if !href.is_empty() {
            let link = external_link(doc, href, label, None);
            doc.append(actions, link);
        }
    }
    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dom::{outer_html, parse_html},
        model::defaults,
        page::DEFAULT_SKELETON,
        pipeline::tag_universe,
    };

    fn page() -> (Document, FilterTargets, GridTargets) {
        let doc = parse_html(DEFAULT_SKELETON.as_bytes()).unwrap();
        let filters = FilterTargets::bind(&doc).unwrap();
        let grid = GridTargets::bind(&doc).unwrap();
        (doc, filters, grid)
    }

    fn option_texts(doc: &Document, select: NodeId) -> Vec<String> {
        doc.children(select)
            .iter()
            .map(|&option| doc.text_content(option))
            .collect()
    }

    #[test]
    fn test_tag_filter_options() {
        let (mut doc, filters, _) = page();
        let projects = defaults::projects();
        render_tag_filter(&mut doc, &filters, &tag_universe(&projects), "");

        let texts = option_texts(&doc, filters.tag_filter);
        assert_eq!(texts[0], "All tags");
        assert_eq!(texts.len(), 1 + 8);
        let first = doc.children(filters.tag_filter)[0];
        assert_eq!(doc.attr(first, "value"), Some(""));
        assert!(doc.has_attr(first, "selected"));
    }

    #[test]
    fn test_tag_filter_selected_and_rerender() {
        let (mut doc, filters, _) = page();
        render_tag_filter(&mut doc, &filters, &["CV", "LLM"], "LLM");
        render_tag_filter(&mut doc, &filters, &["CV", "LLM", "RAG"], "RAG");

        let options = doc.children(filters.tag_filter).to_vec();
        assert_eq!(options.len(), 4);
        let selected: Vec<_> = options
            .iter()
            .filter(|&&o| doc.has_attr(o, "selected"))
            .map(|&o| doc.text_content(o))
            .collect();
        assert_eq!(selected, ["RAG"]);
    }

    #[test]
    fn test_unknown_selected_tag_falls_back_to_all() {
        let (mut doc, filters, _) = page();
        render_tag_filter(&mut doc, &filters, &["CV"], "NLP");
        let first = doc.children(filters.tag_filter)[0];
        assert!(doc.has_attr(first, "selected"));
    }

    #[test]
    fn test_card_markup() {
        let mut doc = Document::new();
        let project = Project {
            title: "Demo".into(),
            description: "A & B".into(),
            tags: vec!["LLM".into()],
            image: "img/a.png".into(),
            github: "https://github.com/x/y".into(),
            ..Default::default()
        };
        let card = project_card(&mut doc, 2, &project);

        assert_eq!(
            outer_html(&doc, card),
            concat!(
                r#"<article class="card" tabindex="0" data-project="2">"#,
                r#"<div class="card-media" style="background-image: url(&apos;img/a.png&apos;)"></div>"#,
                r#"<div class="card-body"><h3 class="card-title">Demo</h3><p class="card-desc">A &amp; B</p>"#,
                r#"<div class="chip-row"><span class="chip">LLM</span></div></div>"#,
                r#"<div class="card-actions"><a href="https://github.com/x/y" target="_blank" rel="noopener" data-click-sfx="">GitHub</a></div>"#,
                r#"</article>"#,
            )
        );
    }

    #[test]
    fn test_card_without_optional_parts() {
        let mut doc = Document::new();
        let project = Project {
            title: "Bare".into(),
            ..Default::default()
        };
        let card = project_card(&mut doc, 0, &project);

        let media = doc.children(card)[0];
        assert!(!doc.has_attr(media, "style"));
        let body = doc.children(card)[1];
        let desc = doc.children(body)[1];
        assert_eq!(doc.text_content(desc), "");
        let actions = doc.children(card)[2];
        assert!(doc.children(actions).is_empty());
    }

    #[test]
    fn test_grid_keeps_given_order_and_replaces() {
        let (mut doc, _, grid) = page();
        let projects = defaults::projects();

        render_grid(&mut doc, &grid, projects.iter().enumerate().rev());
        let indices: Vec<_> = doc
            .children(grid.grid)
            .iter()
            .map(|&card| doc.attr(card, "data-project").unwrap().to_owned())
            .collect();
        assert_eq!(indices, ["2", "1", "0"]);

        render_grid(&mut doc, &grid, projects.iter().enumerate().take(1));
        assert_eq!(doc.children(grid.grid).len(), 1);
        assert_eq!(doc.query_all("article.card").len(), 1);
    }
}
