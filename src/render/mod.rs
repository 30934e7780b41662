//! Projections of the data documents onto the page.
//!
//! Each renderer writes only into the handles it is given (see [`targets`])
//! and fully replaces what it rendered before, so rendering twice with
//! different data leaves no trace of the first run.
//!
//! | Renderer              | Handles          | Source            |
//! |-----------------------|------------------|-------------------|
//! | [`render_config`]     | [`ConfigTargets`]| [`SiteConfig`]    |
//! | [`render_tag_filter`] | [`FilterTargets`]| tag universe      |
//! | [`render_grid`]       | [`GridTargets`]  | visible projects  |
//! | [`ModalController`]   | [`ModalTargets`] | one [`Project`]   |
//!
//! [`SiteConfig`]: crate::model::SiteConfig
//! [`Project`]: crate::model::Project

mod config;
mod grid;
mod modal;
mod targets;

pub use config::render_config;
pub use grid::{render_grid, render_tag_filter};
pub use modal::{ModalController, ModalState};
pub use targets::{ConfigTargets, FilterTargets, GridTargets, ModalTargets, Targets};

use crate::dom::{Document, NodeId};
use thiserror::Error;

/// Marker attribute: clicks inside the element fire the click cue.
pub const CLICK_CUE_ATTR: &str = "data-click-sfx";

/// Index of the project a card renders, into the full project list.
pub const PROJECT_INDEX_ATTR: &str = "data-project";

/// Marker attribute of the modal's close controls.
pub const CLOSE_MODAL_ATTR: &str = "data-close-modal";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("page skeleton has no element with id `{0}`")]
    MissingTarget(&'static str),
}

/// `<a href target=_blank rel=noopener data-click-sfx>label</a>`
fn external_link(doc: &mut Document, href: &str, label: &str, class: Option<&str>) -> NodeId {
    let link = doc.el_text(
        "a",
        &[
            ("href", href),
            ("target", "_blank"),
            ("rel", "noopener"),
            (CLICK_CUE_ATTR, ""),
        ],
        label,
    );
    if let Some(class) = class {
        doc.set_attr(link, "class", class);
    }
    link
}

/// `<tag class=class>text</tag>` appended to `parent` when `text` is not empty.
fn append_text_if(doc: &mut Document, parent: NodeId, tag: &str, class: &str, text: &str) {
    if !text.is_empty() {
        let node = doc.el_text(tag, &[("class", class)], text);
        doc.append(parent, node);
    }
}

/// One `<li>` per item.
fn list_items<'s>(doc: &mut Document, list: NodeId, items: impl IntoIterator<Item = &'s str>) {
    for item in items {
        let li = doc.el_text("li", &[], item);
        doc.append(list, li);
    }
}

/// `url('<image>')`
fn css_url(image: &str) -> String {
    format!("url('{image}')")
}
