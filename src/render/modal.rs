//! Project detail modal.
//!
//! ```text
//!            open(p)            open(q): content replaced
//!  Closed ───────────► Open ◄──────────┐
//!    ▲                  │ └────────────┘
//!    └──────────────────┘
//!       close()  (close control, Escape anywhere)
//! ```
//!
//! Visibility is carried by `aria-hidden` on the modal element.

use super::{ModalTargets, css_url, grid};
use crate::{
    dom::{Document, NodeId},
    model::Project,
    notify::Notifier,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Open,
}

#[derive(Debug, Clone, Copy)]
pub struct ModalController {
    targets: ModalTargets,
    state: ModalState,
}

impl ModalController {
    /// Bind to the modal and put it in the closed state.
    pub fn new(doc: &mut Document, targets: ModalTargets) -> Self {
        doc.set_attr(targets.modal, "aria-hidden", "true");
        Self {
            targets,
            state: ModalState::Closed,
        }
    }

    pub const fn state(&self) -> ModalState {
        self.state
    }

    /// Show `project`, replacing whatever the modal showed before.
    pub fn open(&mut self, doc: &mut Document, project: &Project, notifier: &dyn Notifier) {
        let body = self.targets.body;
        doc.clear_children(body);
        let content = detail(doc, project);
        doc.append_all(body, content);

        doc.set_attr(self.targets.modal, "aria-hidden", "false");
        self.state = ModalState::Open;
        notifier.open();
    }

    /// Hide the modal. Closing a closed modal still fires the cue.
    pub fn close(&mut self, doc: &mut Document, notifier: &dyn Notifier) {
        doc.set_attr(self.targets.modal, "aria-hidden", "true");
        self.state = ModalState::Closed;
        notifier.close();
    }
}

/// Header, media, description, tech chips, action links.
fn detail(doc: &mut Document, project: &Project) -> [NodeId; 5] {
    let header = doc.el("div", &[("class", "modal-header")]);
    let title = doc.el_text(
        "h3",
        &[("id", "modalTitle"), ("class", "modal-title")],
        &project.title,
    );
    doc.append(header, title);

    let media = doc.el("div", &[("class", "modal-media")]);
    if !project.image.is_empty() {
        let background = format!("center/cover no-repeat {}", css_url(&project.image));
        doc.set_style(media, "background", Some(background.as_str()));
    }

    let desc = doc.el_text("p", &[], &project.description);

    let chips = grid::chip_row(doc, &project.tech);
    doc.set_style(chips, "margin", Some("10px 0 6px"));

    let actions = grid::action_links(doc, project);
    [header, media, desc, chips, actions]
}
