//! In-memory HTML document.
//!
//! An arena of nodes addressed by [`NodeId`] handles. Renderers receive the
//! handles they write into instead of looking elements up on their own, and
//! the finished tree serializes back to HTML.
//!
//! ```text
//!  Document (root)
//!   ├── Doctype "html"
//!   └── <html>
//!        ├── <head> ...
//!        └── <body>
//!             ├── <span id="brandName">   ◄── NodeId held by ConfigTargets
//!             └── <div id="projectsGrid"> ◄── NodeId held by GridTargets
//! ```
//!
//! Detached nodes stay in the arena; they are unreachable from the root and
//! never serialized.

mod parse;
mod selector;
mod serialize;

pub use parse::parse_html;
pub use selector::Selector;
pub use serialize::{outer_html, to_html};

use compact_str::CompactString;
use smallvec::SmallVec;
use thiserror::Error;

/// Errors raised while reading a page skeleton.
#[derive(Debug, Error)]
pub enum DomError {
    #[error("HTML parse error at position {position}")]
    Parse {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },
}

/// Handle to a node of a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Element tag plus attributes in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: CompactString,
    pub attrs: SmallVec<[(CompactString, String); 4]>,
}

impl Element {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_ascii_whitespace().any(|c| c == class))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    Document,
    Doctype(String),
    Element(Element),
    Text(String),
    Comment(String),
}

#[derive(Debug, Clone)]
struct Node {
    data: NodeData,
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 4]>,
}

/// Arena-backed document tree.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document holding only the root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                data: NodeData::Document,
                parent: None,
                children: SmallVec::new(),
            }],
        }
    }

    /// The document node every attached node descends from.
    #[inline]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// First element child of the root (`<html>` for a full page).
    pub fn document_element(&self) -> Option<NodeId> {
        self.children(self.root())
            .iter()
            .copied()
            .find(|&id| self.element(id).is_some())
    }

    // ------------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------------

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        self.nodes.push(Node {
            data,
            parent: None,
            children: SmallVec::new(),
        });
        id
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeData::Element(Element {
            tag: CompactString::from(tag.to_ascii_lowercase()),
            attrs: SmallVec::new(),
        }))
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Text(text.to_owned()))
    }

    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Comment(text.to_owned()))
    }

    pub fn create_doctype(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Doctype(text.to_owned()))
    }

    /// Create an element with attributes in one go.
    pub fn el(&mut self, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let id = self.create_element(tag);
        for (name, value) in attrs {
            self.set_attr(id, name, value);
        }
        id
    }

    /// Create an element with attributes and a single text child.
    pub fn el_text(&mut self, tag: &str, attrs: &[(&str, &str)], text: &str) -> NodeId {
        let id = self.el(tag, attrs);
        let text = self.create_text(text);
        self.append(id, text);
        id
    }

    // ------------------------------------------------------------------------
    // Tree structure
    // ------------------------------------------------------------------------

    /// Append `child` as the last child of `parent`, moving it if attached.
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || self.is_inclusive_ancestor(child, parent) {
            return;
        }
        self.detach(child);
        self.nodes[child.index()].parent = Some(parent);
        self.nodes[parent.index()].children.push(child);
    }

    pub fn append_all(&mut self, parent: NodeId, children: impl IntoIterator<Item = NodeId>) {
        for child in children {
            self.append(parent, child);
        }
    }

    /// Remove `node` from its parent; the subtree stays intact.
    pub fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.index()].parent.take() {
            self.nodes[parent.index()].children.retain(|c| *c != node);
        }
    }

    /// Detach every child of `node`.
    ///
    /// Detached nodes stay in the arena, so repeated re-renders grow it.
    pub fn clear_children(&mut self, node: NodeId) {
        let children = std::mem::take(&mut self.nodes[node.index()].children);
        for child in children {
            self.nodes[child.index()].parent = None;
        }
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.index()].children
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.index()].parent
    }

    pub fn data(&self, node: NodeId) -> &NodeData {
        &self.nodes[node.index()].data
    }

    /// Whether `ancestor` is `node` or one of its ancestors.
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Whether `node` is reachable from the document root.
    pub fn is_attached(&self, node: NodeId) -> bool {
        self.is_inclusive_ancestor(self.root(), node)
    }

    /// `node` and all of its descendants in document order.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    // ------------------------------------------------------------------------
    // Elements and attributes
    // ------------------------------------------------------------------------

    pub fn element(&self, node: NodeId) -> Option<&Element> {
        match &self.nodes[node.index()].data {
            NodeData::Element(element) => Some(element),
            _ => None,
        }
    }

    fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        match &mut self.nodes[node.index()].data {
            NodeData::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|e| e.tag.as_str())
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node).and_then(|e| e.attr(name))
    }

    pub fn has_attr(&self, node: NodeId, name: &str) -> bool {
        self.attr(node, name).is_some()
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        let Some(element) = self.element_mut(node) else {
            return;
        };
        match element.attrs.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => value.clone_into(existing),
            None => element.attrs.push((CompactString::from(name), value.to_owned())),
        }
    }

    pub fn remove_attr(&mut self, node: NodeId, name: &str) {
        if let Some(element) = self.element_mut(node) {
            element.attrs.retain(|(key, _)| key != name);
        }
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node).is_some_and(|e| e.has_class(class))
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if self.has_class(node, class) {
            return;
        }
        let classes = match self.attr(node, "class") {
            Some(existing) if !existing.trim().is_empty() => format!("{} {class}", existing.trim()),
            _ => class.to_owned(),
        };
        self.set_attr(node, "class", &classes);
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        let Some(existing) = self.attr(node, "class") else {
            return;
        };
        let classes = existing
            .split_ascii_whitespace()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attr(node, "class", &classes);
    }

    /// Flip `class` on `node`, returning whether it is now present.
    pub fn toggle_class(&mut self, node: NodeId, class: &str) -> bool {
        if self.has_class(node, class) {
            self.remove_class(node, class);
            false
        } else {
            self.add_class(node, class);
            true
        }
    }

    // ------------------------------------------------------------------------
    // Inline style
    // ------------------------------------------------------------------------

    pub fn style(&self, node: NodeId, property: &str) -> Option<String> {
        parse_style(self.attr(node, "style")?)
            .into_iter()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value)
    }

    /// Set or clear one inline style property; an empty style is removed.
    pub fn set_style(&mut self, node: NodeId, property: &str, value: Option<&str>) {
        let mut decls = self
            .attr(node, "style")
            .map(parse_style)
            .unwrap_or_default();
        decls.retain(|(name, _)| name != property);
        if let Some(value) = value {
            decls.push((property.to_owned(), value.to_owned()));
        }

        if decls.is_empty() {
            self.remove_attr(node, "style");
        } else {
            let style = decls
                .iter()
                .map(|(name, value)| format!("{name}: {value}"))
                .collect::<Vec<_>>()
                .join("; ");
            self.set_attr(node, "style", &style);
        }
    }

    /// Show (clear inline `display`) or hide (`display: none`) a node.
    pub fn set_display(&mut self, node: NodeId, visible: bool) {
        self.set_style(node, "display", (!visible).then_some("none"));
    }

    pub fn is_displayed(&self, node: NodeId) -> bool {
        self.style(node, "display").as_deref() != Some("none")
    }

    // ------------------------------------------------------------------------
    // Text
    // ------------------------------------------------------------------------

    /// Replace all children of `node` with a single text node.
    pub fn set_text(&mut self, node: NodeId, text: &str) {
        self.clear_children(node);
        if !text.is_empty() {
            let text = self.create_text(text);
            self.append(node, text);
        }
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self, node: NodeId) -> String {
        self.descendants(node)
            .into_iter()
            .filter_map(|id| match self.data(id) {
                NodeData::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    pub fn matches(&self, node: NodeId, selector: &Selector) -> bool {
        self.element(node).is_some_and(|e| selector.matches(e))
    }

    /// First attached element with the given `id` attribute.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .find(|&node| self.attr(node, "id") == Some(id))
    }

    /// All attached elements matching `selector`, in document order.
    pub fn query_all(&self, selector: &str) -> Vec<NodeId> {
        let selector = Selector::parse(selector);
        self.descendants(self.root())
            .into_iter()
            .filter(|&node| self.matches(node, &selector))
            .collect()
    }

    pub fn query(&self, selector: &str) -> Option<NodeId> {
        self.query_all(selector).into_iter().next()
    }

    /// Nearest inclusive ancestor of `node` matching `selector`.
    pub fn closest(&self, node: NodeId, selector: &str) -> Option<NodeId> {
        let selector = Selector::parse(selector);
        let mut current = Some(node);
        while let Some(id) = current {
            if self.matches(id, &selector) {
                return Some(id);
            }
            current = self.parent(id);
        }
        None
    }
}

/// Split `a: b; c: d` into `(name, value)` pairs.
fn parse_style(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|decl| {
            let (name, value) = decl.split_once(':')?;
            let name = name.trim();
            (!name.is_empty()).then(|| (name.to_ascii_lowercase(), value.trim().to_owned()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Document, NodeId, NodeId) {
        let mut doc = Document::new();
        let html = doc.create_element("html");
        let body = doc.create_element("body");
        let list = doc.el("ul", &[("id", "skills"), ("class", "pill-list")]);
        doc.append(doc.root(), html);
        doc.append(html, body);
        doc.append(body, list);
        (doc, body, list)
    }

    #[test]
    fn test_get_element_by_id_only_attached() {
        let (mut doc, _, list) = sample();
        assert_eq!(doc.get_element_by_id("skills"), Some(list));

        let orphan = doc.el("div", &[("id", "orphan")]);
        assert_eq!(doc.get_element_by_id("orphan"), None);
        assert!(!doc.is_attached(orphan));
    }

    #[test]
    fn test_clear_children_then_append_replaces() {
        let (mut doc, _, list) = sample();
        for skill in ["Rust", "SQL"] {
            let li = doc.el_text("li", &[], skill);
            doc.append(list, li);
        }
        doc.clear_children(list);
        let li = doc.el_text("li", &[], "Python");
        doc.append(list, li);

        assert_eq!(doc.children(list).len(), 1);
        assert_eq!(doc.text_content(list), "Python");
    }

    #[test]
    fn test_cleared_children_stay_in_arena_detached() {
        let (mut doc, _, list) = sample();
        let li = doc.el_text("li", &[], "Rust");
        doc.append(list, li);
        let before = doc.nodes.len();

        doc.clear_children(list);
        assert_eq!(doc.nodes.len(), before);
        assert_eq!(doc.parent(li), None);
        assert!(!doc.is_attached(li));
        assert_eq!(doc.text_content(li), "Rust");
    }

    #[test]
    fn test_append_moves_node() {
        let (mut doc, body, list) = sample();
        let other = doc.create_element("section");
        doc.append(body, other);
        doc.append(other, list);

        assert_eq!(doc.parent(list), Some(other));
        assert!(!doc.children(body).contains(&list));
    }

    #[test]
    fn test_append_refuses_cycles() {
        let (mut doc, body, list) = sample();
        doc.append(list, body);
        assert_eq!(doc.parent(list), Some(body));
    }

    #[test]
    fn test_set_text_empty_leaves_no_children() {
        let (mut doc, _, list) = sample();
        doc.set_text(list, "");
        assert!(doc.children(list).is_empty());
        assert_eq!(doc.text_content(list), "");
    }

    #[test]
    fn test_class_toggling() {
        let (mut doc, _, list) = sample();
        assert!(doc.toggle_class(list, "open"));
        assert_eq!(doc.attr(list, "class"), Some("pill-list open"));
        assert!(!doc.toggle_class(list, "open"));
        assert_eq!(doc.attr(list, "class"), Some("pill-list"));
        doc.remove_class(list, "missing");
        assert_eq!(doc.attr(list, "class"), Some("pill-list"));
    }

    #[test]
    fn test_display_round_trip_keeps_other_styles() {
        let (mut doc, _, list) = sample();
        doc.set_attr(list, "style", "color: red");
        doc.set_display(list, false);
        assert!(!doc.is_displayed(list));
        assert_eq!(doc.attr(list, "style"), Some("color: red; display: none"));

        doc.set_display(list, true);
        assert!(doc.is_displayed(list));
        assert_eq!(doc.attr(list, "style"), Some("color: red"));
    }

    #[test]
    fn test_display_without_other_styles_removes_attribute() {
        let (mut doc, _, list) = sample();
        doc.set_display(list, false);
        doc.set_display(list, true);
        assert_eq!(doc.attr(list, "style"), None);
    }

    #[test]
    fn test_closest_is_inclusive() {
        let (mut doc, body, list) = sample();
        let a = doc.el("a", &[("href", "#")]);
        let span = doc.el_text("span", &[], "x");
        doc.append(list, a);
        doc.append(a, span);

        assert_eq!(doc.closest(span, "a"), Some(a));
        assert_eq!(doc.closest(a, "a"), Some(a));
        assert_eq!(doc.closest(span, "body"), Some(body));
        assert_eq!(doc.closest(body, "a"), None);
    }

    #[test]
    fn test_set_attr_overwrites() {
        let (mut doc, _, list) = sample();
        doc.set_attr(list, "data-x", "1");
        doc.set_attr(list, "data-x", "2");
        assert_eq!(doc.attr(list, "data-x"), Some("2"));
        doc.remove_attr(list, "data-x");
        assert!(!doc.has_attr(list, "data-x"));
    }

    #[test]
    fn test_document_element() {
        let (doc, _, _) = sample();
        assert_eq!(doc.tag(doc.document_element().unwrap()), Some("html"));
    }
}
