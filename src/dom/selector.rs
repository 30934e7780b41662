//! Compound selectors: `tag`, `#id`, `.class`, `[attr]`, and combinations
//! such as `article.card` or `a[data-click-sfx]`. No combinators.

use super::Element;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<String>,
}

impl Selector {
    pub fn parse(input: &str) -> Self {
        let mut selector = Self::default();
        let mut rest = input.trim();

        let tag_len = rest.find(['#', '.', '[']).unwrap_or(rest.len());
        if tag_len > 0 && &rest[..tag_len] != "*" {
            selector.tag = Some(rest[..tag_len].to_ascii_lowercase());
        }
        rest = &rest[tag_len..];

        while let Some(marker) = rest.chars().next() {
            rest = &rest[marker.len_utf8()..];
            if marker == '[' {
                let end = rest.find(']').unwrap_or(rest.len());
                selector.attrs.push(rest[..end].trim().to_owned());
                rest = rest.get(end + 1..).unwrap_or("");
                continue;
            }
            let end = rest.find(['#', '.', '[']).unwrap_or(rest.len());
            let name = rest[..end].to_owned();
            match marker {
                '#' => selector.id = Some(name),
                '.' => selector.classes.push(name),
                _ => {}
            }
            rest = &rest[end..];
        }

        selector
    }

    pub fn matches(&self, element: &Element) -> bool {
        self.tag.as_deref().is_none_or(|tag| element.tag == tag)
            && self
                .id
                .as_deref()
                .is_none_or(|id| element.attr("id") == Some(id))
            && self.classes.iter().all(|class| element.has_class(class))
            && self.attrs.iter().all(|attr| element.attr(attr).is_some())
    }
}
