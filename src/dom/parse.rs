//! Page skeleton parsing.
//!
//! Reads (X)HTML with `quick-xml` in a forgiving configuration: end-name
//! checks are off, HTML void elements need no self-closing slash, attribute
//! values may be omitted, and `<script>`/`<style>` bodies are kept raw.

use super::{Document, DomError, NodeData, NodeId};
use quick_xml::{
    Reader,
    errors::{Error, IllFormedError},
    events::Event,
};
use std::borrow::Cow;

/// Elements that never have children or an end tag.
pub(super) const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Elements whose body is kept as raw text.
pub(super) const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Create a configured reader from content bytes.
///
/// A reader may start mid-document (after a raw-text body), so end tags
/// without a start it has seen are accepted.
#[inline]
fn create_reader(content: &[u8]) -> Reader<&[u8]> {
    let mut reader = Reader::from_reader(content);
    let config = reader.config_mut();
    config.trim_text(false);
    config.enable_all_checks(false);
    config.allow_unmatched_ends = true;
    config.allow_dangling_amp = true;
    reader
}

/// Parse a page skeleton into a [`Document`].
pub fn parse_html(content: &[u8]) -> Result<Document, DomError> {
    let mut doc = Document::new();
    let mut reader = create_reader(content);
    let mut open: Vec<NodeId> = vec![doc.root()];
    let mut offset = 0usize;

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            // Open elements are tracked here, not by the reader
            Err(Error::IllFormed(IllFormedError::UnmatchedEndTag(_))) => continue,
            Err(source) => {
                return Err(DomError::Parse {
                    position: offset as u64 + reader.error_position(),
                    source,
                });
            }
        };
        let parent = open.last().copied().unwrap_or(doc.root());

        match event {
            Event::Start(elem) => {
                let tag = lossy(elem.name().as_ref()).to_ascii_lowercase();
                let node = doc.create_element(&tag);
                for attr in elem.html_attributes().flatten() {
                    let name = lossy(attr.key.as_ref()).to_ascii_lowercase();
                    doc.set_attr(node, &name, &unescape_lossy(&attr.value));
                }
                doc.append(parent, node);

                if RAW_TEXT_ELEMENTS.contains(&tag.as_str()) {
                    // Scan for the end tag by hand; the body is not markup.
                    // Resume with a fresh reader after it.
                    let start = offset + reader.buffer_position() as usize;
                    let rest = content.get(start..).unwrap_or_default();
                    let (body, consumed) = split_raw_text(rest, &tag);
                    if !body.is_empty() {
                        let text = doc.create_text(&lossy(body));
                        doc.append(node, text);
                    }
                    offset = start + consumed;
                    reader = create_reader(content.get(offset..).unwrap_or_default());
                } else if !VOID_ELEMENTS.contains(&tag.as_str()) {
                    open.push(node);
                }
            }
            Event::Empty(elem) => {
                let tag = lossy(elem.name().as_ref()).to_ascii_lowercase();
                let node = doc.create_element(&tag);
                for attr in elem.html_attributes().flatten() {
                    let name = lossy(attr.key.as_ref()).to_ascii_lowercase();
                    doc.set_attr(node, &name, &unescape_lossy(&attr.value));
                }
                doc.append(parent, node);
            }
            Event::End(elem) => {
                let tag = lossy(elem.name().as_ref()).to_ascii_lowercase();
                // Close the nearest open element with this name; stray end tags are dropped
                if let Some(pos) = open
                    .iter()
                    .rposition(|&id| id != doc.root() && doc.tag(id) == Some(tag.as_str()))
                {
                    open.truncate(pos);
                }
            }
            Event::Text(text) => push_text(&mut doc, parent, &unescape_lossy(&text)),
            Event::CData(text) => push_text(&mut doc, parent, &lossy(&text)),
            Event::GeneralRef(reference) => {
                push_text(&mut doc, parent, &resolve_reference(&lossy(&reference)));
            }
            Event::Comment(text) => {
                let comment = doc.create_comment(&lossy(&text));
                doc.append(parent, comment);
            }
            Event::DocType(text) => {
                let doctype = doc.create_doctype(lossy(&text).trim());
                doc.append(parent, doctype);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(doc)
}

/// Split raw element text at its closing tag.
///
/// Returns the body and the number of bytes up to and including the end
/// tag's `>`. An unclosed element takes the rest of the input.
fn split_raw_text<'a>(rest: &'a [u8], tag: &str) -> (&'a [u8], usize) {
    let close = format!("</{tag}");
    let end = rest
        .windows(close.len())
        .position(|window| window.eq_ignore_ascii_case(close.as_bytes()))
        .unwrap_or(rest.len());
    let consumed = rest[end..]
        .iter()
        .position(|&b| b == b'>')
        .map_or(rest.len(), |gt| end + gt + 1);
    (&rest[..end], consumed)
}

/// Append text, merging with a preceding text node.
fn push_text(doc: &mut Document, parent: NodeId, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(&last) = doc.children(parent).last()
        && let NodeData::Text(existing) = &mut doc.nodes[last.index()].data
    {
        existing.push_str(text);
        return;
    }
    let node = doc.create_text(text);
    doc.append(parent, node);
}

fn lossy(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

/// Unescape XML entities; text with unknown entities is kept verbatim.
fn unescape_lossy(bytes: &[u8]) -> String {
    let raw = lossy(bytes);
    match quick_xml::escape::unescape(&raw) {
        Ok(text) => text.into_owned(),
        Err(_) => raw.into_owned(),
    }
}

/// Resolve `name` of an `&name;` reference.
fn resolve_reference(name: &str) -> String {
    if let Some(code) = name.strip_prefix('#') {
        let value = match code.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => code.parse().ok(),
        };
        if let Some(ch) = value.and_then(char::from_u32) {
            return ch.to_string();
        }
    }

    let resolved = match name {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => "\u{a0}",
        "copy" => "\u{a9}",
        "middot" => "\u{b7}",
        "ndash" => "\u{2013}",
        "mdash" => "\u{2014}",
        "rsquo" => "\u{2019}",
        "hellip" => "\u{2026}",
        _ => return format!("&{name};"),
    };
    resolved.to_owned()
}
