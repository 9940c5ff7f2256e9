//! Lenient markup tree.
//!
//! Rendered invoices are HTML, not XML: void elements are never closed, named
//! entities such as `&pound;` appear, and end tags may be missing or stray.
//! The tree is built from the quick-xml event stream with those cases
//! tolerated, and stored as a flat pre-order arena so a node's descendants are
//! a contiguous slice.

use quick_xml::Reader;
use quick_xml::escape::resolve_html5_entity;
use quick_xml::events::{BytesStart, BytesText, Event};
use std::borrow::Cow;

use crate::core::InvoiceError;

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

#[derive(Debug)]
enum NodeKind {
    Root,
    Element { name: String, classes: Vec<String> },
    Text(String),
}

#[derive(Debug)]
struct Node {
    kind: NodeKind,
    /// One past the last descendant's index.
    end: usize,
}

/// Parsed markup document.
#[derive(Debug)]
pub struct Markup {
    nodes: Vec<Node>,
}

impl Markup {
    /// Parse markup text.
    ///
    /// Fails only when the text cannot be tokenized or holds no element at all.
    pub fn parse(text: &str) -> Result<Self, InvoiceError> {
        let text = strip_raw_text_elements(text);
        let mut reader = Reader::from_str(&text);
        let config = reader.config_mut();
        config.check_end_names = false;
        config.allow_unmatched_ends = true;

        let mut nodes = vec![Node {
            kind: NodeKind::Root,
            end: 1,
        }];
        // Indices of open elements; the root stays at the bottom.
        let mut open: Vec<usize> = vec![0];
        let mut element_count = 0usize;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    let (name, classes) = element_parts(e);
                    let is_void = VOID_ELEMENTS.contains(&name.as_str());
                    nodes.push(Node {
                        kind: NodeKind::Element { name, classes },
                        end: nodes.len() + 1,
                    });
                    element_count += 1;
                    if !is_void {
                        open.push(nodes.len() - 1);
                    }
                }
                Ok(Event::Empty(ref e)) => {
                    let (name, classes) = element_parts(e);
                    nodes.push(Node {
                        kind: NodeKind::Element { name, classes },
                        end: nodes.len() + 1,
                    });
                    element_count += 1;
                }
                Ok(Event::End(ref e)) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).to_ascii_lowercase();
                    let matching = open
                        .iter()
                        .rposition(|&idx| idx != 0 && element_name(&nodes[idx]) == Some(&name));
                    if let Some(pos) = matching {
                        let len = nodes.len();
                        for idx in open.drain(pos..) {
                            nodes[idx].end = len;
                        }
                    }
                }
                Ok(Event::Text(ref t)) => push_text(&mut nodes, decode_text(t)),
                Ok(Event::CData(ref c)) => {
                    push_text(&mut nodes, String::from_utf8_lossy(c).into_owned())
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(InvoiceError::MalformedDocument(format!(
                        "markup parse error at byte {}: {e}",
                        reader.buffer_position()
                    )));
                }
                _ => {}
            }
        }

        let len = nodes.len();
        for idx in open {
            nodes[idx].end = len;
        }

        if element_count == 0 {
            return Err(InvoiceError::MalformedDocument(
                "no markup elements found".into(),
            ));
        }

        Ok(Self { nodes })
    }

    /// The document root. It has no name and no classes.
    pub fn root(&self) -> Element<'_> {
        Element { doc: self, idx: 0 }
    }
}

fn element_name(node: &Node) -> Option<&String> {
    match &node.kind {
        NodeKind::Element { name, .. } => Some(name),
        _ => None,
    }
}

fn element_parts(e: &BytesStart<'_>) -> (String, Vec<String>) {
    let name = String::from_utf8_lossy(e.name().as_ref()).to_ascii_lowercase();
    let classes = e
        .html_attributes()
        .flatten()
        .find(|a| a.key.as_ref().eq_ignore_ascii_case(b"class"))
        .map(|a| {
            String::from_utf8_lossy(&a.value)
                .split_whitespace()
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();
    (name, classes)
}

fn decode_text(t: &BytesText<'_>) -> String {
    match t.unescape_with(resolve_html5_entity) {
        Ok(text) => text.into_owned(),
        // Bare ampersands and unknown entities: keep the raw text.
        Err(_) => String::from_utf8_lossy(t).into_owned(),
    }
}

fn push_text(nodes: &mut Vec<Node>, text: String) {
    if text.trim().is_empty() {
        return;
    }
    nodes.push(Node {
        kind: NodeKind::Text(text),
        end: nodes.len() + 1,
    });
}

/// Remove `<script>` and `<style>` elements, whose bodies are not markup.
fn strip_raw_text_elements(text: &str) -> Cow<'_, str> {
    let lower = text.to_ascii_lowercase();
    let mut out: Option<String> = None;
    let mut copied_to = 0;
    let mut search_from = 0;

    while let Some((start, tag)) = next_raw_text_open(&lower, search_from) {
        let closing = format!("</{tag}");
        let end = match lower[start..].find(&closing) {
            Some(rel) => {
                let close_start = start + rel;
                lower[close_start..]
                    .find('>')
                    .map_or(lower.len(), |gt| close_start + gt + 1)
            }
            None => lower.len(),
        };
        let buf = out.get_or_insert_with(|| String::with_capacity(text.len()));
        buf.push_str(&text[copied_to..start]);
        copied_to = end;
        search_from = end;
    }

    match out {
        Some(mut buf) => {
            buf.push_str(&text[copied_to..]);
            Cow::Owned(buf)
        }
        None => Cow::Borrowed(text),
    }
}

fn next_raw_text_open(lower: &str, from: usize) -> Option<(usize, &'static str)> {
    RAW_TEXT_ELEMENTS
        .iter()
        .filter_map(|tag| {
            let needle = format!("<{tag}");
            let mut at = from;
            while let Some(rel) = lower[at..].find(&needle) {
                let pos = at + rel;
                let after = lower.as_bytes().get(pos + needle.len()).copied();
                if matches!(after, None | Some(b'>' | b'/' | b' ' | b'\t' | b'\n' | b'\r')) {
                    return Some((pos, *tag));
                }
                at = pos + needle.len();
            }
            None
        })
        .min_by_key(|(pos, _)| *pos)
}

/// Borrowed handle to one node of a [`Markup`] tree.
#[derive(Debug, Clone, Copy)]
pub struct Element<'a> {
    doc: &'a Markup,
    idx: usize,
}

impl PartialEq for Element<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.idx == other.idx
    }
}

impl<'a> Element<'a> {
    fn node(&self) -> &'a Node {
        &self.doc.nodes[self.idx]
    }

    /// Lowercase tag name; empty for the root.
    pub fn name(&self) -> &'a str {
        match &self.node().kind {
            NodeKind::Element { name, .. } => name,
            _ => "",
        }
    }

    pub fn classes(&self) -> &'a [String] {
        match &self.node().kind {
            NodeKind::Element { classes, .. } => classes,
            _ => &[],
        }
    }

    /// Whether `class` is one of the element's class tokens.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes().iter().any(|c| c == class)
    }

    /// Descendant elements in document order.
    pub fn descendants(&self) -> impl Iterator<Item = Element<'a>> + use<'a> {
        let doc = self.doc;
        (self.idx + 1..self.node().end)
            .filter(move |&idx| matches!(doc.nodes[idx].kind, NodeKind::Element { .. }))
            .map(move |idx| Element { doc, idx })
    }

    /// Descendant `<name>` elements, optionally restricted to those carrying
    /// `class`, in document order.
    pub fn find_all<'q>(
        &self,
        name: &'q str,
        class: Option<&'q str>,
    ) -> impl Iterator<Item = Element<'a>> + use<'a, 'q> {
        self.descendants()
            .filter(move |el| el.name() == name && class.is_none_or(|c| el.has_class(c)))
    }

    /// First descendant matching [`Element::find_all`].
    pub fn find(&self, name: &str, class: Option<&str>) -> Option<Element<'a>> {
        self.find_all(name, class).next()
    }

    /// Text content: every descendant text run trimmed, empty runs dropped,
    /// the rest concatenated.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for node in &self.doc.nodes[self.idx + 1..self.node().end] {
            if let NodeKind::Text(t) = &node.kind {
                out.push_str(t.trim());
            }
        }
        out
    }
}
