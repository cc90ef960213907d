//! SVG output sink.
//!
//! Replay does not build output markup directly: coordinate-scoped groups
//! are created lazily, `<defs>` entries appear mid-stream, and the EMF
//! renderer rescales elements after replay has finished. The sink therefore
//! keeps an arena of pending elements that the renderer patches freely and
//! only materializes into `svg` crate nodes at serialization time.

use std::fmt::Write as _;

use svg::node::element::Element;
use svg::Node;

pub type NodeId = usize;

#[derive(Debug)]
struct SvgNode {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<NodeId>,
    text: Option<String>,
}

/// An ordered attribute map, filled incrementally by style application.
#[derive(Debug, Clone, Default)]
pub struct AttrList {
    attrs: Vec<(String, String)>,
}

impl AttrList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute, replacing any earlier value of the same name.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(entry) = self.attrs.iter_mut().find(|(n, _)| n == name) {
            entry.1 = value;
        } else {
            self.attrs.push((name.to_string(), value));
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

/// Incremental `d` attribute builder for path brackets.
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    path: String,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, x: i32, y: i32) {
        let _ = write!(self.path, " M {} {}", x, y);
    }

    pub fn line(&mut self, points: &[(i32, i32)]) {
        for (x, y) in points {
            let _ = write!(self.path, " L {} {}", x, y);
        }
    }

    pub fn curve_c(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, x: i32, y: i32) {
        let _ = write!(self.path, " C {} {} {} {} {} {}", x1, y1, x2, y2, x, y);
    }

    pub fn close(&mut self) {
        self.path.push_str(" Z");
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// The accumulated path data without the leading separator.
    pub fn path(&self) -> &str {
        self.path.strip_prefix(' ').unwrap_or(&self.path)
    }
}

/// The element arena behind one rendered document.
#[derive(Debug)]
pub struct SvgSink {
    nodes: Vec<SvgNode>,
    defs: Option<NodeId>,
    next_id: u32,
}

impl SvgSink {
    pub const ROOT: NodeId = 0;

    pub fn new() -> Self {
        Self {
            nodes: vec![SvgNode {
                tag: "svg".to_string(),
                attrs: Vec::new(),
                children: Vec::new(),
                text: None,
            }],
            defs: None,
            next_id: 0,
        }
    }

    /// Appends a new element under `parent` and returns its id.
    pub fn element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(SvgNode {
            tag: tag.to_string(),
            attrs: Vec::new(),
            children: Vec::new(),
            text: None,
        });
        self.nodes[parent].children.push(id);
        id
    }

    pub fn set(&mut self, node: NodeId, name: &str, value: impl Into<String>) {
        let value = value.into();
        let attrs = &mut self.nodes[node].attrs;
        if let Some(entry) = attrs.iter_mut().find(|(n, _)| n == name) {
            entry.1 = value;
        } else {
            attrs.push((name.to_string(), value));
        }
    }

    pub fn get(&self, node: NodeId, name: &str) -> Option<&str> {
        self.nodes[node]
            .attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn apply(&mut self, node: NodeId, attrs: &AttrList) {
        for (name, value) in attrs.iter() {
            self.set(node, name, value);
        }
    }

    /// Sets the element's text content, escaped for XML.
    pub fn set_text(&mut self, node: NodeId, text: &str) {
        let escaped = text
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;");
        self.nodes[node].text = Some(escaped);
    }

    pub fn tag(&self, node: NodeId) -> &str {
        &self.nodes[node].tag
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node].children
    }

    /// The `<defs>` element, created under the root on first use.
    pub fn defs(&mut self) -> NodeId {
        if let Some(defs) = self.defs {
            return defs;
        }
        let defs = self.element(Self::ROOT, "defs");
        self.defs = Some(defs);
        defs
    }

    /// Returns a document-unique id with the given prefix.
    pub fn make_id(&mut self, prefix: &str) -> String {
        let id = format!("{}{}", prefix, self.next_id);
        self.next_id += 1;
        id
    }

    /// First direct child of `node` with the given tag.
    pub fn first_child_with_tag(&self, node: NodeId, tag: &str) -> Option<NodeId> {
        self.nodes[node]
            .children
            .iter()
            .copied()
            .find(|&c| self.nodes[c].tag == tag)
    }

    /// All elements with the given tag, in document order.
    pub fn elements_with_tag(&self, tag: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        self.collect_tag(Self::ROOT, tag, &mut found);
        found
    }

    fn collect_tag(&self, node: NodeId, tag: &str, found: &mut Vec<NodeId>) {
        for &child in &self.nodes[node].children {
            if self.nodes[child].tag == tag {
                found.push(child);
            }
            self.collect_tag(child, tag, found);
        }
    }

    fn build(&self, id: NodeId) -> Element {
        let node = &self.nodes[id];
        let mut element = Element::new(node.tag.clone());
        for (name, value) in &node.attrs {
            element.assign(name.clone(), value.clone());
        }
        if let Some(text) = &node.text {
            element.append(svg::node::Text::new(text.clone()));
        }
        for &child in &node.children {
            element.append(self.build(child));
        }
        element
    }

    /// Serializes the root's children, i.e. the document with the outer
    /// `<svg>` wrapper tags stripped.
    pub fn to_inner_markup(&self) -> String {
        self.nodes[Self::ROOT]
            .children
            .iter()
            .map(|&child| self.build(child).to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for SvgSink {
    fn default() -> Self {
        Self::new()
    }
}

/// Formats a scaled coordinate without float noise: two decimals, trailing
/// zeros trimmed.
pub(crate) fn fmt_scaled(value: f64) -> String {
    let s = format!("{:.2}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() || s == "-" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Multiplies every numeric token of a path's `d` attribute by `scale`,
/// formatting with two decimals. Command letters pass through untouched.
pub fn resize_path(d: &str, scale: f64) -> String {
    d.split_whitespace()
        .map(|token| {
            if token.chars().all(|c| c.is_ascii_alphabetic()) {
                token.to_string()
            } else {
                match token.parse::<f64>() {
                    Ok(v) => format!("{:.2}", v * scale),
                    Err(_) => token.to_string(),
                }
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Multiplies every component of a viewBox string by `scale`.
pub fn resize_view_box(view_box: &str, scale: f64) -> String {
    view_box
        .split_whitespace()
        .map(|token| match token.parse::<f64>() {
            Ok(v) => fmt_scaled(v * scale),
            Err(_) => token.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
