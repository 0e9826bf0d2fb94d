//! Content node tree produced by the parser
//!
//! The tree is deliberately neutral: a tagged union of text, line breaks,
//! horizontal rules, and generic named elements. Tag conversions, the
//! post-processing passes, and the copy reconstruction utility all operate
//! over this representation; a thin adapter converts it to whichever UI
//! layer renders it. Elements carry the copy metadata (prefix, suffix,
//! inline override) needed to rebuild source-equivalent text for clipboard
//! use without re-running the parser.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sequence of content nodes produced by a frame or a conversion.
pub type NodeList = Vec<ContentNode>;

/// One node of the rendered content tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ContentNode {
    /// Plain text segment with no embedded newlines.
    Text(String),
    /// A newline in the source text.
    LineBreak,
    /// A horizontal rule produced by the `[hr]` splitting pass.
    HorizontalRule,
    /// A named element produced by a tag conversion.
    Element(Element),
}

/// A named element with attributes, children, and copy metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Semantic element name, e.g. `bold` or `url`.
    pub name: String,
    /// Ordered key/value attributes contributed by the conversion.
    pub attributes: Vec<(String, String)>,
    pub children: NodeList,
    /// Text emitted before the children during copy reconstruction.
    pub copy_prefix: String,
    /// Text emitted after the children during copy reconstruction.
    pub copy_suffix: String,
    /// When present, replaces prefix + children + suffix entirely on copy.
    pub inline_copy: Option<String>,
    /// Excludes this element and its whole subtree from auto-URL-ization.
    pub no_autolink: bool,
    /// Semantic click routing data for reference elements.
    pub action: Option<ClickAction>,
}

/// Click routing data attached to reference elements.
///
/// The parser never invokes the sink itself; the render adapter routes a
/// concrete click event through the sink using this data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClickAction {
    /// A character reference (`[user]`, `[icon]`).
    User { name: String },
    /// A channel or private session reference (`[channel]`, `[session]`).
    Session { id: String, title: String },
    /// An external link (`[url]`).
    WebPage { url: String },
}

impl Element {
    /// Creates an empty element with the given semantic name.
    pub fn new(name: &str) -> Self {
        Element {
            name: name.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
            copy_prefix: String::new(),
            copy_suffix: String::new(),
            inline_copy: None,
            no_autolink: false,
            action: None,
        }
    }

    pub fn with_children(mut self, children: NodeList) -> Self {
        self.children = children;
        self
    }

    /// Records the raw open/close markup for copy reconstruction.
    pub fn with_copy(mut self, prefix: &str, suffix: &str) -> Self {
        self.copy_prefix = prefix.to_string();
        self.copy_suffix = suffix.to_string();
        self
    }

    /// Overrides copy reconstruction with a literal string.
    pub fn with_inline_copy(mut self, copy: &str) -> Self {
        self.inline_copy = Some(copy.to_string());
        self
    }

    pub fn with_attribute(mut self, key: &str, value: &str) -> Self {
        self.attributes.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_action(mut self, action: ClickAction) -> Self {
        self.action = Some(action);
        self
    }

    /// Marks this element's subtree as excluded from auto-URL-ization.
    pub fn excluded_from_autolink(mut self) -> Self {
        self.no_autolink = true;
        self
    }

    /// Returns the value of the first attribute with the given key.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

// The derived destructor would recurse over nesting depth, so a deeply
// nested tree could blow the call stack just by being dropped. Flattening
// the children into a worklist first means every element is destroyed with
// an already-empty child list.
impl Drop for Element {
    fn drop(&mut self) {
        let mut worklist = std::mem::take(&mut self.children);
        while let Some(node) = worklist.pop() {
            if let ContentNode::Element(mut element) = node {
                worklist.append(&mut element.children);
            }
        }
    }
}

impl ContentNode {
    /// Creates a plain text node.
    pub fn text(text: &str) -> Self {
        ContentNode::Text(text.to_string())
    }

    /// Returns the text content when this node is plain text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentNode::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the element when this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            ContentNode::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, ContentNode::Text(_))
    }
}

/// Converts paragraph text into text nodes and line-break nodes, splitting
/// on newlines. Empty segments produce no text node, so a trailing newline
/// yields a final line break with nothing after it.
pub fn text_nodes(text: &str) -> NodeList {
    let mut nodes = NodeList::new();
    push_text_nodes(&mut nodes, text);
    nodes
}

pub(crate) fn push_text_nodes(nodes: &mut NodeList, text: &str) {
    if text.is_empty() {
        return;
    }
    let mut first = true;
    for segment in text.split('\n') {
        if !first {
            nodes.push(ContentNode::LineBreak);
        }
        if !segment.is_empty() {
            nodes.push(ContentNode::Text(segment.to_string()));
        }
        first = false;
    }
}

impl fmt::Display for ContentNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentNode::Text(text) => write!(f, "<text:{}>", text),
            ContentNode::LineBreak => write!(f, "<br>"),
            ContentNode::HorizontalRule => write!(f, "<hr>"),
            ContentNode::Element(element) => {
                write!(f, "<element:{}", element.name)?;
                for (key, value) in &element.attributes {
                    write!(f, " {}={}", key, value)?;
                }
                write!(f, ">")
            }
        }
    }
}
