//! Built-in tag conversions
//!
//! Each conversion is a small pure function from (context, argument,
//! accumulated content) to one or more result nodes, grouped here by
//! category:
//!
//! - [simple] - styled wrappers (bold, quote, lists, color, ...)
//! - [references] - interactive reference tags (user, session, channel, url)
//! - [media] - image and icon tags (img, icon, eicon)
//! - [passthrough] - trust-boundary tags (noparse, html)

pub mod media;
pub mod passthrough;
pub mod references;
pub mod simple;

use crate::node::{ContentNode, Element, NodeList};

/// Wraps the accumulated children in a styled container, preserving the
/// raw open/close text so plain-text copy reproduces the original markup.
pub(crate) fn styled(name: &str, content: crate::tag::TagContent) -> NodeList {
    vec![ContentNode::Element(
        Element::new(name)
            .with_copy(&content.raw_open, &content.raw_close)
            .with_children(content.nodes),
    )]
}

/// Concatenated plain text of a node list, descending into elements.
pub(crate) fn plain_text_of(nodes: &[ContentNode]) -> String {
    let mut out = String::new();
    let mut stack: Vec<&ContentNode> = nodes.iter().rev().collect();
    while let Some(node) = stack.pop() {
        match node {
            ContentNode::Text(text) => out.push_str(text),
            ContentNode::Element(element) => stack.extend(element.children.iter().rev()),
            ContentNode::LineBreak | ContentNode::HorizontalRule => {}
        }
    }
    out
}

/// Whether the address is a plain web URL the link tags accept.
pub(crate) fn is_web_url(address: &str) -> bool {
    address.starts_with("http://") || address.starts_with("https://")
}

/// Host portion of a web URL, for the add-url-domains affordance.
pub(crate) fn domain_of(address: &str) -> &str {
    let rest = address
        .strip_prefix("https://")
        .or_else(|| address.strip_prefix("http://"))
        .unwrap_or(address);
    rest.split(['/', '?', '#']).next().unwrap_or(rest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::ContentNode;

    #[test]
    fn test_plain_text_recurses_into_elements() {
        let nodes = vec![
            ContentNode::text("a"),
            ContentNode::Element(Element::new("bold").with_children(vec![ContentNode::text("b")])),
            ContentNode::LineBreak,
            ContentNode::text("c"),
        ];
        assert_eq!(plain_text_of(&nodes), "abc");
    }

    #[test]
    fn test_domain_extraction() {
        assert_eq!(domain_of("https://example.com/path?q=1"), "example.com");
        assert_eq!(domain_of("http://example.com"), "example.com");
    }

    #[test]
    fn test_web_url_check() {
        assert!(is_web_url("https://example.com"));
        assert!(is_web_url("http://example.com"));
        assert!(!is_web_url("ftp://example.com"));
        assert!(!is_web_url("javascript:alert(1)"));
    }
}
