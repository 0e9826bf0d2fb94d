//! Trust-boundary conversions
//!
//! `noparse` displays its body literally: its nesting policy denies every
//! tag beneath it, so nested markup leaks through as text while this
//! conversion wraps whatever arrived. Raw HTML insertion is only registered
//! in the system-message tag set, never for user-originated chat content.

use crate::context::ParseContext;
use crate::error::ParseError;
use crate::node::{ContentNode, Element, NodeList};
use crate::tag::TagContent;

type TagResult = Result<NodeList, ParseError>;

/// `[noparse]...[/noparse]` - defang but don't delete: nested tags render
/// as their raw text, and the subtree is excluded from auto-URL-ization so
/// bare links inside it stay inert too.
pub fn no_parse(
    _context: &mut ParseContext,
    _argument: Option<&str>,
    content: TagContent,
) -> TagResult {
    Ok(vec![ContentNode::Element(
        Element::new("noparse")
            .with_copy(&content.raw_open, &content.raw_close)
            .excluded_from_autolink()
            .with_children(content.nodes),
    )])
}

/// `[html]...[/html]` - raw HTML passthrough for trusted system messages.
/// The element carries the raw body; the renderer decides how to inject it.
pub fn raw_html(
    _context: &mut ParseContext,
    _argument: Option<&str>,
    content: TagContent,
) -> TagResult {
    Ok(vec![ContentNode::Element(
        Element::new("html")
            .with_inline_copy(&content.raw_source())
            .excluded_from_autolink()
            .with_children(vec![ContentNode::Text(content.raw_text)]),
    )])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ParseOptions;

    #[test]
    fn test_html_carries_raw_body() {
        let mut context = ParseContext::new(ParseOptions::default());
        let content = TagContent {
            nodes: vec![ContentNode::text("<b>hi</b>")],
            raw_text: "<b>hi</b>".to_string(),
            raw_open: "[html]".to_string(),
            raw_close: "[/html]".to_string(),
        };
        let nodes = raw_html(&mut context, None, content).unwrap();
        let element = nodes[0].as_element().unwrap();
        assert_eq!(element.name, "html");
        assert_eq!(element.children[0].as_text(), Some("<b>hi</b>"));
    }
}
