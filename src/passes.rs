//! Post-processing passes over the finished node tree
//!
//! Two passes run after dispatch, each gated by the tag set:
//!
//! - auto-URL-ization replaces bare `http(s)://` runs in plain text with
//!   `[url]` sub-parses through the same parser, so link rendering logic is
//!   reused rather than duplicated. Each sub-parse is a disposable result
//!   tracked by the parent's context. Elements marked as excluded are
//!   skipped together with their whole subtree; the url conversion marks
//!   its own element, which makes the pass idempotent.
//! - `[hr]` splitting turns text nodes containing the literal marker into
//!   alternating text and horizontal-rule nodes.

use crate::context::ParseContext;
use crate::error::ParseError;
use crate::node::{ContentNode, NodeList};
use crate::tag::TagSet;
use crate::tokenizer::HR_MARKER;
use once_cell::sync::Lazy;
use regex::Regex;

static URL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").unwrap());

/// Replaces bare URLs in plain text under `node` with parsed `[url]`
/// sub-trees.
///
/// The walk keeps an explicit stack of pending elements; nesting depth is
/// bounded by memory, not the call stack.
pub fn auto_urlize(
    set: &TagSet,
    node: &mut ContentNode,
    context: &mut ParseContext,
) -> Result<(), ParseError> {
    let ContentNode::Element(root) = node else {
        return Ok(());
    };
    if root.no_autolink {
        return Ok(());
    }

    let mut pending = vec![root];
    while let Some(element) = pending.pop() {
        let children = std::mem::take(&mut element.children);
        let mut rebuilt = NodeList::with_capacity(children.len());
        for child in children {
            match child {
                ContentNode::Text(ref text) if URL_PATTERN.is_match(text) => {
                    rebuilt.extend(replace_urls(set, text, context)?);
                }
                other => {
                    rebuilt.push(other);
                }
            }
        }
        element.children = rebuilt;

        pending.extend(element.children.iter_mut().filter_map(|child| match child {
            ContentNode::Element(child_element) if !child_element.no_autolink => {
                Some(child_element)
            }
            _ => None,
        }));
    }
    Ok(())
}

fn replace_urls(
    set: &TagSet,
    text: &str,
    context: &mut ParseContext,
) -> Result<NodeList, ParseError> {
    let mut nodes = NodeList::new();
    let mut last_end = 0;
    for matched in URL_PATTERN.find_iter(text) {
        if matched.start() > last_end {
            nodes.push(ContentNode::text(&text[last_end..matched.start()]));
        }

        let mut sub_options = context.options.clone();
        sub_options.parse_as_status = false;
        let mut sub_result =
            set.parse(&format!("[url]{}[/url]", matched.as_str()), sub_options)?;
        let mut produced = sub_result.take_root_children();
        // Copying the link yields the literal matched text, not the
        // synthesized markup.
        if let Some(ContentNode::Element(url_element)) = produced
            .iter_mut()
            .find(|node| matches!(node, ContentNode::Element(_)))
        {
            url_element.inline_copy = Some(matched.as_str().to_string());
        }
        nodes.extend(produced);
        context.register_disposable(Box::new(sub_result));

        last_end = matched.end();
    }
    if last_end < text.len() {
        nodes.push(ContentNode::text(&text[last_end..]));
    }
    Ok(nodes)
}

/// Splits text nodes containing the literal `[hr]` marker into alternating
/// text and horizontal-rule nodes. Explicit-stack walk, like `auto_urlize`.
pub fn split_horizontal_rules(node: &mut ContentNode) {
    let ContentNode::Element(root) = node else {
        return;
    };

    let mut pending = vec![root];
    while let Some(element) = pending.pop() {
        let children = std::mem::take(&mut element.children);
        let mut rebuilt = NodeList::with_capacity(children.len());
        for child in children {
            match child {
                ContentNode::Text(ref text) if text.contains(HR_MARKER) => {
                    let mut first = true;
                    for part in text.split(HR_MARKER) {
                        if !first {
                            rebuilt.push(ContentNode::HorizontalRule);
                        }
                        if !part.is_empty() {
                            rebuilt.push(ContentNode::text(part));
                        }
                        first = false;
                    }
                }
                other => {
                    rebuilt.push(other);
                }
            }
        }
        element.children = rebuilt;

        pending.extend(element.children.iter_mut().filter_map(|child| match child {
            ContentNode::Element(child_element) => Some(child_element),
            _ => None,
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Element;

    #[test]
    fn test_hr_split_in_order() {
        let mut root = ContentNode::Element(
            Element::new("container").with_children(vec![ContentNode::text("a[hr]b[hr]c")]),
        );
        split_horizontal_rules(&mut root);
        let children = &root.as_element().unwrap().children;
        assert_eq!(
            children,
            &vec![
                ContentNode::text("a"),
                ContentNode::HorizontalRule,
                ContentNode::text("b"),
                ContentNode::HorizontalRule,
                ContentNode::text("c"),
            ]
        );
    }

    #[test]
    fn test_hr_split_recurses_into_elements() {
        let inner = Element::new("bold").with_children(vec![ContentNode::text("x[hr]y")]);
        let mut root = ContentNode::Element(
            Element::new("container").with_children(vec![ContentNode::Element(inner)]),
        );
        split_horizontal_rules(&mut root);
        let bold = root.as_element().unwrap().children[0].as_element().unwrap();
        assert_eq!(bold.children[1], ContentNode::HorizontalRule);
    }

    #[test]
    fn test_url_pattern_matches_bare_urls_only() {
        assert!(URL_PATTERN.is_match("see https://example.com now"));
        assert!(URL_PATTERN.is_match("http://example.com"));
        assert!(!URL_PATTERN.is_match("example.com"));
        assert!(!URL_PATTERN.is_match("https:// not a url"));
    }
}
