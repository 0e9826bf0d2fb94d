//! Interactive reference conversions
//!
//! Reference tags attach serializable click-action data to their elements;
//! the render adapter routes actual click events through the caller's sink.
//! All of them override copy reconstruction with the exact source span so
//! clipboard copies reproduce the original markup.

use super::{domain_of, is_web_url, plain_text_of};
use crate::context::ParseContext;
use crate::error::ParseError;
use crate::node::{push_text_nodes, ClickAction, ContentNode, Element, NodeList};
use crate::tag::TagContent;

type TagResult = Result<NodeList, ParseError>;

/// `[user]name[/user]` - a character reference.
pub fn user(_context: &mut ParseContext, _argument: Option<&str>, content: TagContent) -> TagResult {
    let name = plain_text_of(&content.nodes);
    Ok(vec![ContentNode::Element(
        Element::new("user")
            .with_inline_copy(&content.raw_source())
            .with_action(ClickAction::User { name: name.clone() })
            .with_children(vec![ContentNode::Text(name)]),
    )])
}

/// `[session=Title]id[/session]` - a private session invite. The body is
/// the session id; the argument, when present, is the display title.
pub fn session(
    _context: &mut ParseContext,
    argument: Option<&str>,
    content: TagContent,
) -> TagResult {
    let id = plain_text_of(&content.nodes);
    let title = argument.unwrap_or(&id).to_string();
    Ok(vec![ContentNode::Element(
        Element::new("session")
            .with_attribute("session-id", &id)
            .with_inline_copy(&content.raw_source())
            .with_action(ClickAction::Session {
                id,
                title: title.clone(),
            })
            .with_children(vec![ContentNode::Text(title)]),
    )])
}

/// `[channel]name[/channel]` - a public channel reference. Routed through
/// the session callback like private sessions.
pub fn channel(
    _context: &mut ParseContext,
    _argument: Option<&str>,
    content: TagContent,
) -> TagResult {
    let name = plain_text_of(&content.nodes);
    Ok(vec![ContentNode::Element(
        Element::new("channel")
            .with_inline_copy(&content.raw_source())
            .with_action(ClickAction::Session {
                id: name.clone(),
                title: name.clone(),
            })
            .with_children(vec![ContentNode::Text(name)]),
    )])
}

/// `[url=address]label[/url]` or `[url]address[/url]`.
///
/// Only `http(s)` addresses become links; anything else degrades to the
/// literal source text. The produced element is excluded from
/// auto-URL-ization, which is what makes that pass idempotent.
pub fn url(context: &mut ParseContext, argument: Option<&str>, content: TagContent) -> TagResult {
    let body = plain_text_of(&content.nodes);
    let (address, label) = match argument {
        Some(address) => {
            let label = if body.is_empty() {
                address.to_string()
            } else {
                body
            };
            (address.to_string(), label)
        }
        None => (body.clone(), body),
    };

    if !is_web_url(&address) {
        let mut nodes = NodeList::new();
        push_text_nodes(&mut nodes, &content.raw_source());
        return Ok(nodes);
    }

    let mut element = Element::new("url")
        .with_attribute("href", &address)
        .with_inline_copy(&content.raw_source())
        .with_action(ClickAction::WebPage {
            url: address.clone(),
        })
        .excluded_from_autolink()
        .with_children(vec![ContentNode::Text(label)]);
    if context.options.add_url_domains {
        element = element.with_attribute("domain", domain_of(&address));
    }
    Ok(vec![ContentNode::Element(element)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ParseOptions;

    fn content(raw_open: &str, text: &str, raw_close: &str) -> TagContent {
        TagContent {
            nodes: vec![ContentNode::text(text)],
            raw_text: text.to_string(),
            raw_open: raw_open.to_string(),
            raw_close: raw_close.to_string(),
        }
    }

    #[test]
    fn test_user_carries_click_action() {
        let mut context = ParseContext::new(ParseOptions::default());
        let nodes = user(&mut context, None, content("[user]", "Ada", "[/user]")).unwrap();
        let element = nodes[0].as_element().unwrap();
        assert_eq!(
            element.action,
            Some(ClickAction::User {
                name: "Ada".to_string()
            })
        );
        assert_eq!(element.inline_copy.as_deref(), Some("[user]Ada[/user]"));
    }

    #[test]
    fn test_url_with_argument_uses_body_as_label() {
        let mut context = ParseContext::new(ParseOptions::default());
        let nodes = url(
            &mut context,
            Some("https://example.com"),
            content("[url=https://example.com]", "here", "[/url]"),
        )
        .unwrap();
        let element = nodes[0].as_element().unwrap();
        assert_eq!(element.attribute("href"), Some("https://example.com"));
        assert_eq!(element.children[0].as_text(), Some("here"));
        assert!(element.no_autolink);
    }

    #[test]
    fn test_url_rejects_non_web_scheme() {
        let mut context = ParseContext::new(ParseOptions::default());
        let nodes = url(
            &mut context,
            Some("javascript:alert(1)"),
            content("[url=javascript:alert(1)]", "x", "[/url]"),
        )
        .unwrap();
        assert_eq!(
            nodes[0].as_text(),
            Some("[url=javascript:alert(1)]x[/url]")
        );
    }

    #[test]
    fn test_url_domain_attribute() {
        let options = ParseOptions {
            add_url_domains: true,
            ..ParseOptions::default()
        };
        let mut context = ParseContext::new(options);
        let nodes = url(
            &mut context,
            None,
            content("[url]", "https://example.com/a", "[/url]"),
        )
        .unwrap();
        assert_eq!(
            nodes[0].as_element().unwrap().attribute("domain"),
            Some("example.com")
        );
    }
}
