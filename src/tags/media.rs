//! Image and icon conversions
//!
//! Media tags resolve their body to a resource reference and contribute to
//! the context's used-icon set. Parsing is synchronous, so deferred image
//! loading is modeled as attributes on the element: the renderer issues the
//! load and mutates the placeholder once it resolves.

use super::{is_web_url, plain_text_of};
use crate::context::ParseContext;
use crate::error::ParseError;
use crate::node::{ClickAction, ContentNode, Element, NodeList};
use crate::tag::TagContent;

type TagResult = Result<NodeList, ParseError>;

/// `[icon]name[/icon]` - a character's avatar, clicking through to the
/// character.
pub fn icon(context: &mut ParseContext, _argument: Option<&str>, content: TagContent) -> TagResult {
    let name = plain_text_of(&content.nodes);
    context.note_icon_use(&name);
    Ok(vec![ContentNode::Element(
        Element::new("icon")
            .with_attribute("character", &name)
            .with_inline_copy(&content.raw_source())
            .with_action(ClickAction::User { name }),
    )])
}

/// `[eicon]name[/eicon]` or `[eicon=size]name[/eicon]` - an inline icon by
/// identifier.
///
/// A non-numeric size argument is a data error and aborts the parse; this
/// is the one deliberately throwing path in the built-in roster.
pub fn eicon(context: &mut ParseContext, argument: Option<&str>, content: TagContent) -> TagResult {
    if let Some(size) = argument {
        if size.parse::<u32>().is_err() {
            return Err(ParseError::Tag {
                tag: "eicon".to_string(),
                message: format!("malformed size argument: {}", size),
            });
        }
    }

    let name = plain_text_of(&content.nodes).to_lowercase();
    context.note_icon_use(&name);

    let mut element = Element::new("eicon")
        .with_attribute("name", &name)
        .with_inline_copy(&content.raw_source());
    if let Some(size) = argument {
        element = element.with_attribute("size", size);
    }
    if let Some(image) = context.options.inline_image_data.get(&name) {
        element = element.with_attribute("path", &image.path);
        if image.animated {
            element = element.with_attribute("animated", "true");
        }
    }
    if context.options.sync_gifs {
        element = element.with_attribute("sync", "true");
    }
    if let Some(load_tag) = &context.options.eicons_unique_load_tag {
        element = element.with_attribute("load-tag", load_tag);
    }
    Ok(vec![ContentNode::Element(element)])
}

/// `[img]url[/img]` or `[img=description]url[/img]` - an inline image.
///
/// The body must be an `http(s)` URL; anything else is a data error.
pub fn image(context: &mut ParseContext, argument: Option<&str>, content: TagContent) -> TagResult {
    let address = plain_text_of(&content.nodes);
    if !is_web_url(&address) {
        return Err(ParseError::Tag {
            tag: "img".to_string(),
            message: format!("image source must be an http(s) url, got: {}", address),
        });
    }

    let mut element = Element::new("img")
        .with_attribute("src", &address)
        .with_inline_copy(&content.raw_source())
        .excluded_from_autolink();
    if let Some(description) = argument {
        element = element.with_attribute("alt", description);
    }
    if context.options.image_preview_popups {
        element = element.with_attribute("preview", "true");
    }
    Ok(vec![ContentNode::Element(element)])
}
