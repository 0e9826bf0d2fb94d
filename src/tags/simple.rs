//! Styled wrapper conversions
//!
//! These tags wrap their children in a named container and keep the raw
//! open/close markup as copy prefix/suffix. Color is the one wrapper with
//! argument handling: the restricted variant only honors the fixed palette
//! used for chat messages, while the permissive variant additionally
//! accepts hex colors for profile styling.

use super::styled;
use crate::context::ParseContext;
use crate::error::ParseError;
use crate::node::{ContentNode, Element, NodeList};
use crate::tag::TagContent;
use once_cell::sync::Lazy;
use regex::Regex;

type TagResult = Result<NodeList, ParseError>;

pub fn bold(_context: &mut ParseContext, _argument: Option<&str>, content: TagContent) -> TagResult {
    Ok(styled("bold", content))
}

pub fn italic(
    _context: &mut ParseContext,
    _argument: Option<&str>,
    content: TagContent,
) -> TagResult {
    Ok(styled("italic", content))
}

pub fn underline(
    _context: &mut ParseContext,
    _argument: Option<&str>,
    content: TagContent,
) -> TagResult {
    Ok(styled("underline", content))
}

pub fn strikethrough(
    _context: &mut ParseContext,
    _argument: Option<&str>,
    content: TagContent,
) -> TagResult {
    Ok(styled("strikethrough", content))
}

pub fn subscript(
    _context: &mut ParseContext,
    _argument: Option<&str>,
    content: TagContent,
) -> TagResult {
    Ok(styled("subscript", content))
}

pub fn superscript(
    _context: &mut ParseContext,
    _argument: Option<&str>,
    content: TagContent,
) -> TagResult {
    Ok(styled("superscript", content))
}

pub fn big(_context: &mut ParseContext, _argument: Option<&str>, content: TagContent) -> TagResult {
    Ok(styled("big", content))
}

pub fn small(
    _context: &mut ParseContext,
    _argument: Option<&str>,
    content: TagContent,
) -> TagResult {
    Ok(styled("small", content))
}

pub fn spoiler(
    _context: &mut ParseContext,
    _argument: Option<&str>,
    content: TagContent,
) -> TagResult {
    Ok(styled("spoiler", content))
}

pub fn center(
    _context: &mut ParseContext,
    _argument: Option<&str>,
    content: TagContent,
) -> TagResult {
    Ok(styled("center", content))
}

pub fn justify(
    _context: &mut ParseContext,
    _argument: Option<&str>,
    content: TagContent,
) -> TagResult {
    Ok(styled("justify", content))
}

pub fn indent(
    _context: &mut ParseContext,
    _argument: Option<&str>,
    content: TagContent,
) -> TagResult {
    Ok(styled("indent", content))
}

pub fn heading(
    _context: &mut ParseContext,
    _argument: Option<&str>,
    content: TagContent,
) -> TagResult {
    Ok(styled("heading", content))
}

/// Quote blocks forbid nested quotes via the descriptor's nesting policy;
/// the conversion itself is a plain wrap.
pub fn quote(
    _context: &mut ParseContext,
    _argument: Option<&str>,
    content: TagContent,
) -> TagResult {
    Ok(styled("quote", content))
}

pub fn unordered_list(
    _context: &mut ParseContext,
    _argument: Option<&str>,
    content: TagContent,
) -> TagResult {
    Ok(styled("unordered-list", content))
}

pub fn ordered_list(
    _context: &mut ParseContext,
    _argument: Option<&str>,
    content: TagContent,
) -> TagResult {
    Ok(styled("ordered-list", content))
}

pub fn list_item(
    _context: &mut ParseContext,
    _argument: Option<&str>,
    content: TagContent,
) -> TagResult {
    Ok(styled("list-item", content))
}

/// Palette accepted by the restricted color tag.
const COLOR_NAMES: &[&str] = &[
    "red", "orange", "yellow", "green", "cyan", "blue", "purple", "pink", "black", "brown",
    "white", "gray",
];

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").unwrap());

fn color_element(color: &str, content: TagContent) -> NodeList {
    vec![ContentNode::Element(
        Element::new("color")
            .with_attribute("color", color)
            .with_copy(&content.raw_open, &content.raw_close)
            .with_children(content.nodes),
    )]
}

/// Restricted color: an unknown color still wraps, but without the color
/// attribute, so the text renders plainly instead of leaking markup.
pub fn color(
    _context: &mut ParseContext,
    argument: Option<&str>,
    content: TagContent,
) -> TagResult {
    match argument.map(str::to_ascii_lowercase) {
        Some(name) if COLOR_NAMES.contains(&name.as_str()) => Ok(color_element(&name, content)),
        _ => Ok(styled("color", content)),
    }
}

/// Permissive color for profile styling: palette names or hex values.
pub fn color_permissive(
    _context: &mut ParseContext,
    argument: Option<&str>,
    content: TagContent,
) -> TagResult {
    match argument.map(str::to_ascii_lowercase) {
        Some(name) if COLOR_NAMES.contains(&name.as_str()) || HEX_COLOR.is_match(&name) => {
            Ok(color_element(&name, content))
        }
        _ => Ok(styled("color", content)),
    }
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
    fn test_wrap_preserves_copy_markup() {
        let mut context = ParseContext::new(ParseOptions::default());
        let nodes = bold(&mut context, None, content("[b]", "hi", "[/b]")).unwrap();
        let element = nodes[0].as_element().unwrap();
        assert_eq!(element.name, "bold");
        assert_eq!(element.copy_prefix, "[b]");
        assert_eq!(element.copy_suffix, "[/b]");
    }

    #[test]
    fn test_restricted_color_rejects_hex() {
        let mut context = ParseContext::new(ParseOptions::default());
        let nodes = color(
            &mut context,
            Some("#ff0000"),
            content("[color=#ff0000]", "x", "[/color]"),
        )
        .unwrap();
        assert_eq!(nodes[0].as_element().unwrap().attribute("color"), None);
    }

    #[test]
    fn test_permissive_color_accepts_hex() {
        let mut context = ParseContext::new(ParseOptions::default());
        let nodes = color_permissive(
            &mut context,
            Some("#FF0000"),
            content("[color=#FF0000]", "x", "[/color]"),
        )
        .unwrap();
        assert_eq!(
            nodes[0].as_element().unwrap().attribute("color"),
            Some("#ff0000")
        );
    }

    #[test]
    fn test_color_name_case_insensitive() {
        let mut context = ParseContext::new(ParseOptions::default());
        let nodes = color(
            &mut context,
            Some("RED"),
            content("[color=RED]", "x", "[/color]"),
        )
        .unwrap();
        assert_eq!(nodes[0].as_element().unwrap().attribute("color"), Some("red"));
    }
}
