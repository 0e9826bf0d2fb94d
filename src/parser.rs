//! Frame-stack dispatch engine
//!
//! The engine walks the token stream once, keeping the set of currently
//! open tags as an explicit stack of frames instead of recursive function
//! calls. The explicit stack is what makes malformed input cheap to
//! tolerate: an unterminated tag is simply a frame still on the stack at
//! end of input, force-closed with an empty synthetic closing token, and
//! deep or adversarial nesting cannot exhaust the call stack.
//!
//! There is no hard-failure path for structure. Unknown tags, stray
//! closing tags, and permission-denied tags all degrade to literal text at
//! the point of use, so users see their mistakes instead of losing them.
//! The only error that escapes is a conversion rejecting its own argument.

use crate::context::{ParseContext, ParseOptions};
use crate::error::ParseError;
use crate::node::{push_text_nodes, ContentNode, Element, NodeList};
use crate::passes;
use crate::result::ParseResult;
use crate::tag::{TagContent, TagDescriptor, TagSet};
use crate::tokenizer::{tokenize, Token};

/// One entry in the dispatch stack: a currently open tag accumulating its
/// children and their raw source text. The root frame has no descriptor.
struct Frame<'a> {
    descriptor: Option<&'a TagDescriptor>,
    open_argument: Option<String>,
    raw_open: String,
    children: NodeList,
    raw: Vec<String>,
}

impl<'a> Frame<'a> {
    fn root() -> Self {
        Frame {
            descriptor: None,
            open_argument: None,
            raw_open: String::new(),
            children: NodeList::new(),
            raw: Vec::new(),
        }
    }

    fn open(descriptor: &'a TagDescriptor, argument: Option<String>, raw_open: String) -> Self {
        Frame {
            descriptor: Some(descriptor),
            open_argument: argument,
            raw_open,
            children: NodeList::new(),
            raw: Vec::new(),
        }
    }
}

/// Whether every currently open frame permits this tag name as a
/// descendant.
fn stack_permits(stack: &[Frame<'_>], name: &str) -> bool {
    stack
        .iter()
        .filter_map(|frame| frame.descriptor)
        .all(|descriptor| descriptor.nesting.permits(name))
}

/// Appends literal text to the top frame, in both rendered and raw form.
fn append_literal(stack: &mut [Frame<'_>], text: &str) {
    let top = stack.last_mut().unwrap();
    push_text_nodes(&mut top.children, text);
    top.raw.push(text.to_string());
}

/// Pops the top frame and converts it, or leaks its markup literally when
/// an ancestor denies the tag. `raw_close` is empty for frames force-closed
/// at end of input.
fn close_top(
    stack: &mut Vec<Frame<'_>>,
    context: &mut ParseContext,
    raw_close: &str,
) -> Result<(), ParseError> {
    let frame = stack.pop().unwrap();
    let descriptor = frame.descriptor.unwrap();
    let permitted = stack_permits(stack, descriptor.name);
    let child_raw = frame.raw.concat();

    if permitted {
        let content = TagContent {
            nodes: frame.children,
            raw_text: child_raw.clone(),
            raw_open: frame.raw_open.clone(),
            raw_close: raw_close.to_string(),
        };
        let produced = (descriptor.convert)(context, frame.open_argument.as_deref(), content)?;
        let top = stack.last_mut().unwrap();
        top.children.extend(produced);
    } else {
        // The tag markup leaks through unconverted, but its children stay
        // converted.
        let top = stack.last_mut().unwrap();
        push_text_nodes(&mut top.children, &frame.raw_open);
        top.children.extend(frame.children);
        push_text_nodes(&mut top.children, raw_close);
    }

    let top = stack.last_mut().unwrap();
    top.raw.push(frame.raw_open);
    top.raw.push(child_raw);
    top.raw.push(raw_close.to_string());
    Ok(())
}

/// Runs the full pipeline for one input string against one tag set.
///
/// A conversion error aborts the parse; resources registered by earlier
/// conversions are released here, since no result will exist to own them.
pub(crate) fn run(
    set: &TagSet,
    raw: &str,
    options: ParseOptions,
) -> Result<ParseResult, ParseError> {
    let mut context = ParseContext::new(options);
    match dispatch(set, raw, &mut context) {
        Ok(root) => Ok(ParseResult::new(root, context)),
        Err(error) => {
            context.dispose_registered();
            Err(error)
        }
    }
}

fn dispatch(set: &TagSet, raw: &str, context: &mut ParseContext) -> Result<ContentNode, ParseError> {
    let mut stack: Vec<Frame<'_>> = vec![Frame::root()];

    for token in tokenize(raw, set.hr_processing) {
        match token {
            Token::Text(text) => {
                append_literal(&mut stack, &text);
            }
            Token::Open(tag) => match set.resolve(&tag) {
                Some(descriptor) if descriptor.has_closing_tag => {
                    stack.push(Frame::open(descriptor, tag.argument, tag.original));
                }
                Some(descriptor) => {
                    // Self-closing: convert immediately, subject to every
                    // ancestor's permission.
                    if stack_permits(&stack, descriptor.name) {
                        let content = TagContent::self_closing(&tag.original);
                        let produced =
                            (descriptor.convert)(context, tag.argument.as_deref(), content)?;
                        let top = stack.last_mut().unwrap();
                        top.children.extend(produced);
                        top.raw.push(tag.original);
                    } else {
                        append_literal(&mut stack, &tag.original);
                    }
                }
                None => {
                    append_literal(&mut stack, &tag.original);
                }
            },
            Token::Close(tag) => {
                let matches_top = stack
                    .last()
                    .and_then(|frame| frame.descriptor)
                    .is_some_and(|descriptor| descriptor.name.eq_ignore_ascii_case(&tag.name));
                if matches_top {
                    close_top(&mut stack, context, &tag.original)?;
                } else {
                    // Stray closing tag: literal text, no pop.
                    append_literal(&mut stack, &tag.original);
                }
            }
        }
    }

    // Force-close every unterminated tag with an empty synthetic closing
    // token so each open frame is still converted.
    while stack.len() > 1 {
        close_top(&mut stack, context, "")?;
    }

    let root_frame = stack.pop().unwrap();
    let mut container = Element::new("container").with_children(root_frame.children);
    if context.options.parse_as_status {
        container = container.with_attribute("status", "true");
    }
    let mut root = ContentNode::Element(container);

    if set.auto_urlize {
        passes::auto_urlize(set, &mut root, context)?;
    }
    if set.hr_processing {
        passes::split_horizontal_rules(&mut root);
    }

    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::{always_valid, Nesting};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn convert_marker(
        _context: &mut ParseContext,
        _argument: Option<&str>,
        content: TagContent,
    ) -> Result<NodeList, ParseError> {
        Ok(vec![ContentNode::Element(
            Element::new("marker")
                .with_copy(&content.raw_open, &content.raw_close)
                .with_children(content.nodes),
        )])
    }

    static SELF_CLOSING_CALLS: AtomicUsize = AtomicUsize::new(0);

    fn convert_counting(
        _context: &mut ParseContext,
        _argument: Option<&str>,
        _content: TagContent,
    ) -> Result<NodeList, ParseError> {
        SELF_CLOSING_CALLS.fetch_add(1, Ordering::SeqCst);
        Ok(vec![ContentNode::text("*")])
    }

    fn test_set() -> TagSet {
        TagSet {
            name: "test",
            tags: vec![
                TagDescriptor {
                    name: "m",
                    has_closing_tag: true,
                    accepts_argument: false,
                    convert: convert_marker,
                    nesting: Nesting::AllowAll,
                    valid_start: always_valid,
                },
                TagDescriptor {
                    name: "block",
                    has_closing_tag: true,
                    accepts_argument: false,
                    convert: convert_marker,
                    nesting: Nesting::DenyAll,
                    valid_start: always_valid,
                },
                TagDescriptor {
                    name: "star",
                    has_closing_tag: false,
                    accepts_argument: false,
                    convert: convert_counting,
                    nesting: Nesting::AllowAll,
                    valid_start: always_valid,
                },
            ],
            auto_urlize: false,
            hr_processing: false,
        }
    }

    fn parse(raw: &str) -> ParseResult {
        test_set().parse(raw, ParseOptions::default()).unwrap()
    }

    fn children(result: &ParseResult) -> &NodeList {
        &result.root().as_element().unwrap().children
    }

    #[test]
    fn test_balanced_tag_converts() {
        let result = parse("[m]hi[/m]");
        let nodes = children(&result);
        assert_eq!(nodes.len(), 1);
        let element = nodes[0].as_element().unwrap();
        assert_eq!(element.name, "marker");
        assert_eq!(element.children[0].as_text(), Some("hi"));
    }

    #[test]
    fn test_unterminated_tag_force_closes() {
        let result = parse("[m]hi");
        let element = children(&result)[0].as_element().unwrap();
        assert_eq!(element.name, "marker");
        assert_eq!(element.copy_suffix, "");
    }

    #[test]
    fn test_stray_close_is_literal() {
        let result = parse("a[/m]b");
        let nodes = children(&result);
        assert_eq!(nodes[0].as_text(), Some("a"));
        assert_eq!(nodes[1].as_text(), Some("[/m]"));
        assert_eq!(nodes[2].as_text(), Some("b"));
    }

    #[test]
    fn test_mismatched_close_does_not_pop() {
        let result = parse("[m]a[/block]b[/m]");
        let element = children(&result)[0].as_element().unwrap();
        assert_eq!(element.name, "marker");
        assert_eq!(element.children[1].as_text(), Some("[/block]"));
    }

    #[test]
    fn test_self_closing_converts_in_place() {
        let result = parse("a[star]b");
        let nodes = children(&result);
        assert_eq!(nodes[1].as_text(), Some("*"));
        assert_eq!(nodes.len(), 3);
    }

    #[test]
    fn test_self_closing_denied_inside_block() {
        SELF_CLOSING_CALLS.store(0, Ordering::SeqCst);
        let result = parse("[block][star][/block]");
        assert_eq!(SELF_CLOSING_CALLS.load(Ordering::SeqCst), 0);
        let element = children(&result)[0].as_element().unwrap();
        assert_eq!(element.children[0].as_text(), Some("[star]"));
    }

    #[test]
    fn test_denied_nested_tag_leaks_markup_but_converts_children() {
        let result = parse("[block][m]inner[/m][/block]");
        let element = children(&result)[0].as_element().unwrap();
        let texts: Vec<&str> = element
            .children
            .iter()
            .filter_map(ContentNode::as_text)
            .collect();
        assert_eq!(texts, vec!["[m]", "inner", "[/m]"]);
    }

    #[test]
    fn test_newlines_become_line_breaks() {
        let result = parse("a\nb");
        let nodes = children(&result);
        assert_eq!(
            nodes,
            &vec![
                ContentNode::text("a"),
                ContentNode::LineBreak,
                ContentNode::text("b"),
            ]
        );
    }

    #[test]
    fn test_status_marker_on_container() {
        let options = ParseOptions {
            parse_as_status: true,
            ..ParseOptions::default()
        };
        let result = test_set().parse("x", options).unwrap();
        assert_eq!(
            result.root().as_element().unwrap().attribute("status"),
            Some("true")
        );
    }
}
