//! Copy reconstruction: rendered tree back to plain source text
//!
//! The inverse-direction contract callers rely on for clipboard fidelity.
//! Each element recorded either an inline copy override or a copy
//! prefix/suffix pair when it was converted; walking the tree with that
//! metadata reproduces source-equivalent markup without re-tokenizing
//! anything.

use crate::node::ContentNode;
use crate::tokenizer::HR_MARKER;

/// Work item for the explicit reconstruction stack: either a node still to
/// visit or a literal suffix owed once an element's children are done.
enum Step<'a> {
    Node(&'a ContentNode),
    Literal(&'a str),
}

/// Reconstructs source-equivalent plain text from a rendered subtree.
///
/// Iterative walk with an explicit stack, so reconstruction of a deeply
/// nested tree is bounded by memory rather than the call stack.
pub fn reconstruct(node: &ContentNode) -> String {
    let mut out = String::new();
    let mut stack = vec![Step::Node(node)];
    while let Some(step) = stack.pop() {
        match step {
            Step::Literal(text) => out.push_str(text),
            Step::Node(ContentNode::Text(text)) => out.push_str(text),
            Step::Node(ContentNode::LineBreak) => out.push('\n'),
            Step::Node(ContentNode::HorizontalRule) => out.push_str(HR_MARKER),
            Step::Node(ContentNode::Element(element)) => {
                if let Some(copy) = &element.inline_copy {
                    out.push_str(copy);
                    continue;
                }
                out.push_str(&element.copy_prefix);
                stack.push(Step::Literal(&element.copy_suffix));
                for child in element.children.iter().rev() {
                    stack.push(Step::Node(child));
                }
            }
        }
    }
    out
}
