//! Parse result ownership and the render adapter
//!
//! A `ParseResult` owns the rendered tree plus every resource the tag
//! conversions registered (auto-URL sub-parses, listener registrations).
//! Disposal is explicit, caller-driven, and idempotent; failing to dispose
//! leaks whatever the tags registered. The render adapter is the one place
//! click events meet the caller's sink.

use crate::context::{ChannelRef, ClickEvent, ClickSink, Disposable, ParseContext};
use crate::node::{ClickAction, ContentNode, Element, NodeList};
use std::collections::HashSet;
use std::rc::Rc;

/// Output of one `parse` call.
pub struct ParseResult {
    root: ContentNode,
    used_eicons: HashSet<String>,
    sink: Rc<dyn ClickSink>,
    channel: Option<ChannelRef>,
    disposables: Vec<Box<dyn Disposable>>,
    disposed: bool,
}

impl ParseResult {
    pub(crate) fn new(root: ContentNode, context: ParseContext) -> Self {
        let (options, disposables, used_eicons) = context.into_parts();
        ParseResult {
            root,
            used_eicons,
            sink: options.sink,
            channel: options.channel,
            disposables,
            disposed: false,
        }
    }

    /// The container node wrapping all parsed content.
    pub fn root(&self) -> &ContentNode {
        &self.root
    }

    /// Mutable access to the tree, for callers that resolve placeholder
    /// nodes after deferred loads complete.
    pub fn root_mut(&mut self) -> &mut ContentNode {
        &mut self.root
    }

    /// Lower-cased, deduplicated names of every icon the content used.
    pub fn used_eicons(&self) -> &HashSet<String> {
        &self.used_eicons
    }

    /// Releases every registered resource. Safe to call more than once;
    /// only the first call releases anything.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        for disposable in &mut self.disposables {
            disposable.dispose();
        }
        self.disposables.clear();
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Adapter over the neutral tree for a UI layer: tree traversal plus
    /// click routing through the sink.
    pub fn render_adapter(&self) -> RenderAdapter<'_> {
        RenderAdapter {
            root: &self.root,
            sink: &self.sink,
            channel: self.channel.as_ref(),
        }
    }

    pub(crate) fn take_root_children(&mut self) -> NodeList {
        match &mut self.root {
            ContentNode::Element(element) => std::mem::take(&mut element.children),
            _ => NodeList::new(),
        }
    }
}

impl std::fmt::Debug for ParseResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParseResult")
            .field("root", &self.root)
            .field("used_eicons", &self.used_eicons)
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}

impl Disposable for ParseResult {
    fn dispose(&mut self) {
        ParseResult::dispose(self);
    }
}

/// Thin adapter between the neutral content tree and whichever UI layer
/// displays it.
pub struct RenderAdapter<'a> {
    root: &'a ContentNode,
    sink: &'a Rc<dyn ClickSink>,
    channel: Option<&'a ChannelRef>,
}

impl<'a> RenderAdapter<'a> {
    pub fn root(&self) -> &'a ContentNode {
        self.root
    }

    /// Pre-order traversal over every node in the tree. Explicit-stack
    /// walk, so traversal depth is bounded by memory, not the call stack.
    pub fn visit<F: FnMut(&ContentNode)>(&self, visit: &mut F) {
        let mut stack = vec![self.root];
        while let Some(node) = stack.pop() {
            visit(node);
            if let ContentNode::Element(element) = node {
                stack.extend(element.children.iter().rev());
            }
        }
    }

    /// Routes a click on a reference element through the sink, carrying the
    /// right-click flag and the ambient channel context.
    pub fn click(&self, element: &Element, right_click: bool) {
        let Some(action) = &element.action else {
            return;
        };
        let event = ClickEvent {
            action: action.clone(),
            right_click,
            channel: self.channel.cloned(),
        };
        match action {
            ClickAction::User { .. } => self.sink.user_click(&event),
            ClickAction::Session { .. } => self.sink.session_click(&event),
            ClickAction::WebPage { .. } => self.sink.webpage_click(&event),
        }
    }
}
