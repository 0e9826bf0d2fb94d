//! Per-call parse state: options, click sink, and the resource registry
//!
//! The parse options are resolved once per call and threaded, via the
//! context, through every tag conversion. The context also accumulates the
//! two pieces of metadata the result exposes: the set of used icon names
//! and the list of disposable resources that must be released when the
//! caller discards the result. The registry is an explicit value owned by
//! the call, not ambient state; the top-level caller owns the result and
//! releases it exactly once.

use crate::node::ClickAction;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

/// Caller-supplied click-routing callbacks for interactive reference
/// elements. Every method defaults to a no-op.
pub trait ClickSink {
    fn user_click(&self, event: &ClickEvent) {
        let _ = event;
    }
    fn session_click(&self, event: &ClickEvent) {
        let _ = event;
    }
    fn webpage_click(&self, event: &ClickEvent) {
        let _ = event;
    }
}

/// Sink that ignores every click.
#[derive(Debug, Default)]
pub struct NullSink;

impl ClickSink for NullSink {}

/// A concrete click on a reference element, routed through the sink by the
/// render adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickEvent {
    pub action: ClickAction,
    pub right_click: bool,
    /// Ambient channel the parse ran under, if any.
    pub channel: Option<ChannelRef>,
}

/// Reference to an active private session, passed through unchanged to tag
/// conversions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRef {
    pub id: String,
    pub title: String,
}

/// Reference to the active channel, passed through unchanged to tag
/// conversions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRef {
    pub id: String,
    pub name: String,
}

/// Metadata for one inline image, used by icon-rendering tags instead of a
/// network fetch when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineImage {
    pub path: String,
    pub animated: bool,
}

/// Options accepted by `parse`.
#[derive(Clone)]
pub struct ParseOptions {
    pub sink: Rc<dyn ClickSink>,
    /// Informational flag passed to link tags: show the link's domain next
    /// to its label.
    pub add_url_domains: bool,
    /// Animated icons suppress independent animation timing in favor of a
    /// shared clock.
    pub sync_gifs: bool,
    /// Image tags wire up a hover/click preview affordance.
    pub image_preview_popups: bool,
    /// Lookup from inline-image identifier to metadata.
    pub inline_image_data: HashMap<String, InlineImage>,
    /// Adds a distinguishing marker to the result container; does not
    /// change parse semantics.
    pub parse_as_status: bool,
    /// Opaque string correlating concurrent icon loads for the same
    /// logical request.
    pub eicons_unique_load_tag: Option<String>,
    /// Name of the viewing character, if any.
    pub viewer: Option<String>,
    pub session: Option<SessionRef>,
    pub channel: Option<ChannelRef>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            sink: Rc::new(NullSink),
            add_url_domains: false,
            sync_gifs: false,
            image_preview_popups: false,
            inline_image_data: HashMap::new(),
            parse_as_status: false,
            eicons_unique_load_tag: None,
            viewer: None,
            session: None,
            channel: None,
        }
    }
}

/// A resource owned by a parse result, released exactly once on disposal.
pub trait Disposable {
    fn dispose(&mut self);
}

/// Per-call mutable state threaded through every tag conversion.
pub struct ParseContext {
    pub options: ParseOptions,
    disposables: Vec<Box<dyn Disposable>>,
    used_eicons: HashSet<String>,
}

impl ParseContext {
    pub fn new(options: ParseOptions) -> Self {
        ParseContext {
            options,
            disposables: Vec::new(),
            used_eicons: HashSet::new(),
        }
    }

    /// Registers a resource to be released when the result is disposed.
    pub fn register_disposable(&mut self, disposable: Box<dyn Disposable>) {
        self.disposables.push(disposable);
    }

    /// Records an icon name as used; names are lower-cased and
    /// deduplicated.
    pub fn note_icon_use(&mut self, name: &str) {
        self.used_eicons.insert(name.to_lowercase());
    }

    pub fn used_eicons(&self) -> &HashSet<String> {
        &self.used_eicons
    }

    /// Releases every registered resource immediately. Used on parse
    /// failure, where no result will exist to carry the registry.
    pub(crate) fn dispose_registered(&mut self) {
        for disposable in &mut self.disposables {
            disposable.dispose();
        }
        self.disposables.clear();
    }

    pub(crate) fn into_parts(self) -> (ParseOptions, Vec<Box<dyn Disposable>>, HashSet<String>) {
        (self.options, self.disposables, self.used_eicons)
    }
}
