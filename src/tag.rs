//! Tag descriptors and tag sets
//!
//! A tag is data, not a subclass: a descriptor is a plain record holding
//! the matching metadata and a pure conversion function pointer. A tag set
//! is a named ordered collection of descriptors; within one set, names may
//! repeat and the first descriptor whose validity check accepts the token
//! wins, so registration order is part of the contract.
//!
//! Descriptors and sets are immutable after construction and shared
//! read-only across all parses.

use crate::context::ParseContext;
use crate::error::ParseError;
use crate::node::NodeList;
use crate::result::ParseResult;
use crate::tokenizer::TagToken;

/// A tag conversion: pure transformation from (context, argument,
/// accumulated content) to one or more result nodes.
pub type Convert = fn(&mut ParseContext, Option<&str>, TagContent) -> Result<NodeList, ParseError>;

/// Validity check applied when resolving a token against a descriptor.
/// The default accepts everything; it exists for descriptor-specific gating.
pub type ValidStart = fn(&TagToken) -> bool;

/// Default validity check: every token is a valid start.
pub fn always_valid(_token: &TagToken) -> bool {
    true
}

/// Accumulated content handed to a conversion when its frame closes.
#[derive(Debug, Clone, Default)]
pub struct TagContent {
    /// Completed child nodes, in source order.
    pub nodes: NodeList,
    /// Raw source text of the children, for verbatim reconstruction.
    pub raw_text: String,
    /// Exact source text of the opening tag.
    pub raw_open: String,
    /// Exact source text of the closing tag; empty when the frame was
    /// force-closed at end of input.
    pub raw_close: String,
}

impl TagContent {
    /// Empty content shell for a self-closing tag.
    pub fn self_closing(raw_open: &str) -> Self {
        TagContent {
            raw_open: raw_open.to_string(),
            ..TagContent::default()
        }
    }

    /// Raw open tag + child text + close tag, i.e. the exact source span
    /// this tag covered.
    pub fn raw_source(&self) -> String {
        format!("{}{}{}", self.raw_open, self.raw_text, self.raw_close)
    }
}

/// Which tag names a descriptor permits as descendants while its frame is
/// open. Denied tags still display their raw text; only their semantic
/// conversion is suppressed.
#[derive(Debug, Clone, Copy)]
pub enum Nesting {
    AllowAll,
    /// Denies the listed tag names at any depth.
    Deny(&'static [&'static str]),
    /// Denies every tag (the `noparse` policy).
    DenyAll,
}

impl Nesting {
    pub fn permits(&self, name: &str) -> bool {
        match self {
            Nesting::AllowAll => true,
            Nesting::Deny(names) => !names.iter().any(|n| n.eq_ignore_ascii_case(name)),
            Nesting::DenyAll => false,
        }
    }
}

/// A registered tag definition.
#[derive(Debug, Clone)]
pub struct TagDescriptor {
    /// Tag name, matched case-insensitively.
    pub name: &'static str,
    /// Whether the tag requires a closing tag. Self-closing tags convert
    /// immediately with an empty content shell.
    pub has_closing_tag: bool,
    /// Informational: whether the tag makes use of an `=argument`.
    pub accepts_argument: bool,
    pub convert: Convert,
    pub nesting: Nesting,
    pub valid_start: ValidStart,
}

impl TagDescriptor {
    pub fn matches(&self, token: &TagToken) -> bool {
        self.name.eq_ignore_ascii_case(&token.name) && (self.valid_start)(token)
    }
}

/// A named, ordered collection of descriptors bound to one rendering
/// context, plus the per-instance post-processing configuration.
#[derive(Debug, Clone)]
pub struct TagSet {
    pub name: &'static str,
    pub tags: Vec<TagDescriptor>,
    /// Run the auto-URL-ization pass over parse results.
    pub auto_urlize: bool,
    /// Enable `[hr]` sentinel handling and the splitting pass.
    pub hr_processing: bool,
}

impl TagSet {
    /// Find the first descriptor that accepts this token, in registration
    /// order.
    pub fn resolve(&self, token: &TagToken) -> Option<&TagDescriptor> {
        self.tags.iter().find(|descriptor| descriptor.matches(token))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tags
            .iter()
            .any(|descriptor| descriptor.name.eq_ignore_ascii_case(name))
    }

    /// Registered tag names, in registration order, duplicates included.
    pub fn tag_names(&self) -> Vec<&'static str> {
        self.tags.iter().map(|descriptor| descriptor.name).collect()
    }

    /// Parse raw markup against this tag set.
    ///
    /// This is the single entry point of the pipeline: one tokenizer run,
    /// one dispatch over the token stream, then the post-processing passes
    /// this set enables. The returned result owns every resource the tag
    /// conversions registered and must be disposed by the caller.
    pub fn parse(
        &self,
        raw: &str,
        options: crate::context::ParseOptions,
    ) -> Result<ParseResult, ParseError> {
        crate::parser::run(self, raw, options)
    }
}
