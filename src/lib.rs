//! # bbcode
//!
//! A parser for the BBCode markup format: a tokenizer plus a tag-dispatch
//! engine that converts restricted markup (`[b]...[/b]`) into a sanitized,
//! renderable content-node tree, with auxiliary passes for automatic
//! URL-ification and horizontal-rule splitting.
//!
//! The pipeline is: pick a registered [tag set](tag_sets), call
//! [`TagSet::parse`](tag::TagSet::parse) with one complete input string and
//! per-call [options](context::ParseOptions), and receive a disposable
//! [result](ParseResult) holding the tree plus its metadata.
//! Malformed markup never fails a parse; it degrades to literal text so
//! users can see and correct their own mistakes.

pub mod context;
pub mod copy;
pub mod error;
pub mod node;
pub mod passes;
pub mod tag;
pub mod tag_sets;
pub mod tags;
pub mod tokenizer;

mod parser;
mod result;

pub use context::{
    ChannelRef, ClickEvent, ClickSink, Disposable, InlineImage, NullSink, ParseContext,
    ParseOptions, SessionRef,
};
pub use copy::reconstruct;
pub use error::ParseError;
pub use node::{ClickAction, ContentNode, Element, NodeList};
pub use result::{ParseResult, RenderAdapter};
pub use tag::{Nesting, TagContent, TagDescriptor, TagSet};
pub use tokenizer::{tokenize, TagToken, Token};
