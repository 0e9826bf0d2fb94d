//! Tokenizer for BBCode markup
//!
//! This module performs the single regex-driven scan that splits raw markup
//! into a flat ordered sequence of text, open-tag, and closing-tag tokens.
//! This is the entry point where source strings become token streams; the
//! dispatch engine consumes the stream in order and never re-reads the
//! source.
//!
//! The bracket grammar is deliberately small: a tag is `[name]`,
//! `[name=argument]`, or the closing `[/name]`, where the name is ASCII
//! letters only and the argument is any run of characters not containing
//! `]`. Anything that does not match is left as plain text, so malformed
//! input is never lost.
//!
//! `[hr]` handling: when HR processing is enabled, literal `[hr]` substrings
//! are replaced with a private sentinel before the scan so the generic tag
//! path does not consume them, and the sentinel is restored to literal
//! `[hr]` text in every emitted token field. The marker is then split into
//! horizontal-rule nodes downstream, which lets it sit flush against other
//! text without being captured by tag matching.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Literal marker recognized by HR processing.
pub const HR_MARKER: &str = "[hr]";

/// Private-use sentinel standing in for `[hr]` during the scan.
const HR_SENTINEL: char = '\u{E000}';

/// Escape prefix protecting private-use characters already present in the
/// input, so restoration is exact even for text that happens to contain
/// the sentinel.
const HR_ESCAPE: char = '\u{E001}';

static TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[(/?)([A-Za-z]+)(?:=([^\]]*))?\]").unwrap());

/// The bracketed part of an open or closing tag token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagToken {
    /// Tag name as written in the source; matched case-insensitively.
    pub name: String,
    /// Raw argument text after `=`, if any.
    pub argument: Option<String>,
    /// Exact source substring, needed for verbatim reconstruction when a
    /// tag fails to match or is disallowed.
    pub original: String,
}

/// One lexical unit of the token stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Token {
    /// A run of literal text between tags.
    Text(String),
    /// An open or self-closing tag.
    Open(TagToken),
    /// A closing tag. The bracket grammar permits an argument here; the
    /// dispatch engine keys closes purely on the name and ignores it.
    Close(TagToken),
}

impl Token {
    /// Returns the exact source text this token was produced from.
    pub fn source_text(&self) -> &str {
        match self {
            Token::Text(text) => text,
            Token::Open(tag) | Token::Close(tag) => &tag.original,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Text(text) => write!(f, "<text:{}>", text),
            Token::Open(tag) => match &tag.argument {
                Some(argument) => write!(f, "<open:{}={}>", tag.name, argument),
                None => write!(f, "<open:{}>", tag.name),
            },
            Token::Close(tag) => write!(f, "<close:{}>", tag.name),
        }
    }
}

/// Tokenize raw markup into a flat token sequence.
///
/// Every byte of the input is covered by exactly one token: pretext before
/// each tag match becomes a text token when non-empty, trailing characters
/// after the last match become a final text token, and input with no tag
/// matches at all becomes a single text token.
pub fn tokenize(raw: &str, hr_processing: bool) -> Vec<Token> {
    let scanned: Cow<'_, str> = if hr_processing {
        Cow::Owned(encode_hr(raw))
    } else {
        Cow::Borrowed(raw)
    };

    let restore = |text: &str| -> String {
        if hr_processing {
            decode_hr(text)
        } else {
            text.to_string()
        }
    };

    let mut tokens = Vec::new();
    let mut last_end = 0;
    for captures in TAG_PATTERN.captures_iter(&scanned) {
        let whole = captures.get(0).unwrap();
        if whole.start() > last_end {
            tokens.push(Token::Text(restore(&scanned[last_end..whole.start()])));
        }
        let tag = TagToken {
            name: captures[2].to_string(),
            argument: captures.get(3).map(|m| restore(m.as_str())),
            original: restore(whole.as_str()),
        };
        if captures[1].is_empty() {
            tokens.push(Token::Open(tag));
        } else {
            tokens.push(Token::Close(tag));
        }
        last_end = whole.end();
    }

    if tokens.is_empty() {
        tokens.push(Token::Text(restore(&scanned)));
    } else if last_end < scanned.len() {
        tokens.push(Token::Text(restore(&scanned[last_end..])));
    }

    tokens
}

/// Escapes pre-existing private-use characters, then stands the sentinel
/// in for every literal `[hr]`. `decode_hr` inverts this exactly.
fn encode_hr(raw: &str) -> String {
    raw.replace(HR_ESCAPE, "\u{E001}\u{E001}")
        .replace(HR_SENTINEL, "\u{E001}\u{E000}")
        .replace(HR_MARKER, "\u{E000}")
}

fn decode_hr(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(next) = chars.next() {
        match next {
            HR_ESCAPE => {
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            }
            HR_SENTINEL => out.push_str(HR_MARKER),
            other => out.push(other),
        }
    }
    out
}
