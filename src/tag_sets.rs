//! Named tag set registry
//!
//! This module wires the built-in conversions into the five registered
//! configurations and exposes by-name lookup:
//!
//! - `chat` - minimal inline set for chat messages, no block images
//! - `profile` - adds block/structural tags and inline images
//! - `profilenoimg` - profile minus images, plus permissive color
//! - `systemmessage` - adds lists and raw HTML (trusted content only)
//! - `null` - no tags recognized, post-processing disabled; pure
//!   passthrough/escape mode
//!
//! Within one set the first descriptor accepting a token wins, so
//! registration order is deterministic and meaningful: `profilenoimg`
//! shadows the restricted `color` descriptor by registering the permissive
//! one ahead of it.

use crate::tag::{always_valid, Convert, Nesting, TagDescriptor, TagSet};
use crate::tags::{media, passthrough, references, simple};
use once_cell::sync::Lazy;
use std::collections::HashMap;

fn wrap(name: &'static str, convert: Convert) -> TagDescriptor {
    TagDescriptor {
        name,
        has_closing_tag: true,
        accepts_argument: false,
        convert,
        nesting: Nesting::AllowAll,
        valid_start: always_valid,
    }
}

fn wrap_with_argument(name: &'static str, convert: Convert) -> TagDescriptor {
    TagDescriptor {
        accepts_argument: true,
        ..wrap(name, convert)
    }
}

fn chat_tags() -> Vec<TagDescriptor> {
    vec![
        wrap("b", simple::bold),
        wrap("i", simple::italic),
        wrap("u", simple::underline),
        wrap("s", simple::strikethrough),
        wrap("sub", simple::subscript),
        wrap("sup", simple::superscript),
        wrap_with_argument("color", simple::color),
        wrap("spoiler", simple::spoiler),
        wrap_with_argument("url", references::url),
        wrap("user", references::user),
        wrap("icon", media::icon),
        wrap_with_argument("eicon", media::eicon),
        wrap_with_argument("session", references::session),
        wrap("channel", references::channel),
        TagDescriptor {
            nesting: Nesting::DenyAll,
            ..wrap("noparse", passthrough::no_parse)
        },
    ]
}

fn list_tags() -> Vec<TagDescriptor> {
    vec![
        wrap("ul", simple::unordered_list),
        wrap("ol", simple::ordered_list),
        wrap("li", simple::list_item),
    ]
}

fn profile_tags() -> Vec<TagDescriptor> {
    let mut tags = chat_tags();
    tags.extend([
        wrap("big", simple::big),
        wrap("small", simple::small),
        wrap("center", simple::center),
        wrap("justify", simple::justify),
        wrap("indent", simple::indent),
        wrap("heading", simple::heading),
        TagDescriptor {
            nesting: Nesting::Deny(&["quote"]),
            ..wrap("quote", simple::quote)
        },
    ]);
    tags.extend(list_tags());
    tags.push(wrap_with_argument("img", media::image));
    tags
}

static CHAT: Lazy<TagSet> = Lazy::new(|| TagSet {
    name: "chat",
    tags: chat_tags(),
    auto_urlize: true,
    hr_processing: false,
});

static PROFILE: Lazy<TagSet> = Lazy::new(|| TagSet {
    name: "profile",
    tags: profile_tags(),
    auto_urlize: true,
    hr_processing: true,
});

static PROFILE_NO_IMG: Lazy<TagSet> = Lazy::new(|| {
    let mut tags = vec![wrap_with_argument("color", simple::color_permissive)];
    tags.extend(
        profile_tags()
            .into_iter()
            .filter(|descriptor| !["img", "icon", "eicon"].contains(&descriptor.name)),
    );
    TagSet {
        name: "profilenoimg",
        tags,
        auto_urlize: true,
        hr_processing: true,
    }
});

static SYSTEM_MESSAGE: Lazy<TagSet> = Lazy::new(|| {
    let mut tags = chat_tags();
    tags.extend(list_tags());
    tags.push(wrap("html", passthrough::raw_html));
    TagSet {
        name: "systemmessage",
        tags,
        auto_urlize: true,
        hr_processing: true,
    }
});

static NULL: Lazy<TagSet> = Lazy::new(|| TagSet {
    name: "null",
    tags: Vec::new(),
    auto_urlize: false,
    hr_processing: false,
});

static REGISTRY: Lazy<HashMap<&'static str, &'static TagSet>> = Lazy::new(|| {
    let mut registry: HashMap<&'static str, &'static TagSet> = HashMap::new();
    for set in [&*CHAT, &*PROFILE, &*PROFILE_NO_IMG, &*SYSTEM_MESSAGE, &*NULL] {
        registry.insert(set.name, set);
    }
    registry
});

/// Look up a registered tag set by name, case-insensitively.
pub fn lookup(name: &str) -> Option<&'static TagSet> {
    REGISTRY.get(name.to_ascii_lowercase().as_str()).copied()
}

/// Names of all registered tag sets, sorted.
pub fn names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = REGISTRY.keys().copied().collect();
    names.sort_unstable();
    names
}
