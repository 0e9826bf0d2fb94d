//! Per-tag-set behavior
//!
//! The five registered configurations accept different markup and run
//! different post-processing; these tests pin what each set converts,
//! what it passes through, and the trust boundary around raw HTML.

use bbcode::{reconstruct, tag_sets, ClickAction, ContentNode, ParseOptions, ParseResult};

fn parse(set: &str, source: &str) -> ParseResult {
    tag_sets::lookup(set)
        .unwrap()
        .parse(source, ParseOptions::default())
        .unwrap()
}

fn first_element<'a>(result: &'a ParseResult, name: &str) -> Option<&'a bbcode::Element> {
    result
        .root()
        .as_element()
        .unwrap()
        .children
        .iter()
        .filter_map(ContentNode::as_element)
        .find(|element| element.name == name)
}

#[test]
fn chat_color_ignores_hex_values() {
    let result = parse("chat", "[color=#ff0000]x[/color]");
    let element = first_element(&result, "color").unwrap();
    assert_eq!(element.attribute("color"), None);
}

#[test]
fn profilenoimg_color_accepts_hex_values() {
    let result = parse("profilenoimg", "[color=#ff0000]x[/color]");
    let element = first_element(&result, "color").unwrap();
    assert_eq!(element.attribute("color"), Some("#ff0000"));
}

#[test]
fn profilenoimg_passes_image_tags_through() {
    let source = "[img]https://example.com/a.png[/img]";
    let result = parse("profilenoimg", source);
    assert_eq!(reconstruct(result.root()), source);
    assert!(first_element(&result, "img").is_none());
}

#[test]
fn profile_converts_image_tags() {
    let result = parse("profile", "[img=a cat]https://example.com/a.png[/img]");
    let element = first_element(&result, "img").unwrap();
    assert_eq!(element.attribute("src"), Some("https://example.com/a.png"));
    assert_eq!(element.attribute("alt"), Some("a cat"));
}

#[test]
fn image_preview_popups_mark_the_element() {
    let options = ParseOptions {
        image_preview_popups: true,
        ..ParseOptions::default()
    };
    let result = tag_sets::lookup("profile")
        .unwrap()
        .parse("[img]https://example.com/a.png[/img]", options)
        .unwrap();
    let element = first_element(&result, "img").unwrap();
    assert_eq!(element.attribute("preview"), Some("true"));
}

#[test]
fn html_converts_only_in_system_messages() {
    let source = "[html]<b>hi</b>[/html]";

    let system = parse("systemmessage", source);
    let element = first_element(&system, "html").unwrap();
    assert_eq!(element.children[0].as_text(), Some("<b>hi</b>"));

    let chat = parse("chat", source);
    assert!(first_element(&chat, "html").is_none());
    assert_eq!(reconstruct(chat.root()), source);
}

#[test]
fn null_set_is_pure_passthrough() {
    let source = "[b]x[/b] https://example.com a[hr]b";
    let result = parse("null", source);
    let children = &result.root().as_element().unwrap().children;
    assert!(children.iter().all(ContentNode::is_text));
    assert_eq!(reconstruct(result.root()), source);
}

#[test]
fn session_tag_carries_id_and_title() {
    let result = parse("chat", "[session=My Room]adh-1234[/session]");
    let element = first_element(&result, "session").unwrap();
    assert_eq!(element.attribute("session-id"), Some("adh-1234"));
    assert_eq!(element.children[0].as_text(), Some("My Room"));
    assert_eq!(
        element.action,
        Some(ClickAction::Session {
            id: "adh-1234".to_string(),
            title: "My Room".to_string(),
        })
    );
    assert_eq!(
        reconstruct(result.root()),
        "[session=My Room]adh-1234[/session]"
    );
}

#[test]
fn channel_tag_routes_like_a_session() {
    let result = parse("chat", "[channel]Development[/channel]");
    let element = first_element(&result, "channel").unwrap();
    assert_eq!(
        element.action,
        Some(ClickAction::Session {
            id: "Development".to_string(),
            title: "Development".to_string(),
        })
    );
}

#[test]
fn user_tag_carries_character_name() {
    let result = parse("chat", "[user]Ada Lovelace[/user]");
    let element = first_element(&result, "user").unwrap();
    assert_eq!(
        element.action,
        Some(ClickAction::User {
            name: "Ada Lovelace".to_string(),
        })
    );
}

#[test]
fn icon_contributes_to_used_eicons() {
    let result = parse("chat", "[icon]Some Character[/icon]");
    assert!(result.used_eicons().contains("some character"));
}
