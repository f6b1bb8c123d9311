//! Tests for inline tags: chunked parsing and rendering through callbacks.

use std::sync::Arc;

use nanointl::parser::{External, Node};
use nanointl::plugins::{Plugin, TAG_TOKEN, TagsParser, TagsPlugin, default_plugins};
use nanointl::types::{Callback, Object, RenderProps};
use nanointl::{
    BuildError, Chunk, FormatError, Intl, IntlOptions, Output, ParseError, Value, build_intl,
    values,
};

fn tag(name: &str, raw: &str, children: Vec<Node>) -> Node {
    let mut external = External::new(TAG_TOKEN, name);
    external.raw_template = raw.to_string();
    external.children = children;
    Node::External(external)
}

fn parse_chunks(chunks: &[&str]) -> Result<Vec<Node>, ParseError> {
    let mut parser = TagsParser::new();
    for chunk in chunks {
        parser.push(chunk)?;
    }
    parser.finish()
}

fn intl(template: &str) -> Intl {
    let options = IntlOptions::builder().plugins(default_plugins()).build();
    build_intl("en", [("m", template)], options).unwrap()
}

/// Wraps children in `[name]…[/name]`.
fn bracket() -> Value {
    Value::function(|props: RenderProps| {
        Output::Text(format!("[{}]{}[/{}]", props.tag, props.children, props.tag))
    })
}

// =============================================================================
// Parsing
// =============================================================================

#[test]
fn test_simple_tag() {
    assert_eq!(
        parse_chunks(&["Hello <b>world</b>!"]).unwrap(),
        vec![
            Node::literal("Hello "),
            tag("b", "<b>", vec![Node::literal("world")]),
            Node::literal("!"),
        ]
    );
}

#[test]
fn test_tag_split_across_chunks() {
    assert_eq!(
        parse_chunks(&["Hello <b>bold ", "text</b> world"]).unwrap(),
        vec![
            Node::literal("Hello "),
            tag("b", "<b>", vec![Node::literal("bold text")]),
            Node::literal(" world"),
        ]
    );
}

#[test]
fn test_tag_token_split_mid_name() {
    assert_eq!(
        parse_chunks(&["<str", "ong>x</stro", "ng>"]).unwrap(),
        vec![tag("strong", "<strong>", vec![Node::literal("x")])]
    );
}

#[test]
fn test_nested_tags() {
    assert_eq!(
        parse_chunks(&["<a><b>deep</b> shallow</a>"]).unwrap(),
        vec![tag(
            "a",
            "<a>",
            vec![
                tag("b", "<b>", vec![Node::literal("deep")]),
                Node::literal(" shallow"),
            ]
        )]
    );
}

#[test]
fn test_self_closing_tag() {
    assert_eq!(
        parse_chunks(&["line<br/>break <strong />"]).unwrap(),
        vec![
            Node::literal("line"),
            tag("br", "<br/>", vec![]),
            Node::literal("break "),
            tag("strong", "<strong />", vec![]),
        ]
    );
}

#[test]
fn test_attributes_are_skipped() {
    assert_eq!(
        parse_chunks(&["<link href=\"x\">go</link>"]).unwrap(),
        vec![tag("link", "<link href=\"x\">", vec![Node::literal("go")])]
    );
}

#[test]
fn test_comparison_is_not_a_tag() {
    assert_eq!(
        parse_chunks(&["1 < 2 and 3 <> 4"]).unwrap(),
        vec![Node::literal("1 < 2 and 3 <> 4")]
    );
}

#[test]
fn test_mismatched_closing_tag() {
    let err = parse_chunks(&["<a><b>x</a></b>"]).unwrap_err();
    assert!(matches!(
        err,
        ParseError::TagMismatch { ref expected, ref found } if expected == "b" && found == "a"
    ));
}

#[test]
fn test_unexpected_closing_tag() {
    assert!(matches!(
        parse_chunks(&["x</b>"]).unwrap_err(),
        ParseError::UnexpectedClosingTag { ref found } if found == "b"
    ));
}

#[test]
fn test_unclosed_tag() {
    assert!(matches!(
        parse_chunks(&["<b>never closed"]).unwrap_err(),
        ParseError::UnclosedTag { ref name } if name == "b"
    ));
}

#[test]
fn test_unfinished_token_is_text() {
    assert_eq!(parse_chunks(&["a <b"]).unwrap(), vec![Node::literal("a <b")]);
}

#[test]
fn test_quoted_tags_stay_literal() {
    let out = intl("Use '<b>' for {what}")
        .format_message_string("m", &values! { "what" => "bold" })
        .unwrap();
    assert_eq!(out, "Use <b> for bold");
}

#[test]
fn test_tag_mismatch_fails_build() {
    let options = IntlOptions::builder().plugins(default_plugins()).build();
    let err = build_intl("en", [("broken", "<a>x</b>")], options).unwrap_err();
    assert_eq!(err.message_id(), Some("broken"));
    assert!(matches!(
        err,
        BuildError::Parse {
            source: ParseError::TagMismatch { .. },
            ..
        }
    ));
}

// =============================================================================
// Rendering
// =============================================================================

#[test]
fn test_tag_wraps_variable() {
    let out = intl("Hello, <strong>{username}</strong>!")
        .format_message_string("m", &values! { "username" => "Ada", "strong" => bracket() })
        .unwrap();
    assert_eq!(out, "Hello, [strong]Ada[/strong]!");
}

#[derive(Debug, PartialEq)]
struct Element {
    tag: String,
    text: String,
}

#[test]
fn test_tag_returning_object_gives_rich_output() {
    let strong = Value::function(|props: RenderProps| {
        Output::from(Object::new(Element {
            tag: props.tag,
            text: props.children.to_string(),
        }))
    });
    let out = intl("Hello, <strong>{username}</strong>!")
        .format_message("m", &values! { "username" => "Ada", "strong" => strong })
        .unwrap();

    let Output::Rich(chunks) = out else {
        panic!("expected rich output, got {out:?}");
    };
    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks[0], Chunk::text("Hello, "));
    let Chunk::Object(element) = &chunks[1] else {
        panic!("expected object chunk");
    };
    assert_eq!(
        element.downcast_ref::<Element>(),
        Some(&Element {
            tag: "strong".to_string(),
            text: "Ada".to_string(),
        })
    );
    assert_eq!(chunks[2], Chunk::text("!"));
}

#[test]
fn test_nested_tags_render_inside_out() {
    let out = intl("<a>x <b>y</b></a>")
        .format_message_string("m", &values! { "a" => bracket(), "b" => bracket() })
        .unwrap();
    assert_eq!(out, "[a]x [b]y[/b][/a]");
}

#[test]
fn test_self_closing_tag_renders_empty_children() {
    let out = intl("a<br/>b")
        .format_message_string("m", &values! { "br" => Value::function(|_| Output::from("\n")) })
        .unwrap();
    assert_eq!(out, "a\nb");
}

#[test]
fn test_select_inside_tag() {
    let template = "<i>{gender, select, female {she} other {they}}</i> wrote";
    let out = intl(template)
        .format_message_string("m", &values! { "gender" => "female", "i" => bracket() })
        .unwrap();
    assert_eq!(out, "[i]she[/i] wrote");
}

#[test]
fn test_tag_inside_plural_branch() {
    let template = "{n, plural, one {<b>#</b> item} other {<b>#</b> items}}";
    let out = intl(template)
        .format_message_string("m", &values! { "n" => 3, "b" => bracket() })
        .unwrap();
    assert_eq!(out, "[b]3[/b] items");
}

#[test]
fn test_missing_tag_callback() {
    let err = intl("<b>x</b>").format_message("m", &values! {}).unwrap_err();
    assert_eq!(
        err,
        FormatError::MissingSerializer {
            plugin: TAG_TOKEN.to_string(),
            variable: "b".to_string(),
        }
    );
}

#[test]
fn test_non_function_tag_value() {
    let err = intl("<b>x</b>")
        .format_message("m", &values! { "b" => "bold" })
        .unwrap_err();
    assert!(matches!(err, FormatError::NotCallable { ref name } if name == "b"));
}

#[test]
fn test_fallback_renderer() {
    let fallback = Callback::new(|props| {
        Output::Text(format!("<{0}>{1}</{0}>", props.tag, props.children))
    });
    let plugin: Arc<dyn Plugin> = Arc::new(TagsPlugin::new().with_fallback(fallback));
    let options = IntlOptions::builder().plugins(vec![plugin]).build();
    let intl = build_intl("en", [("m", "Hi <em>{name}</em>")], options).unwrap();
    let out = intl
        .format_message_string("m", &values! { "name" => "Bo" })
        .unwrap();
    assert_eq!(out, "Hi <em>Bo</em>");
}
