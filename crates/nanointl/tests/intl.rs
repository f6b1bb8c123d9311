//! Tests for building an `Intl` and looking up its messages.

use std::sync::Arc;
use std::thread;

use nanointl::parser::{Node, ParseError};
use nanointl::plugins::{Plugin, PluginError, PluginRegistry, default_plugins};
use nanointl::{BuildError, Intl, IntlOptions, Output, build_intl, values};

fn assert_send_sync<T: Send + Sync>() {}

// =============================================================================
// Building
// =============================================================================

#[test]
fn test_intl_is_send_and_sync() {
    assert_send_sync::<Intl>();
    assert_send_sync::<IntlOptions>();
}

#[test]
fn test_invalid_locale() {
    let err = build_intl("not a locale!!", [("m", "x")], IntlOptions::default()).unwrap_err();
    assert!(matches!(err, BuildError::InvalidLocale(ref locale) if locale.tag == "not a locale!!"));
    assert_eq!(err.message_id(), None);
}

#[test]
fn test_parse_error_names_message() {
    let err = build_intl(
        "en",
        [("fine", "ok {x}"), ("broken", "oops {x")],
        IntlOptions::default(),
    )
    .unwrap_err();
    assert_eq!(err.message_id(), Some("broken"));
    assert!(matches!(
        err,
        BuildError::Parse {
            source: ParseError::UnterminatedBrace { .. },
            ..
        }
    ));
    assert!(err.to_string().starts_with("message 'broken'"));
}

struct Failing;

impl Plugin for Failing {
    fn name(&self) -> &str {
        "failing"
    }

    fn init(&self, _registry: &mut PluginRegistry) -> Result<(), PluginError> {
        Err(PluginError::new("no backend"))
    }
}

#[test]
fn test_plugin_init_failure() {
    let plugin: Arc<dyn Plugin> = Arc::new(Failing);
    let options = IntlOptions::builder().plugins(vec![plugin]).build();
    let err = build_intl("en", [("m", "x")], options).unwrap_err();
    assert!(matches!(err, BuildError::Plugin { ref plugin, .. } if plugin == "failing"));
}

#[test]
fn test_builder_matches_build_intl() {
    let intl = Intl::builder()
        .locale("en-US")
        .messages([("greeting", "Hello, {name}!")])
        .plugins(default_plugins())
        .build()
        .unwrap();
    assert_eq!(intl.locale().tag(), "en-US");
    assert_eq!(intl.locale().language(), "en");
    assert_eq!(intl.locale().region(), Some("US"));
    assert_eq!(
        intl.format_message_string("greeting", &values! { "name" => "Ada" })
            .unwrap(),
        "Hello, Ada!"
    );
}

// =============================================================================
// Lookup
// =============================================================================

#[test]
fn test_unknown_id_formats_to_itself() {
    let intl = build_intl("en", [("known", "x")], IntlOptions::default()).unwrap();
    let out = intl.format_message("missing.key", &values! {}).unwrap();
    assert_eq!(out, Output::Text("missing.key".to_string()));
}

#[test]
fn test_message_ids_keep_catalog_order() {
    let intl = build_intl(
        "en",
        [("zeta", "z"), ("alpha", "a"), ("mid", "m")],
        IntlOptions::default(),
    )
    .unwrap();
    assert_eq!(intl.message_ids().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
}

#[test]
fn test_ast_and_template() {
    let intl = build_intl("en", [("m", "Hi {name}")], IntlOptions::default()).unwrap();
    assert_eq!(intl.template("m"), Some("Hi {name}"));
    assert_eq!(
        intl.ast("m"),
        Some([Node::literal("Hi "), Node::variable("name")].as_slice())
    );
    assert_eq!(intl.ast("nope"), None);
}

#[test]
fn test_registry_reflects_plugins() {
    let plain = build_intl("en", [("m", "x")], IntlOptions::default()).unwrap();
    assert!(!plain.registry().has_parser("number"));

    let options = IntlOptions::builder().plugins(default_plugins()).build();
    let full = build_intl("en", [("m", "x")], options).unwrap();
    assert!(full.registry().has_parser("number"));
    assert!(full.registry().has_parser("date"));
}

#[test]
fn test_shared_across_threads() {
    let options = IntlOptions::builder().plugins(default_plugins()).build();
    let intl = Arc::new(
        build_intl("en", [("m", "{n, plural, one {# item} other {# items}}")], options).unwrap(),
    );
    let handles: Vec<_> = (0..4_i64)
        .map(|n| {
            let intl = Arc::clone(&intl);
            thread::spawn(move || intl.format_message_string("m", &values! { "n" => n }))
        })
        .collect();
    let outputs: Vec<String> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap().unwrap())
        .collect();
    assert_eq!(outputs, vec!["0 items", "1 item", "2 items", "3 items"]);
}
