//! Tests for rendering messages through `Intl::format_message`.

use insta::assert_snapshot;
use nanointl::parser::Category;
use nanointl::types::Object;
use nanointl::{
    Catalog, Chunk, FormatError, Intl, IntlOptions, Output, Value, Values, build_intl, values,
};

fn intl(locale: &str, messages: &[(&str, &str)]) -> Intl {
    build_intl(
        locale,
        messages.iter().copied().collect::<Catalog>(),
        IntlOptions::default(),
    )
    .unwrap()
}

fn render(template: &str, values: Values) -> String {
    intl("en", &[("m", template)])
        .format_message_string("m", &values)
        .unwrap()
}

fn render_err(template: &str, values: Values) -> FormatError {
    intl("en", &[("m", template)])
        .format_message("m", &values)
        .unwrap_err()
}

// =============================================================================
// Literals and variables
// =============================================================================

#[test]
fn test_literal_message() {
    assert_snapshot!(render("Hello, world!", values! {}), @"Hello, world!");
}

#[test]
fn test_escaped_text_renders_plainly() {
    assert_snapshot!(render("Oh, hi '{name}!", values! {}), @"Oh, hi {name}!");
    assert_snapshot!(render("This '{isn''t}' obvious.", values! {}), @"This {isn't} obvious.");
}

#[test]
fn test_variables() {
    assert_snapshot!(
        render("{greeting}, {name}!", values! { "greeting" => "Hi", "name" => "Ada" }),
        @"Hi, Ada!"
    );
}

#[test]
fn test_variable_value_types() {
    let values = values! { "i" => 42, "f" => 1.5, "t" => true, "s" => "str" };
    assert_eq!(render("{i} {f} {t} {s}", values), "42 1.5 true str");
}

#[test]
fn test_suppressed_values_render_nothing() {
    let values = values! { "a" => Value::Null, "b" => false };
    assert_eq!(render("[{a}][{b}]", values), "[][]");
}

#[test]
fn test_missing_variable_names_template() {
    let err = render_err("Hello, {name}!", values! {});
    assert_eq!(
        err,
        FormatError::MissingVariable {
            name: "name".to_string(),
            template: "Hello, {name}!".to_string(),
        }
    );
    assert!(err.to_string().contains("Hello, {name}!"));
}

#[test]
fn test_function_value_is_not_renderable() {
    let values = values! { "f" => Value::function(|_| Output::empty()) };
    assert!(matches!(
        render_err("{f}", values),
        FormatError::NotRenderable { ref name } if name == "f"
    ));
}

// =============================================================================
// Plural
// =============================================================================

const BOOKS: &str = "I have {count, plural, =0 {no books} one {one book} other {# books}}";

#[test]
fn test_plural_exact_match() {
    assert_eq!(render(BOOKS, values! { "count" => 0 }), "I have no books");
}

#[test]
fn test_plural_one() {
    assert_eq!(render(BOOKS, values! { "count" => 1 }), "I have one book");
}

#[test]
fn test_plural_other_with_hash() {
    assert_eq!(render(BOOKS, values! { "count" => 10 }), "I have 10 books");
}

#[test]
fn test_plural_hash_uses_grouping() {
    assert_eq!(render(BOOKS, values! { "count" => 1200 }), "I have 1,200 books");
}

#[test]
fn test_plural_numeric_string() {
    assert_eq!(render(BOOKS, values! { "count" => "3" }), "I have 3 books");
}

#[test]
fn test_plural_fractional_value() {
    let template = "{n, plural, one {# item} other {# items}}";
    assert_eq!(render(template, values! { "n" => 1.5 }), "1.5 items");
    assert_eq!(render(template, values! { "n" => 1.0 }), "1 item");
    assert_eq!(render(template, values! { "n" => 0.25 }), "0.25 items");
}

#[test]
fn test_plural_fractional_value_french() {
    let intl = intl("fr", &[("m", "{n, plural, one {# article} other {# articles}}")]);
    let format = |n: f64| intl.format_message_string("m", &values! { "n" => n }).unwrap();
    assert_eq!(format(1.5), "1,5 article");
    assert_eq!(format(2.5), "2,5 articles");
}

#[test]
fn test_plural_offset() {
    let template = "{num, plural, offset:1 =-1{negative one} one{one} other{other}}";
    assert_eq!(render(template, values! { "num" => 2 }), "one");
    assert_eq!(render(template, values! { "num" => -1 }), "negative one");
    assert_eq!(render(template, values! { "num" => 5 }), "other");
}

#[test]
fn test_plural_offset_applies_to_hash() {
    let template = "{guests, plural, offset:1 =0 {nobody} =1 {just you} other {you and # others}}";
    assert_eq!(render(template, values! { "guests" => 4 }), "you and 3 others");
}

#[test]
fn test_plural_falls_back_to_other() {
    let template = "{n, plural, =1 {single} other {many}}";
    assert_eq!(render(template, values! { "n" => 1 }), "single");
    assert_eq!(render(template, values! { "n" => 7 }), "many");
}

#[test]
fn test_plural_without_matching_branch() {
    let err = render_err("{n, plural, one {one}}", values! { "n" => 5 });
    assert_eq!(
        err,
        FormatError::MissingBranch {
            variable: "n".to_string(),
            category: Category::Other,
        }
    );
}

#[test]
fn test_plural_requires_number() {
    let err = render_err(BOOKS, values! { "count" => "many" });
    assert!(matches!(err, FormatError::NotANumber { ref name, .. } if name == "count"));
}

#[test]
fn test_russian_plural_categories() {
    let intl = intl(
        "ru",
        &[("apples", "{n, plural, one {# яблоко} few {# яблока} many {# яблок} other {# яблока}}")],
    );
    let format = |n: i64| intl.format_message_string("apples", &values! { "n" => n }).unwrap();
    assert_eq!(format(1), "1 яблоко");
    assert_eq!(format(3), "3 яблока");
    assert_eq!(format(5), "5 яблок");
    assert_eq!(format(21), "21 яблоко");
}

#[test]
fn test_selectordinal() {
    let template = "{n, selectordinal, one {#st} two {#nd} few {#rd} other {#th}}";
    assert_eq!(render(template, values! { "n" => 1 }), "1st");
    assert_eq!(render(template, values! { "n" => 2 }), "2nd");
    assert_eq!(render(template, values! { "n" => 3 }), "3rd");
    assert_eq!(render(template, values! { "n" => 4 }), "4th");
    assert_eq!(render(template, values! { "n" => 11 }), "11th");
    assert_eq!(render(template, values! { "n" => 22 }), "22nd");
}

// =============================================================================
// Select
// =============================================================================

const PRONOUN: &str = "{gender, select, female {She} male {He} other {They}} replied.";

#[test]
fn test_select_branch() {
    assert_eq!(render(PRONOUN, values! { "gender" => "female" }), "She replied.");
    assert_eq!(render(PRONOUN, values! { "gender" => "male" }), "He replied.");
}

#[test]
fn test_select_falls_back_to_other() {
    assert_eq!(render(PRONOUN, values! { "gender" => "unknown" }), "They replied.");
}

#[test]
fn test_select_without_other_renders_key() {
    let template = "{kind, select, a {Alpha} b {Beta}}";
    assert_eq!(render(template, values! { "kind" => "c" }), "c");
}

#[test]
fn test_select_on_boolean() {
    let template = "{flag, select, true {on} false {off} other {?}}";
    assert_eq!(render(template, values! { "flag" => true }), "on");
    assert_eq!(render(template, values! { "flag" => false }), "off");
}

#[test]
fn test_select_missing_value() {
    assert!(matches!(
        render_err(PRONOUN, values! {}),
        FormatError::MissingVariable { ref name, .. } if name == "gender"
    ));
}

#[test]
fn test_nested_select_and_plural() {
    let template = "{gender, select, female {She has {n, plural, one {# apple} other {# apples}}} other {They have {n, plural, one {# apple} other {# apples}}}}";
    assert_snapshot!(
        render(template, values! { "gender" => "female", "n" => 10 }),
        @"She has 10 apples"
    );
    assert_snapshot!(
        render(template, values! { "gender" => "x", "n" => 1 }),
        @"They have 1 apple"
    );
}

// =============================================================================
// Rich output
// =============================================================================

#[derive(Debug, PartialEq)]
struct Badge(&'static str);

#[test]
fn test_object_value_produces_rich_output() {
    let badge = Object::new(Badge("gold"));
    let values = values! { "badge" => badge.clone() };
    let out = intl("en", &[("m", "Rank: {badge}!")])
        .format_message("m", &values)
        .unwrap();
    assert_eq!(
        out,
        Output::Rich(vec![
            Chunk::text("Rank: "),
            Chunk::Object(badge),
            Chunk::text("!"),
        ])
    );
}

#[test]
fn test_text_output_stays_text() {
    let out = intl("en", &[("m", "{a} and {b}")])
        .format_message("m", &values! { "a" => 1, "b" => 2 })
        .unwrap();
    assert_eq!(out, Output::Text("1 and 2".to_string()));
}

// =============================================================================
// External fallbacks without plugins
// =============================================================================

#[test]
fn test_number_without_options_needs_no_plugin() {
    assert_eq!(render("{n, number}", values! { "n" => 1234.5 }), "1,234.5");
}

#[test]
fn test_date_without_plugin_is_an_error() {
    let err = render_err("{d, date}", values! { "d" => 0 });
    assert_eq!(
        err,
        FormatError::MissingSerializer {
            plugin: "date".to_string(),
            variable: "d".to_string(),
        }
    );
}
