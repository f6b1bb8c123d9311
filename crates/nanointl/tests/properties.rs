//! Property tests for parsing and formatting.

use nanointl::{IntlOptions, Values, build_intl, values};
use proptest::prelude::*;

fn render(template: &str, values: Values) -> String {
    build_intl("en", [("m", template)], IntlOptions::default())
        .unwrap()
        .format_message_string("m", &values)
        .unwrap()
}

proptest! {
    #[test]
    fn test_brace_free_text_renders_verbatim(text in "[^{]{0,64}") {
        prop_assert_eq!(render(&text, values! {}), text);
    }

    #[test]
    fn test_interpolation_inserts_value_verbatim(value in ".{0,32}") {
        let out = render("<{value}>", values! { "value" => value.as_str() });
        prop_assert_eq!(out, format!("<{value}>"));
    }

    #[test]
    fn test_english_plural_is_one_only_for_one(n in 0_i64..100_000) {
        let out = render("{n, plural, one {one} other {other}}", values! { "n" => n });
        prop_assert_eq!(out, if n == 1 { "one" } else { "other" });
    }

    #[test]
    fn test_cached_output_matches_fresh_output(name in "[a-z]{1,8}", count in 0_i64..50) {
        let template = "{name} has {count, plural, =0 {nothing} one {# item} other {# items}}";
        let cached = build_intl("en", [("m", template)], IntlOptions::default()).unwrap();
        let fresh = build_intl(
            "en",
            [("m", template)],
            IntlOptions::builder().disable_cache(true).build(),
        )
        .unwrap();
        let values = values! { "name" => name.as_str(), "count" => count };
        let first = cached.format_message("m", &values).unwrap();
        let second = cached.format_message("m", &values).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first, fresh.format_message("m", &values).unwrap());
    }
}
