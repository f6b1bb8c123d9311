//! Tests for the `date` and `time` plugins.

use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use nanointl::format::{DateTimeStyle, HourCycle, MonthWidth, NumericWidth, TextWidth};
use nanointl::plugins::{default_plugins, parse_datetime_skeleton};
use nanointl::{FormatError, Intl, IntlOptions, Value, build_intl, values};

/// The epoch, seen from a GMT+1 zone.
fn epoch() -> DateTime<FixedOffset> {
    let zone = FixedOffset::east_opt(3600).unwrap();
    zone.timestamp_opt(0, 0).unwrap()
}

fn intl(template: &str) -> Intl {
    let options = IntlOptions::builder().plugins(default_plugins()).build();
    build_intl("en", [("m", template)], options).unwrap()
}

fn render_date(template: &str, date: DateTime<FixedOffset>) -> String {
    intl(template)
        .format_message_string("m", &values! { "d" => date })
        .unwrap()
}

// =============================================================================
// Skeleton parsing
// =============================================================================

#[test]
fn test_style_keywords() {
    for (keyword, style) in [
        ("short", DateTimeStyle::Short),
        ("medium", DateTimeStyle::Medium),
        ("long", DateTimeStyle::Long),
        ("full", DateTimeStyle::Full),
    ] {
        let params = parse_datetime_skeleton(keyword, "d", None).unwrap();
        assert_eq!(params.options.date_style, Some(style), "{keyword}");
    }
}

#[test]
fn test_unknown_style_keyword_is_medium() {
    let params = parse_datetime_skeleton("fancy", "d", None).unwrap();
    assert_eq!(params.options.date_style, Some(DateTimeStyle::Medium));
}

#[test]
fn test_skeleton_fields() {
    let options = parse_datetime_skeleton("::EEEyyMMMMdd", "d", None)
        .unwrap()
        .options;
    assert_eq!(options.weekday, Some(TextWidth::Long));
    assert_eq!(options.year, Some(NumericWidth::TwoDigit));
    assert_eq!(options.month, Some(MonthWidth::Long));
    assert_eq!(options.day, Some(NumericWidth::TwoDigit));
}

#[test]
fn test_skeleton_hour_cycles() {
    let options = parse_datetime_skeleton("::Hmm", "d", None).unwrap().options;
    assert_eq!(options.hour_cycle, Some(HourCycle::H23));
    let options = parse_datetime_skeleton("::Kmm", "d", None).unwrap().options;
    assert_eq!(options.hour_cycle, Some(HourCycle::H11));
}

#[test]
fn test_skeleton_ignores_unmapped_letters_and_widths() {
    let options = parse_datetime_skeleton("::EEEEyQQQ", "d", None).unwrap().options;
    assert_eq!(options.weekday, None);
    assert_eq!(options.year, Some(NumericWidth::Numeric));
    assert!(parse_datetime_skeleton("::MMMMMM", "d", None).is_ok());
}

// =============================================================================
// Rendering
// =============================================================================

#[test]
fn test_date_default_is_numeric() {
    assert_eq!(render_date("{d, date}", epoch()), "1/1/1970");
}

#[test]
fn test_time_default_is_medium() {
    assert_eq!(render_date("{d, time}", epoch()), "1:00:00 AM");
}

#[test]
fn test_date_styles() {
    assert_eq!(render_date("{d, date, short}", epoch()), "1/1/70, 1:00 AM");
    assert_eq!(render_date("{d, date, medium}", epoch()), "Jan 1, 1970, 1:00:00 AM");
    assert_eq!(
        render_date("{d, date, long}", epoch()),
        "January 1, 1970 at 1:00:00 AM GMT+1"
    );
}

#[test]
fn test_date_skeletons() {
    assert_eq!(render_date("{d, date, ::yyyyMMMd}", epoch()), "Jan 1, 1970");
    assert_eq!(render_date("{d, date, ::G}", epoch()), "1/1/1970 A");
    assert_eq!(render_date("{d, date, ::GG}", epoch()), "1/1/1970 AD");
    assert_eq!(render_date("{d, date, ::MMMMM}", epoch()), "J");
    assert_eq!(render_date("{d, date, ::E}", epoch()), "T");
    assert_eq!(render_date("{d, date, ::yMd z}", epoch()), "1/1/1970, GMT+1");
}

#[test]
fn test_time_skeletons() {
    let afternoon = epoch() + Duration::hours(15);
    assert_eq!(render_date("{d, time, ::h}", afternoon), "4 PM");
    assert_eq!(render_date("{d, time, ::jj}", afternoon), "04 PM");
    assert_eq!(render_date("{d, time, ::H}", afternoon), "16");
    assert_eq!(render_date("{d, time, ::mm}", epoch()), "0");
    assert_eq!(render_date("{d, time, ::Hmm}", epoch()), "01:00");
}

#[test]
fn test_common_cldr_skeletons_build() {
    assert_eq!(render_date("{d, date, ::EEEE, MMMM d}", epoch()), "January 1");
    assert_eq!(render_date("{d, time, ::h:mm a}", epoch()), "1:00 AM");
    assert_eq!(render_date("{d, date, ::yyyyQQQ}", epoch()), "1970");
}

#[test]
fn test_epoch_milliseconds_are_utc() {
    let out = intl("{d, date, ::yMd}")
        .format_message_string("m", &values! { "d" => 86_400_000 })
        .unwrap();
    assert_eq!(out, "1/2/1970");
}

#[test]
fn test_date_strings() {
    let intl = intl("{d, date, ::yyyyMMMd}");
    let format = |value: &str| intl.format_message_string("m", &values! { "d" => value });
    assert_eq!(format("2024-03-05").unwrap(), "Mar 5, 2024");
    assert_eq!(format("2024-03-05T10:00:00+02:00").unwrap(), "Mar 5, 2024");
    assert!(matches!(
        format("yesterday"),
        Err(FormatError::InvalidDate { ref name, .. }) if name == "d"
    ));
}

#[test]
fn test_utc_dates_convert() {
    let date = Utc.with_ymd_and_hms(2001, 9, 9, 1, 46, 40).unwrap();
    let out = intl("{d, date, ::yMMMd}")
        .format_message_string("m", &values! { "d" => date })
        .unwrap();
    assert_eq!(out, "Sep 9, 2001");
}

#[test]
fn test_non_date_value() {
    let err = intl("{d, date}")
        .format_message("m", &values! { "d" => Value::Bool(true) })
        .unwrap_err();
    assert!(matches!(err, FormatError::InvalidDate { .. }));
}
