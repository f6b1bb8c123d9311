//! The `date` and `time` plugins: ICU date skeletons and style keywords.
//!
//! `{d, date, ::yyyyMMMd}` picks fields by letter, with the repeat count
//! selecting the width. `{d, time, short}` selects a style preset for both
//! the date and the time part. Without an options part `date` renders a
//! numeric date and `time` the medium time style.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde_json::Value as JsonValue;
use tracing::trace;
use winnow::combinator::repeat;
use winnow::prelude::*;
use winnow::token::{any, take_while};

use super::{Plugin, PluginError, PluginRegistry, SkeletonError};
use crate::format::{
    DateTimeOptions, DateTimeStyle, HourCycle, MonthWidth, NumericWidth, TextWidth, TimeZoneName,
};
use crate::serializer::{FormatError, SerializeCall};
use crate::types::{Output, PluginParams, Value};

/// Parsed options of a `date` or `time` argument.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DateTimeParams {
    pub options: DateTimeOptions,
}

/// Parse the options part of a `date` or `time` argument.
///
/// # Examples
///
/// ```
/// use nanointl::format::{DateTimeStyle, MonthWidth};
/// use nanointl::plugins::parse_datetime_skeleton;
///
/// let params = parse_datetime_skeleton("::yyyyMMMd", "day", None).unwrap();
/// assert_eq!(params.options.month, Some(MonthWidth::Short));
///
/// let params = parse_datetime_skeleton("long", "day", None).unwrap();
/// assert_eq!(params.options.date_style, Some(DateTimeStyle::Long));
/// assert_eq!(params.options.time_style, Some(DateTimeStyle::Long));
/// ```
pub fn parse_datetime_skeleton(
    raw: &str,
    variable: &str,
    verbose: Option<&JsonValue>,
) -> Result<DateTimeParams, SkeletonError> {
    let trimmed = raw.trim();
    if trimmed == "verbose" {
        let options = match verbose {
            Some(json) => serde_json::from_value(json.clone())
                .map_err(|source| SkeletonError::Verbose { source })?,
            None => DateTimeOptions::default(),
        };
        return Ok(DateTimeParams { options });
    }
    let Some(skeleton) = trimmed.strip_prefix("::") else {
        let style = DateTimeStyle::from_keyword(trimmed).unwrap_or(DateTimeStyle::Medium);
        return Ok(DateTimeParams {
            options: DateTimeOptions::styled(style),
        });
    };

    let skeleton = skeleton.trim();
    let runs = field_runs
        .parse(skeleton)
        .map_err(|error| SkeletonError::Malformed {
            skeleton: skeleton.to_string(),
            offset: error.offset(),
        })?;
    let mut options = DateTimeOptions::default();
    for run in runs {
        apply_run(run, &mut options);
    }
    trace!(variable, skeleton, ?options, "parsed date skeleton");
    Ok(DateTimeParams { options })
}

/// Runs of one repeated character: `yyyyMMMd` → `yyyy`, `MMM`, `d`.
fn field_runs<'s>(input: &mut &'s str) -> ModalResult<Vec<&'s str>> {
    repeat(0.., field_run).parse_next(input)
}

fn field_run<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    let start = *input;
    let first = any.parse_next(input)?;
    let rest = take_while(0.., |c: char| c == first).parse_next(input)?;
    Ok(&start[..first.len_utf8() + rest.len()])
}

/// Set the field a run of letters stands for.
///
/// Letters without a field (`a`, `Q`, `w`, …) and widths past a field's
/// table leave the options untouched.
fn apply_run(run: &str, options: &mut DateTimeOptions) {
    let Some(symbol) = run.chars().next() else {
        return;
    };
    let width = run.chars().count();
    match symbol {
        'G' => options.era = text_width(width),
        'y' => {
            options.year = match width {
                2 => Some(NumericWidth::TwoDigit),
                1 | 3 | 4 => Some(NumericWidth::Numeric),
                _ => None,
            };
        }
        'M' => {
            options.month = match width {
                1 => Some(MonthWidth::Numeric),
                2 => Some(MonthWidth::TwoDigit),
                3 => Some(MonthWidth::Short),
                4 => Some(MonthWidth::Long),
                5 => Some(MonthWidth::Narrow),
                _ => None,
            };
        }
        'd' => options.day = numeric_width(width),
        'E' => options.weekday = text_width(width),
        'j' | 'h' | 'H' | 'k' | 'K' => {
            options.hour = numeric_width(width);
            options.hour_cycle = match symbol {
                'h' => Some(HourCycle::H12),
                'H' => Some(HourCycle::H23),
                'k' => Some(HourCycle::H24),
                'K' => Some(HourCycle::H11),
                _ => None,
            };
        }
        'm' => options.minute = numeric_width(width),
        's' => options.second = numeric_width(width),
        'z' => {
            options.time_zone_name = match width {
                1 => Some(TimeZoneName::Short),
                2 => Some(TimeZoneName::ShortGeneric),
                3 => Some(TimeZoneName::Long),
                4 => Some(TimeZoneName::LongGeneric),
                _ => None,
            };
        }
        _ => trace!(run, "date skeleton run has no field"),
    }
}

fn text_width(width: usize) -> Option<TextWidth> {
    match width {
        1 => Some(TextWidth::Narrow),
        2 => Some(TextWidth::Short),
        3 => Some(TextWidth::Long),
        _ => None,
    }
}

fn numeric_width(width: usize) -> Option<NumericWidth> {
    match width {
        1 => Some(NumericWidth::Numeric),
        2 => Some(NumericWidth::TwoDigit),
        _ => None,
    }
}

/// Dates, epoch milliseconds and RFC 3339 or `YYYY-MM-DD` strings.
fn normalize_date(call: &SerializeCall<'_>) -> Result<DateTime<FixedOffset>, FormatError> {
    let value = call.required_value()?;
    let date = match value {
        Value::Date(date) => Some(*date),
        Value::Int(millis) => DateTime::from_timestamp_millis(*millis).map(|date| date.fixed_offset()),
        Value::Float(millis) if millis.is_finite() => {
            DateTime::from_timestamp_millis(*millis as i64).map(|date| date.fixed_offset())
        }
        Value::String(text) => DateTime::parse_from_rfc3339(text.trim()).ok().or_else(|| {
            NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
                .ok()
                .and_then(|day| day.and_hms_opt(0, 0, 0))
                .map(|midnight| midnight.and_utc().fixed_offset())
        }),
        _ => None,
    };
    date.ok_or_else(|| FormatError::InvalidDate {
        name: call.node.variable.clone(),
        value: value.to_string(),
    })
}

fn serialize_with_default(
    call: &SerializeCall<'_>,
    default: DateTimeOptions,
) -> Result<Output, FormatError> {
    let date = normalize_date(call)?;
    let options = match call.params {
        None => default,
        Some(params) => {
            if let Some(params) = params.downcast_ref::<DateTimeParams>() {
                params.options.clone()
            } else if let Some(json) = params.downcast_ref::<JsonValue>() {
                serde_json::from_value(json.clone()).map_err(|_| FormatError::InvalidParams {
                    plugin: call.node.plugin.clone(),
                })?
            } else {
                return Err(FormatError::InvalidParams {
                    plugin: call.node.plugin.clone(),
                });
            }
        }
    };
    Ok(Output::Text(call.locale.date_time_formatter(options).format(&date)))
}

/// Registers the `date` and `time` parsers and serializers.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateTimePlugin;

impl Plugin for DateTimePlugin {
    fn name(&self) -> &str {
        "date-time-plugin"
    }

    fn init(&self, registry: &mut PluginRegistry) -> Result<(), PluginError> {
        for token in ["date", "time"] {
            registry.add_parser(token, |raw, variable, verbose| {
                parse_datetime_skeleton(raw, variable, verbose).map(PluginParams::new)
            });
        }
        registry.add_serializer("date", |call| {
            serialize_with_default(call, DateTimeOptions::numeric_date())
        });
        registry.add_serializer("time", |call| {
            serialize_with_default(call, DateTimeOptions::medium_time())
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_group_repeated_letters() {
        let mut input = "yyyyMMMd, HH:mm";
        assert_eq!(
            field_runs(&mut input).unwrap(),
            vec!["yyyy", "MMM", "d", ",", " ", "HH", ":", "mm"]
        );
    }

    #[test]
    fn hour_letters_set_cycle() {
        let options = parse_datetime_skeleton("::hh", "t", None).unwrap().options;
        assert_eq!(options.hour, Some(NumericWidth::TwoDigit));
        assert_eq!(options.hour_cycle, Some(HourCycle::H12));
        let options = parse_datetime_skeleton("::k", "t", None).unwrap().options;
        assert_eq!(options.hour_cycle, Some(HourCycle::H24));
        let options = parse_datetime_skeleton("::j", "t", None).unwrap().options;
        assert_eq!(options.hour_cycle, None);
    }

    #[test]
    fn unknown_style_keyword_is_medium() {
        let options = parse_datetime_skeleton("fancy", "t", None).unwrap().options;
        assert_eq!(options, DateTimeOptions::styled(DateTimeStyle::Medium));
    }

    #[test]
    fn letters_without_a_field_are_skipped() {
        let options = parse_datetime_skeleton("::h:mm a", "t", None).unwrap().options;
        assert_eq!(options.hour, Some(NumericWidth::Numeric));
        assert_eq!(options.minute, Some(NumericWidth::TwoDigit));

        let options = parse_datetime_skeleton("::yyyyQQQ", "t", None).unwrap().options;
        assert_eq!(
            options,
            DateTimeOptions {
                year: Some(NumericWidth::Numeric),
                ..DateTimeOptions::default()
            }
        );
    }

    #[test]
    fn widths_past_the_table_leave_the_field_unset() {
        let options = parse_datetime_skeleton("::EEEE, MMMM d", "t", None).unwrap().options;
        assert_eq!(options.weekday, None);
        assert_eq!(options.month, Some(MonthWidth::Long));
        assert_eq!(options.day, Some(NumericWidth::Numeric));

        let options = parse_datetime_skeleton("::MMMMMM", "t", None).unwrap().options;
        assert_eq!(options, DateTimeOptions::default());
    }
}
