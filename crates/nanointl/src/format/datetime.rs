//! Locale-aware date and time formatting.
//!
//! Field names, widths and style presets follow the option set date
//! skeletons compile to. Month, weekday, era and day period names are
//! English; field order, separators and the default hour cycle follow the
//! locale.

use chrono::{DateTime, Datelike, FixedOffset, Timelike, Weekday};
use serde::Deserialize;

use crate::locale::LocaleContext;

/// Date or time style preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DateTimeStyle {
    /// e.g. "Thursday, January 1, 1970"
    Full,
    /// e.g. "January 1, 1970"
    Long,
    /// e.g. "Jan 1, 1970"
    Medium,
    /// e.g. "1/1/70"
    Short,
}

impl DateTimeStyle {
    /// Parse a style keyword; unrecognized keywords are `None`.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_lowercase().as_str() {
            "full" => Some(DateTimeStyle::Full),
            "long" => Some(DateTimeStyle::Long),
            "medium" => Some(DateTimeStyle::Medium),
            "short" => Some(DateTimeStyle::Short),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextWidth {
    Narrow,
    Short,
    Long,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NumericWidth {
    Numeric,
    #[serde(rename = "2-digit")]
    TwoDigit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MonthWidth {
    Numeric,
    #[serde(rename = "2-digit")]
    TwoDigit,
    Short,
    Long,
    Narrow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HourCycle {
    /// 0–11
    H11,
    /// 1–12
    H12,
    /// 0–23
    H23,
    /// 1–24
    H24,
}

impl HourCycle {
    fn is_twelve_hour(self) -> bool {
        matches!(self, HourCycle::H11 | HourCycle::H12)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimeZoneName {
    Short,
    ShortGeneric,
    Long,
    LongGeneric,
}

/// Options for [`DateTimeFormatter`].
///
/// Either style presets or individual fields are used; when a style is set
/// the fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DateTimeOptions {
    pub date_style: Option<DateTimeStyle>,
    pub time_style: Option<DateTimeStyle>,
    pub era: Option<TextWidth>,
    pub year: Option<NumericWidth>,
    pub month: Option<MonthWidth>,
    pub day: Option<NumericWidth>,
    pub weekday: Option<TextWidth>,
    pub hour: Option<NumericWidth>,
    pub minute: Option<NumericWidth>,
    pub second: Option<NumericWidth>,
    /// `Some(true)` forces a 12-hour clock, `Some(false)` a 24-hour clock.
    pub hour12: Option<bool>,
    pub hour_cycle: Option<HourCycle>,
    pub time_zone_name: Option<TimeZoneName>,
}

impl DateTimeOptions {
    /// Numeric year, month and day.
    pub fn numeric_date() -> Self {
        Self {
            year: Some(NumericWidth::Numeric),
            month: Some(MonthWidth::Numeric),
            day: Some(NumericWidth::Numeric),
            ..Self::default()
        }
    }

    /// The medium time style.
    pub fn medium_time() -> Self {
        Self {
            time_style: Some(DateTimeStyle::Medium),
            ..Self::default()
        }
    }

    /// The same style for both date and time.
    pub fn styled(style: DateTimeStyle) -> Self {
        Self {
            date_style: Some(style),
            time_style: Some(style),
            ..Self::default()
        }
    }

    fn has_date_fields(&self) -> bool {
        self.year.is_some() || self.month.is_some() || self.day.is_some() || self.weekday.is_some()
    }

    fn has_time_fields(&self) -> bool {
        self.hour.is_some() || self.minute.is_some() || self.second.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateOrder {
    MonthDayYear,
    DayMonthYear,
    YearMonthDay,
}

/// Formats dates for one locale with fixed options.
///
/// # Example
///
/// ```
/// use chrono::DateTime;
/// use nanointl::LocaleContext;
/// use nanointl::format::{DateTimeOptions, DateTimeStyle};
///
/// let en = LocaleContext::new("en").unwrap();
/// let date = DateTime::parse_from_rfc3339("1970-01-01T01:00:00+01:00").unwrap();
/// let formatter = en.date_time_formatter(DateTimeOptions::styled(DateTimeStyle::Medium));
/// assert_eq!(formatter.format(&date), "Jan 1, 1970, 1:00:00 AM");
/// ```
#[derive(Debug, Clone)]
pub struct DateTimeFormatter<'a> {
    locale: &'a LocaleContext,
    options: DateTimeOptions,
}

impl<'a> DateTimeFormatter<'a> {
    pub fn new(locale: &'a LocaleContext, options: DateTimeOptions) -> Self {
        Self { locale, options }
    }

    pub fn format(&self, date: &DateTime<FixedOffset>) -> String {
        if self.options.date_style.is_some() || self.options.time_style.is_some() {
            self.format_styles(date)
        } else {
            self.format_fields(date, &self.options)
        }
    }

    fn is_english(&self) -> bool {
        self.locale.language() == "en"
    }

    fn format_styles(&self, date: &DateTime<FixedOffset>) -> String {
        let date_text = self
            .options
            .date_style
            .map(|style| self.date_style_text(date, style));
        let time_text = self
            .options
            .time_style
            .map(|style| self.time_style_text(date, style));
        match (date_text, time_text) {
            (Some(date_text), Some(time_text)) => {
                let verbose = matches!(
                    self.options.date_style,
                    Some(DateTimeStyle::Long | DateTimeStyle::Full)
                );
                if verbose && self.is_english() {
                    format!("{date_text} at {time_text}")
                } else {
                    format!("{date_text}, {time_text}")
                }
            }
            (Some(text), None) | (None, Some(text)) => text,
            (None, None) => String::new(),
        }
    }

    fn date_style_text(&self, date: &DateTime<FixedOffset>, style: DateTimeStyle) -> String {
        let fields = match style {
            DateTimeStyle::Short => return self.short_date(date),
            DateTimeStyle::Medium => DateTimeOptions {
                month: Some(MonthWidth::Short),
                ..DateTimeOptions::numeric_date()
            },
            DateTimeStyle::Long => DateTimeOptions {
                month: Some(MonthWidth::Long),
                ..DateTimeOptions::numeric_date()
            },
            DateTimeStyle::Full => DateTimeOptions {
                month: Some(MonthWidth::Long),
                weekday: Some(TextWidth::Long),
                ..DateTimeOptions::numeric_date()
            },
        };
        self.date_fields(date, &fields).unwrap_or_default()
    }

    fn short_date(&self, date: &DateTime<FixedOffset>) -> String {
        let year = date.year();
        match self.date_order() {
            DateOrder::MonthDayYear => format!(
                "{}/{}/{:02}",
                date.month(),
                date.day(),
                year.rem_euclid(100)
            ),
            DateOrder::DayMonthYear => {
                let separator = self.numeric_separator();
                if separator == "." {
                    format!(
                        "{:02}.{:02}.{:02}",
                        date.day(),
                        date.month(),
                        year.rem_euclid(100)
                    )
                } else {
                    format!("{:02}{separator}{:02}{separator}{year}", date.day(), date.month())
                }
            }
            DateOrder::YearMonthDay => format!("{year}/{:02}/{:02}", date.month(), date.day()),
        }
    }

    fn time_style_text(&self, date: &DateTime<FixedOffset>, style: DateTimeStyle) -> String {
        let mut fields = DateTimeOptions {
            hour: Some(NumericWidth::Numeric),
            minute: Some(NumericWidth::TwoDigit),
            hour12: self.options.hour12,
            hour_cycle: self.options.hour_cycle,
            ..DateTimeOptions::default()
        };
        if style != DateTimeStyle::Short {
            fields.second = Some(NumericWidth::TwoDigit);
        }
        let time = self.time_fields(date, &fields).unwrap_or_default();
        match style {
            DateTimeStyle::Short | DateTimeStyle::Medium => time,
            DateTimeStyle::Long => format!("{time} {}", zone_name(date.offset(), TimeZoneName::Short)),
            DateTimeStyle::Full => format!("{time} {}", zone_name(date.offset(), TimeZoneName::Long)),
        }
    }

    fn format_fields(&self, date: &DateTime<FixedOffset>, options: &DateTimeOptions) -> String {
        let defaulted;
        let options = if options.has_date_fields() || options.has_time_fields() {
            options
        } else {
            defaulted = DateTimeOptions {
                era: options.era,
                time_zone_name: options.time_zone_name,
                ..DateTimeOptions::numeric_date()
            };
            &defaulted
        };

        let mut date_text = self.date_fields(date, options);
        if let Some(width) = options.era {
            let era = era_name(date.year(), width);
            date_text = Some(match date_text {
                Some(text) => format!("{text} {era}"),
                None => era.to_string(),
            });
        }
        let zone = options
            .time_zone_name
            .map(|style| zone_name(date.offset(), style));
        let time_text = self.time_fields(date, options).map(|time| match &zone {
            Some(zone) => format!("{time} {zone}"),
            None => time,
        });

        let has_time = time_text.is_some();
        let mut text = [date_text, time_text]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ");
        if let (false, Some(zone)) = (has_time, zone) {
            if text.is_empty() {
                text = zone;
            } else {
                text = format!("{text}, {zone}");
            }
        }
        text
    }

    fn date_order(&self) -> DateOrder {
        match (self.locale.language(), self.locale.region()) {
            ("en", None | Some("US" | "PH" | "CA")) => DateOrder::MonthDayYear,
            ("ja" | "zh" | "ko" | "hu" | "lt" | "sv", _) => DateOrder::YearMonthDay,
            _ => DateOrder::DayMonthYear,
        }
    }

    fn numeric_separator(&self) -> &'static str {
        match self.locale.language() {
            "de" | "ru" | "pl" | "fi" | "cs" | "sk" | "tr" | "nb" | "no" | "uk" | "ro" | "da" => {
                "."
            }
            "nl" | "sv" => "-",
            _ => "/",
        }
    }

    fn hour_cycle(&self, options: &DateTimeOptions) -> HourCycle {
        if let Some(cycle) = options.hour_cycle {
            return cycle;
        }
        match options.hour12 {
            Some(true) => HourCycle::H12,
            Some(false) => HourCycle::H23,
            None => match (self.locale.language(), self.locale.region()) {
                ("en", Some("GB" | "IE")) => HourCycle::H23,
                ("en", _) => HourCycle::H12,
                _ => HourCycle::H23,
            },
        }
    }

    fn date_fields(&self, date: &DateTime<FixedOffset>, options: &DateTimeOptions) -> Option<String> {
        let weekday = options
            .weekday
            .map(|width| weekday_name(date.weekday(), width));
        let year = options.year.map(|width| match width {
            NumericWidth::Numeric => display_year(date.year()).to_string(),
            NumericWidth::TwoDigit => format!("{:02}", display_year(date.year()).rem_euclid(100)),
        });
        let day = options.day.map(|width| pad(date.day(), width));

        let core = match options.month {
            Some(width @ (MonthWidth::Short | MonthWidth::Long | MonthWidth::Narrow)) => {
                let month = month_name(date.month(), width);
                let text = if self.is_english() {
                    match (day, year) {
                        (Some(day), Some(year)) => format!("{month} {day}, {year}"),
                        (Some(day), None) => format!("{month} {day}"),
                        (None, Some(year)) => format!("{month} {year}"),
                        (None, None) => month.to_string(),
                    }
                } else {
                    [day, Some(month.to_string()), year]
                        .into_iter()
                        .flatten()
                        .collect::<Vec<_>>()
                        .join(" ")
                };
                Some(text)
            }
            numeric => {
                let month = numeric.map(|width| match width {
                    MonthWidth::TwoDigit => format!("{:02}", date.month()),
                    _ => date.month().to_string(),
                });
                let ordered = match self.date_order() {
                    DateOrder::MonthDayYear => [month, day, year],
                    DateOrder::DayMonthYear => [day, month, year],
                    DateOrder::YearMonthDay => [year, month, day],
                };
                let parts: Vec<String> = ordered.into_iter().flatten().collect();
                let separator = match self.date_order() {
                    DateOrder::DayMonthYear => self.numeric_separator(),
                    DateOrder::MonthDayYear | DateOrder::YearMonthDay => "/",
                };
                (!parts.is_empty()).then(|| parts.join(separator))
            }
        };

        match (weekday, core) {
            (Some(weekday), Some(core)) => Some(format!("{weekday}, {core}")),
            (Some(weekday), None) => Some(weekday),
            (None, core) => core,
        }
    }

    fn time_fields(&self, date: &DateTime<FixedOffset>, options: &DateTimeOptions) -> Option<String> {
        if !options.has_time_fields() {
            return None;
        }
        let cycle = self.hour_cycle(options);
        let mut parts = Vec::with_capacity(3);
        if let Some(width) = options.hour {
            let hour = date.hour();
            let value = match cycle {
                HourCycle::H11 => hour % 12,
                HourCycle::H12 if hour % 12 == 0 => 12,
                HourCycle::H12 => hour % 12,
                HourCycle::H23 => hour,
                HourCycle::H24 if hour == 0 => 24,
                HourCycle::H24 => hour,
            };
            if cycle.is_twelve_hour() && width == NumericWidth::Numeric {
                parts.push(value.to_string());
            } else {
                parts.push(format!("{value:02}"));
            }
        }
        if options.minute.is_some() {
            if options.hour.is_some() {
                parts.push(format!("{:02}", date.minute()));
            } else {
                parts.push(date.minute().to_string());
            }
        }
        if options.second.is_some() {
            if options.minute.is_some() {
                parts.push(format!("{:02}", date.second()));
            } else {
                parts.push(date.second().to_string());
            }
        }
        let mut text = parts.join(":");
        if options.hour.is_some() && cycle.is_twelve_hour() {
            text.push_str(if date.hour() < 12 { " AM" } else { " PM" });
        }
        Some(text)
    }
}

fn pad(value: u32, width: NumericWidth) -> String {
    match width {
        NumericWidth::Numeric => value.to_string(),
        NumericWidth::TwoDigit => format!("{value:02}"),
    }
}

/// Year as shown next to an era: 1 BC is year 0 in the proleptic calendar.
fn display_year(year: i32) -> i32 {
    if year > 0 { year } else { 1 - year }
}

fn era_name(year: i32, width: TextWidth) -> &'static str {
    match (year > 0, width) {
        (true, TextWidth::Narrow) => "A",
        (true, TextWidth::Short) => "AD",
        (true, TextWidth::Long) => "Anno Domini",
        (false, TextWidth::Narrow) => "B",
        (false, TextWidth::Short) => "BC",
        (false, TextWidth::Long) => "Before Christ",
    }
}

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

fn month_name(month: u32, width: MonthWidth) -> String {
    let name = MONTHS
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or_default();
    match width {
        MonthWidth::Long => name.to_string(),
        MonthWidth::Narrow => name.chars().take(1).collect(),
        _ => name.chars().take(3).collect(),
    }
}

fn weekday_name(weekday: Weekday, width: TextWidth) -> String {
    let name = match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    };
    match width {
        TextWidth::Long => name.to_string(),
        TextWidth::Short => name.chars().take(3).collect(),
        TextWidth::Narrow => name.chars().take(1).collect(),
    }
}

/// Offset-based zone name: `GMT+1`, `GMT-3:30` or `GMT+01:00`.
fn zone_name(offset: &FixedOffset, style: TimeZoneName) -> String {
    let seconds = offset.local_minus_utc();
    if seconds == 0 {
        return "GMT".to_string();
    }
    let sign = if seconds < 0 { '-' } else { '+' };
    let total_minutes = seconds.unsigned_abs().div_euclid(60);
    let hours = total_minutes.div_euclid(60);
    let minutes = total_minutes.rem_euclid(60);
    match style {
        TimeZoneName::Short | TimeZoneName::ShortGeneric if minutes == 0 => {
            format!("GMT{sign}{hours}")
        }
        TimeZoneName::Short | TimeZoneName::ShortGeneric => format!("GMT{sign}{hours}:{minutes:02}"),
        TimeZoneName::Long | TimeZoneName::LongGeneric => {
            format!("GMT{sign}{hours:02}:{minutes:02}")
        }
    }
}
