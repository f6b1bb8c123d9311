//! Locale-aware formatting of numbers, dates and plural categories.

mod datetime;
mod number;
mod plural;

pub use datetime::{
    DateTimeFormatter, DateTimeOptions, DateTimeStyle, HourCycle, MonthWidth, NumericWidth,
    TextWidth, TimeZoneName,
};
pub use number::{
    CompactDisplay, CurrencyDisplay, CurrencySign, Grouping, Notation, NumberFormatter,
    NumberOptions, NumberStyle, SignDisplay, UnitDisplay,
};
pub use plural::plural_category;
