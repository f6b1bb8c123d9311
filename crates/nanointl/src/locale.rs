//! The locale a set of messages is formatted in.

use icu_locale_core::Locale;
use thiserror::Error;

use crate::format::{
    DateTimeFormatter, DateTimeOptions, NumberFormatter, NumberOptions, plural_category,
};
use crate::parser::{Category, PluralKind};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid locale '{tag}': {reason}")]
pub struct LocaleError {
    pub tag: String,
    pub reason: String,
}

/// A parsed BCP 47 locale plus the formatters built on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleContext {
    locale: Locale,
    tag: String,
    language: String,
    region: Option<String>,
}

impl LocaleContext {
    /// Parse a locale tag such as `en`, `en-US` or `ru`.
    pub fn new(tag: &str) -> Result<Self, LocaleError> {
        let locale: Locale = tag.parse().map_err(|error| LocaleError {
            tag: tag.to_string(),
            reason: format!("{error:?}"),
        })?;
        let language = locale.id.language.as_str().to_string();
        let region = locale.id.region.as_ref().map(|region| region.as_str().to_string());
        Ok(Self {
            locale,
            tag: tag.to_string(),
            language,
            region,
        })
    }

    /// The tag exactly as given.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Primary language subtag, e.g. `en` for `en-US`.
    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn plural_category(&self, kind: PluralKind, n: f64) -> Category {
        plural_category(&self.locale, kind, n)
    }

    pub fn number_formatter(&self, options: NumberOptions) -> NumberFormatter<'_> {
        NumberFormatter::new(self, options)
    }

    pub fn date_time_formatter(&self, options: DateTimeOptions) -> DateTimeFormatter<'_> {
        DateTimeFormatter::new(self, options)
    }
}
