//! The `number` plugin: ICU number skeletons.
//!
//! `{n, number, ::currency/EUR .00 sign-always}` is tokenized into
//! [`NumberOptions`] plus a scale factor. Options text that does not start
//! with `::` is treated as a style keyword: `integer` drops the fraction,
//! `verbose` takes the options from the caller, anything else uses defaults.

use serde_json::Value as JsonValue;
use tracing::trace;
use winnow::ascii::multispace0;
use winnow::combinator::{delimited, repeat, separated};
use winnow::prelude::*;
use winnow::token::take_while;

use super::{Plugin, PluginError, PluginRegistry, SkeletonError};
use crate::suggest::Vocabulary;
use crate::format::{
    CompactDisplay, CurrencyDisplay, CurrencySign, Grouping, Notation, NumberOptions, NumberStyle,
    SignDisplay, UnitDisplay,
};
use crate::parser::PluralOffset;
use crate::serializer::{FormatError, SerializeCall};
use crate::types::{Output, PluginParams};

/// Parsed options of a `number` argument.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberParams {
    pub options: NumberOptions,
    /// Multiplier applied to the value before formatting.
    pub scale: f64,
    /// Subtracted after scaling.
    pub offset: i64,
}

impl Default for NumberParams {
    fn default() -> Self {
        Self {
            options: NumberOptions::default(),
            scale: 1.0,
            offset: 0,
        }
    }
}

impl NumberParams {
    fn apply(&self, value: f64) -> f64 {
        value * self.scale - self.offset as f64
    }
}

/// Stems accepted in a skeleton, used for suggestions.
pub(crate) const NUMBER_STEMS: &[&str] = &[
    "percent",
    "integer-width",
    "scientific",
    "engineering",
    "scale",
    "measure-unit",
    "unit",
    "currency",
    "notation-simple",
    "notation-scientific",
    "notation-engineering",
    "unit-width-iso-code",
    "unit-width-short",
    "unit-width-full-name",
    "unit-width-narrow",
    "compact-short",
    "compact-long",
    "sign-auto",
    "sign-always",
    "sign-never",
    "sign-except-zero",
    "sign-accounting",
    "sign-accounting-always",
    "sign-accounting-except-zero",
    "group-always",
    "group-auto",
    "group-off",
    "group-min-2",
];

/// Parse the options part of a `number` argument.
///
/// # Examples
///
/// ```
/// use nanointl::format::{NumberStyle, SignDisplay};
/// use nanointl::plugins::parse_number_skeleton;
///
/// let params = parse_number_skeleton(":: currency/EUR sign-always", "price", None).unwrap();
/// assert_eq!(params.options.style, NumberStyle::Currency);
/// assert_eq!(params.options.currency.as_deref(), Some("EUR"));
/// assert_eq!(params.options.sign_display, SignDisplay::Always);
///
/// let params = parse_number_skeleton("::%", "ratio", None).unwrap();
/// assert_eq!(params.scale, 100.0);
/// ```
pub fn parse_number_skeleton(
    raw: &str,
    variable: &str,
    verbose: Option<&JsonValue>,
) -> Result<NumberParams, SkeletonError> {
    let trimmed = raw.trim();
    let mut params = NumberParams::default();
    match trimmed {
        "verbose" => {
            if let Some(json) = verbose {
                params.options = serde_json::from_value(json.clone())
                    .map_err(|source| SkeletonError::Verbose { source })?;
            }
            return Ok(params);
        }
        "integer" => {
            params.options.minimum_fraction_digits = Some(0);
            params.options.maximum_fraction_digits = Some(0);
            return Ok(params);
        }
        _ => {}
    }
    let Some(skeleton) = trimmed.strip_prefix("::") else {
        return Ok(params);
    };

    let skeleton = skeleton.trim();
    let tokens = skeleton_tokens
        .parse(skeleton)
        .map_err(|error| SkeletonError::Malformed {
            skeleton: skeleton.to_string(),
            offset: error.offset(),
        })?;
    for token in tokens {
        apply_token(token, &mut params)?;
    }
    trace!(variable, skeleton, ?params, "parsed number skeleton");
    Ok(params)
}

/// Whitespace-separated tokens of a skeleton.
pub(crate) fn skeleton_tokens<'s>(input: &mut &'s str) -> ModalResult<Vec<&'s str>> {
    repeat(
        0..,
        delimited(
            multispace0,
            take_while(1.., |c: char| !c.is_whitespace()),
            multispace0,
        ),
    )
    .parse_next(input)
}

/// Split `stem/option/option` into its parts.
fn stem_parts<'s>(input: &mut &'s str) -> ModalResult<Vec<&'s str>> {
    separated(1.., take_while(0.., |c: char| c != '/'), '/').parse_next(input)
}

fn apply_token(token: &str, params: &mut NumberParams) -> Result<(), SkeletonError> {
    let options = &mut params.options;
    match token {
        "%" | "percent" => apply_percent(params, 1.0),
        "notation-simple" => options.notation = Notation::Standard,
        "notation-scientific" => options.notation = Notation::Scientific,
        "notation-engineering" => options.notation = Notation::Engineering,
        "unit-width-iso-code" => options.currency_display = CurrencyDisplay::Code,
        "unit-width-short" => {
            options.unit_display = UnitDisplay::Short;
            options.currency_display = CurrencyDisplay::Code;
        }
        "unit-width-full-name" => {
            options.unit_display = UnitDisplay::Long;
            options.currency_display = CurrencyDisplay::Name;
        }
        "unit-width-narrow" => {
            options.unit_display = UnitDisplay::Narrow;
            options.currency_display = CurrencyDisplay::NarrowSymbol;
        }
        "compact-short" | "K" => {
            options.notation = Notation::Compact;
            options.compact_display = CompactDisplay::Short;
        }
        "compact-long" | "KK" => {
            options.notation = Notation::Compact;
            options.compact_display = CompactDisplay::Long;
        }
        "sign-auto" => options.sign_display = SignDisplay::Auto,
        "sign-always" | "+!" => options.sign_display = SignDisplay::Always,
        "sign-never" | "+_" => options.sign_display = SignDisplay::Never,
        "sign-except-zero" | "+?" => options.sign_display = SignDisplay::ExceptZero,
        "sign-accounting" | "()" => options.currency_sign = CurrencySign::Accounting,
        "sign-accounting-always" | "()!" => {
            options.sign_display = SignDisplay::Always;
            options.currency_sign = CurrencySign::Accounting;
        }
        "sign-accounting-except-zero" | "()?" => {
            options.sign_display = SignDisplay::ExceptZero;
            options.currency_sign = CurrencySign::Accounting;
        }
        "group-always" => options.use_grouping = Grouping::Always,
        "group-auto" => options.use_grouping = Grouping::Auto,
        "group-off" | ",_" => options.use_grouping = Grouping::Off,
        "group-min-2" | ",?" => options.use_grouping = Grouping::Min2,
        _ => return apply_pattern(token, params),
    }
    Ok(())
}

/// Tokens with a pattern or options: `.00#`, `@@#`, `E+!0`, `scale/2`, …
fn apply_pattern(token: &str, params: &mut NumberParams) -> Result<(), SkeletonError> {
    if let Some(factor) = token.strip_prefix("%x") {
        let factor = parse_factor(token, factor)?;
        apply_percent(params, factor);
        return Ok(());
    }
    if let Some(pattern) = token.strip_prefix('.') {
        return apply_fraction(token, pattern, &mut params.options);
    }
    if let Some(pattern) = token.strip_prefix('/').or_else(|| token.starts_with('@').then_some(token)) {
        return apply_significant(token, pattern, &mut params.options);
    }
    if let Some(rest) = token.strip_prefix("EE") {
        params.options.notation = Notation::Engineering;
        return apply_exponent(token, rest, &mut params.options);
    }
    if let Some(rest) = token.strip_prefix('E') {
        params.options.notation = Notation::Scientific;
        return apply_exponent(token, rest, &mut params.options);
    }

    let mut input = token;
    let parts = stem_parts(&mut input).unwrap_or_else(|_| vec![token]);
    let (stem, stem_options) = match parts.split_first() {
        Some((stem, rest)) => (*stem, rest),
        None => (token, &[][..]),
    };
    let options = &mut params.options;
    match stem {
        "integer-width" => {
            options.minimum_fraction_digits = Some(0);
            options.maximum_fraction_digits = Some(0);
            if let Some(pattern) = stem_options.first() {
                apply_integer_width(token, pattern, options)?;
            }
        }
        "scientific" | "engineering" => {
            options.notation = if stem == "scientific" {
                Notation::Scientific
            } else {
                Notation::Engineering
            };
            for option in stem_options {
                match *option {
                    "sign-always" => options.sign_display = SignDisplay::Always,
                    "sign-except-zero" | "except-zero" => {
                        options.sign_display = SignDisplay::ExceptZero;
                    }
                    exponent if exponent.starts_with('*') => {
                        options.minimum_integer_digits = Some(exponent.len() - 1);
                    }
                    other => {
                        return Err(SkeletonError::InvalidOption {
                            token: token.to_string(),
                            option: other.to_string(),
                        });
                    }
                }
            }
        }
        "scale" => {
            let factor = parse_factor(token, required_option(token, stem_options)?)?;
            params.scale *= factor;
        }
        "measure-unit" | "unit" => {
            options.style = NumberStyle::Unit;
            options.unit = Some(required_option(token, stem_options)?.to_string());
        }
        "currency" => {
            let code = required_option(token, stem_options)?;
            if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(SkeletonError::InvalidOption {
                    token: token.to_string(),
                    option: code.to_string(),
                });
            }
            options.style = NumberStyle::Currency;
            options.currency = Some(code.to_ascii_uppercase());
        }
        _ => {
            return Err(SkeletonError::UnknownToken {
                token: token.to_string(),
                suggestions: Vocabulary::number_stems().suggest(stem),
            });
        }
    }
    Ok(())
}

fn required_option<'s>(token: &str, options: &[&'s str]) -> Result<&'s str, SkeletonError> {
    options
        .first()
        .copied()
        .filter(|option| !option.is_empty())
        .ok_or_else(|| SkeletonError::MissingOption {
            token: token.to_string(),
        })
}

fn parse_factor(token: &str, factor: &str) -> Result<f64, SkeletonError> {
    factor
        .parse::<f64>()
        .ok()
        .filter(|factor| factor.is_finite())
        .ok_or_else(|| SkeletonError::InvalidOption {
            token: token.to_string(),
            option: factor.to_string(),
        })
}

/// Percent renders as the `percent` unit so `unit-width-*` applies to it.
fn apply_percent(params: &mut NumberParams, factor: f64) {
    let options = &mut params.options;
    options.style = NumberStyle::Unit;
    options.unit = Some("percent".to_string());
    options.maximum_fraction_digits.get_or_insert(0);
    params.scale *= 100.0 * factor;
}

/// `.00##`: zeros are required digits, `#` optional ones, `*` unlimited.
fn apply_fraction(token: &str, pattern: &str, options: &mut NumberOptions) -> Result<(), SkeletonError> {
    let leading = pattern.chars().next();
    for (index, symbol) in pattern.chars().enumerate() {
        let count = index + 1;
        match symbol {
            '0' => {
                options.minimum_fraction_digits = Some(count);
                if leading == Some('0') {
                    options.maximum_fraction_digits = Some(count);
                }
            }
            '#' => options.maximum_fraction_digits = Some(count),
            '*' => options.maximum_fraction_digits = Some(20),
            symbol => {
                return Err(SkeletonError::UnknownSymbol {
                    symbol,
                    token: token.to_string(),
                });
            }
        }
    }
    Ok(())
}

/// `@@#`: `@` are required significant digits, `#` optional ones.
fn apply_significant(
    token: &str,
    pattern: &str,
    options: &mut NumberOptions,
) -> Result<(), SkeletonError> {
    let leading = pattern.chars().next();
    for (index, symbol) in pattern.chars().enumerate() {
        let count = index + 1;
        match symbol {
            '@' => {
                options.minimum_significant_digits = Some(count);
                if leading == Some('@') {
                    options.maximum_significant_digits = Some(count);
                }
            }
            '#' => options.maximum_significant_digits = Some(count),
            '*' => options.maximum_significant_digits = Some(20),
            symbol => {
                return Err(SkeletonError::UnknownSymbol {
                    symbol,
                    token: token.to_string(),
                });
            }
        }
    }
    Ok(())
}

/// `E+!00`: optional sign display followed by zeros.
fn apply_exponent(token: &str, rest: &str, options: &mut NumberOptions) -> Result<(), SkeletonError> {
    let zeros = if let Some(zeros) = rest.strip_prefix("+!") {
        options.sign_display = SignDisplay::Always;
        zeros
    } else if let Some(zeros) = rest.strip_prefix("+?") {
        options.sign_display = SignDisplay::ExceptZero;
        zeros
    } else {
        rest
    };
    if let Some(symbol) = zeros.chars().find(|&c| c != '0') {
        return Err(SkeletonError::UnknownSymbol {
            symbol,
            token: token.to_string(),
        });
    }
    if !zeros.is_empty() {
        options.minimum_integer_digits = Some(zeros.len());
    }
    Ok(())
}

/// `integer-width/*000` or `integer-width/##0`.
fn apply_integer_width(
    token: &str,
    pattern: &str,
    options: &mut NumberOptions,
) -> Result<(), SkeletonError> {
    if let Some(symbol) = pattern.chars().find(|c| !matches!(c, '0' | '#' | '*')) {
        return Err(SkeletonError::UnknownSymbol {
            symbol,
            token: token.to_string(),
        });
    }
    let zeros = pattern.chars().filter(|&c| c == '0').count();
    if zeros > 0 {
        options.minimum_integer_digits = Some(zeros);
    }
    Ok(())
}

fn serialize_number(call: &SerializeCall<'_>) -> Result<Output, FormatError> {
    let value = call.number()?;
    let (options, value) = match call.params {
        None => (NumberOptions::default(), value),
        Some(params) => {
            if let Some(number) = params.downcast_ref::<NumberParams>() {
                (number.options.clone(), number.apply(value))
            } else if let Some(plural) = params.downcast_ref::<PluralOffset>() {
                (NumberOptions::default(), value - plural.offset as f64)
            } else if let Some(json) = params.downcast_ref::<JsonValue>() {
                let options = serde_json::from_value(json.clone()).map_err(|_| {
                    FormatError::InvalidParams {
                        plugin: call.node.plugin.clone(),
                    }
                })?;
                (options, value)
            } else {
                return Err(FormatError::InvalidParams {
                    plugin: call.node.plugin.clone(),
                });
            }
        }
    };
    Ok(Output::Text(call.locale.number_formatter(options).format(value)))
}

/// Registers the `number` parser and serializer.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberPlugin;

impl Plugin for NumberPlugin {
    fn name(&self) -> &str {
        "number-plugin"
    }

    fn init(&self, registry: &mut PluginRegistry) -> Result<(), PluginError> {
        registry.add_parser("number", |raw, variable, verbose| {
            parse_number_skeleton(raw, variable, verbose).map(PluginParams::new)
        });
        registry.add_serializer("number", serialize_number);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> NumberParams {
        parse_number_skeleton(raw, "n", None).unwrap()
    }

    #[test]
    fn tokenizer_skips_extra_whitespace() {
        let mut input = "  .00   sign-always ";
        assert_eq!(
            skeleton_tokens(&mut input).unwrap(),
            vec![".00", "sign-always"]
        );
    }

    #[test]
    fn fraction_patterns() {
        let options = parse("::.00##").options;
        assert_eq!(options.minimum_fraction_digits, Some(2));
        assert_eq!(options.maximum_fraction_digits, Some(4));

        let options = parse("::.##").options;
        assert_eq!(options.minimum_fraction_digits, None);
        assert_eq!(options.maximum_fraction_digits, Some(2));

        let options = parse("::.0*").options;
        assert_eq!(options.minimum_fraction_digits, Some(1));
        assert_eq!(options.maximum_fraction_digits, Some(20));
    }

    #[test]
    fn percent_with_multiplier() {
        let params = parse("::%x2");
        assert_eq!(params.scale, 200.0);
        assert_eq!(params.options.unit.as_deref(), Some("percent"));
        assert_eq!(params.options.maximum_fraction_digits, Some(0));
    }

    #[test]
    fn percent_keeps_explicit_fraction() {
        let params = parse("::.0 percent");
        assert_eq!(params.options.maximum_fraction_digits, Some(1));
    }

    #[test]
    fn exponent_tokens() {
        let options = parse("::EE+!00").options;
        assert_eq!(options.notation, Notation::Engineering);
        assert_eq!(options.sign_display, SignDisplay::Always);
        assert_eq!(options.minimum_integer_digits, Some(2));

        let options = parse("::scientific/sign-always").options;
        assert_eq!(options.notation, Notation::Scientific);
        assert_eq!(options.sign_display, SignDisplay::Always);
    }

    #[test]
    fn non_skeleton_text_uses_defaults() {
        assert_eq!(parse("short"), NumberParams::default());
        assert_eq!(parse("  "), NumberParams::default());
    }

    #[test]
    fn blank_and_spaced_skeletons_tokenize() {
        assert_eq!(parse(":: "), NumberParams::default());
        let params = parse("::  percent \t .00 ");
        assert_eq!(params.options.unit.as_deref(), Some("percent"));
        assert_eq!(params.options.minimum_fraction_digits, Some(2));
    }

    #[test]
    fn malformed_skeleton_reports_offset() {
        let error = SkeletonError::Malformed {
            skeleton: "a b".to_string(),
            offset: 2,
        };
        assert_eq!(error.to_string(), "malformed skeleton 'a b' at offset 2");
    }

    #[test]
    fn stems_requiring_options() {
        let error = parse_number_skeleton("::currency", "n", None).unwrap_err();
        assert!(matches!(error, SkeletonError::MissingOption { .. }));
        let error = parse_number_skeleton("::currency/EURO", "n", None).unwrap_err();
        assert!(matches!(error, SkeletonError::InvalidOption { .. }));
    }
}
