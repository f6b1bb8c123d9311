//! Locale-aware number formatting.
//!
//! Supports the option set number skeletons compile to: decimal, percent,
//! currency and unit styles; standard, scientific, engineering and compact
//! notations; fraction and significant digit rounding; sign display and
//! grouping strategies. Rounding is half away from zero on the shortest
//! decimal representation of the value.

use serde::Deserialize;

use crate::locale::LocaleContext;
use crate::parser::{Category, PluralKind};

// ============================================================================
// Options
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NumberStyle {
    #[default]
    Decimal,
    /// Multiplies by 100 and appends a percent sign.
    Percent,
    Currency,
    Unit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CurrencyDisplay {
    /// `CA$10.00`
    #[default]
    Symbol,
    /// `$10.00`
    NarrowSymbol,
    /// `CAD 10.00`
    Code,
    /// `10.00 Canadian dollars`
    Name,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CurrencySign {
    #[default]
    Standard,
    /// Negative amounts in parentheses.
    Accounting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UnitDisplay {
    /// `5 m`
    #[default]
    Short,
    /// `5m`
    Narrow,
    /// `5 meters`
    Long,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Notation {
    #[default]
    Standard,
    Scientific,
    Engineering,
    Compact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CompactDisplay {
    /// `5K`
    #[default]
    Short,
    /// `5 thousand`
    Long,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SignDisplay {
    /// Sign for negative numbers only.
    #[default]
    Auto,
    /// Sign for every number, including zero.
    Always,
    Never,
    /// Sign for every number except zero.
    ExceptZero,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Grouping {
    /// Locale default.
    #[default]
    Auto,
    Always,
    /// Group only when the integer part has at least five digits.
    Min2,
    Off,
}

/// Options for [`NumberFormatter`].
///
/// Deserializes from the camelCase keys used by verbose message options,
/// e.g. `{"style": "currency", "currency": "EUR"}`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NumberOptions {
    pub style: NumberStyle,
    /// ISO 4217 code, required by the currency style.
    pub currency: Option<String>,
    pub currency_display: CurrencyDisplay,
    pub currency_sign: CurrencySign,
    /// Unit identifier such as `meter` or `kilometer-per-hour`.
    pub unit: Option<String>,
    pub unit_display: UnitDisplay,
    pub notation: Notation,
    pub compact_display: CompactDisplay,
    pub sign_display: SignDisplay,
    pub use_grouping: Grouping,
    pub minimum_integer_digits: Option<usize>,
    pub minimum_fraction_digits: Option<usize>,
    pub maximum_fraction_digits: Option<usize>,
    pub minimum_significant_digits: Option<usize>,
    pub maximum_significant_digits: Option<usize>,
}

// ============================================================================
// Decimal digits
// ============================================================================

/// Digits of a non-negative decimal number: `0.d₁d₂… × 10^exponent`.
///
/// Leading and trailing zeros are never stored; zero has no digits.
#[derive(Debug, Clone, PartialEq)]
struct Digits {
    digits: Vec<u8>,
    exponent: i32,
}

impl Digits {
    fn from_f64(value: f64) -> Self {
        let text = value.abs().to_string();
        let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));
        let mut digits: Vec<u8> = integer
            .bytes()
            .chain(fraction.bytes())
            .map(|b| b.saturating_sub(b'0'))
            .collect();
        let leading = digits.iter().take_while(|&&d| d == 0).count();
        digits.drain(..leading);
        let exponent = integer.len() as i32 - leading as i32;
        let mut result = Self { digits, exponent };
        result.normalize();
        result
    }

    fn normalize(&mut self) {
        while self.digits.last() == Some(&0) {
            self.digits.pop();
        }
        if self.digits.is_empty() {
            self.exponent = 0;
        }
    }

    fn is_zero(&self) -> bool {
        self.digits.is_empty()
    }

    /// Power of ten of the leading digit: 0 for 1–9, 3 for 1000–9999.
    fn magnitude(&self) -> i32 {
        self.exponent - 1
    }

    /// Multiply by `10^places`.
    fn shift(&mut self, places: i32) {
        if !self.is_zero() {
            self.exponent += places;
        }
    }

    /// Round half away from zero, keeping `fraction` digits after the point.
    fn round_fraction(&mut self, fraction: i32) {
        if self.is_zero() {
            return;
        }
        let keep = self.exponent + fraction;
        if keep < 0 {
            self.digits.clear();
            self.exponent = 0;
            return;
        }
        let keep = keep as usize;
        if keep >= self.digits.len() {
            return;
        }
        let round_up = self.digits[keep] >= 5;
        self.digits.truncate(keep);
        if round_up {
            let mut carry = true;
            for digit in self.digits.iter_mut().rev() {
                if *digit == 9 {
                    *digit = 0;
                } else {
                    *digit += 1;
                    carry = false;
                    break;
                }
            }
            if carry {
                self.digits.insert(0, 1);
                self.exponent += 1;
            }
        }
        self.normalize();
    }

    fn round_significant(&mut self, significant: usize) {
        self.round_fraction(significant as i32 - self.exponent);
    }

    fn integer_part(&self) -> String {
        if self.exponent <= 0 {
            return "0".to_string();
        }
        (0..self.exponent as usize)
            .map(|i| char::from(b'0' + self.digits.get(i).copied().unwrap_or(0)))
            .collect()
    }

    fn fraction_part(&self) -> String {
        let mut fraction = "0".repeat((-self.exponent).max(0) as usize);
        let skip = self.exponent.max(0) as usize;
        fraction.extend(self.digits.iter().skip(skip).map(|&d| char::from(b'0' + d)));
        fraction
    }

    fn to_f64(&self) -> f64 {
        let integer = self.integer_part();
        let fraction = self.fraction_part();
        format!("{integer}.{fraction}0").parse().unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Copy)]
enum Precision {
    Fraction { min: usize, max: usize },
    Significant { min: usize, max: usize },
}

impl Precision {
    /// Round `digits` and return the minimum number of fraction digits to show.
    fn apply(self, digits: &mut Digits) -> usize {
        match self {
            Precision::Fraction { min, max } => {
                digits.round_fraction(max as i32);
                min
            }
            Precision::Significant { min, max } => {
                digits.round_significant(max);
                if digits.is_zero() {
                    min.saturating_sub(1)
                } else if digits.exponent > 0 {
                    min.saturating_sub(digits.exponent as usize)
                } else {
                    (-digits.exponent) as usize + min
                }
            }
        }
    }
}

// ============================================================================
// Formatter
// ============================================================================

/// A number rendered without sign or affixes.
struct Rendered {
    text: String,
    is_zero: bool,
    /// The rounded value the text shows, before compact scaling.
    value: f64,
}

/// Formats numbers for one locale with fixed options.
///
/// # Example
///
/// ```
/// use nanointl::LocaleContext;
/// use nanointl::format::{NumberOptions, NumberStyle};
///
/// let en = LocaleContext::new("en").unwrap();
/// let options = NumberOptions {
///     style: NumberStyle::Currency,
///     currency: Some("USD".to_string()),
///     ..NumberOptions::default()
/// };
/// assert_eq!(en.number_formatter(options).format(1234.5), "$1,234.50");
/// ```
#[derive(Debug, Clone)]
pub struct NumberFormatter<'a> {
    locale: &'a LocaleContext,
    options: NumberOptions,
}

impl<'a> NumberFormatter<'a> {
    pub fn new(locale: &'a LocaleContext, options: NumberOptions) -> Self {
        Self { locale, options }
    }

    pub fn options(&self) -> &NumberOptions {
        &self.options
    }

    /// Format a number.
    pub fn format(&self, value: f64) -> String {
        if value.is_nan() {
            return "NaN".to_string();
        }
        let negative = value < 0.0;
        let rendered = if value.is_infinite() {
            Rendered {
                text: "∞".to_string(),
                is_zero: false,
                value: value.abs(),
            }
        } else {
            let scaled = if self.options.style == NumberStyle::Percent {
                value.abs() * 100.0
            } else {
                value.abs()
            };
            let digits = Digits::from_f64(scaled);
            match self.options.notation {
                Notation::Standard => self.render_standard(digits),
                Notation::Scientific => self.render_exponential(digits, 1),
                Notation::Engineering => self.render_exponential(digits, 3),
                Notation::Compact => self.render_compact(digits),
            }
        };

        let text = self.with_affixes(&rendered);
        let sign = match self.options.sign_display {
            SignDisplay::Auto => negative.then_some('-'),
            SignDisplay::Always => Some(if negative { '-' } else { '+' }),
            SignDisplay::Never => None,
            SignDisplay::ExceptZero if rendered.is_zero => None,
            SignDisplay::ExceptZero => Some(if negative { '-' } else { '+' }),
        };
        let accounting = self.options.style == NumberStyle::Currency
            && self.options.currency_sign == CurrencySign::Accounting;
        match sign {
            Some('-') if accounting => format!("({text})"),
            Some(sign) => format!("{sign}{text}"),
            None => text,
        }
    }

    fn currency_code(&self) -> Option<String> {
        match self.options.style {
            NumberStyle::Currency => self.options.currency.as_deref().map(str::to_ascii_uppercase),
            NumberStyle::Decimal | NumberStyle::Percent | NumberStyle::Unit => None,
        }
    }

    /// Fraction digit bounds before any notation-specific defaults.
    fn fraction_bounds(&self) -> (usize, usize) {
        let (default_min, default_max) = match (self.options.style, self.currency_code()) {
            (NumberStyle::Currency, Some(code)) => {
                let digits = currency_digits(&code);
                (digits, digits)
            }
            (NumberStyle::Percent, _) => (0, 0),
            _ => (0, 3),
        };
        match (
            self.options.minimum_fraction_digits,
            self.options.maximum_fraction_digits,
        ) {
            (Some(min), Some(max)) => (min, max.max(min)),
            (Some(min), None) => (min, default_max.max(min)),
            (None, Some(max)) => (default_min.min(max), max),
            (None, None) => (default_min, default_max),
        }
    }

    fn significant_bounds(&self) -> Option<(usize, usize)> {
        match (
            self.options.minimum_significant_digits,
            self.options.maximum_significant_digits,
        ) {
            (None, None) => None,
            (min, max) => {
                let min = min.unwrap_or(1).max(1);
                Some((min, max.unwrap_or(21).max(min)))
            }
        }
    }

    fn has_fraction_options(&self) -> bool {
        self.options.minimum_fraction_digits.is_some()
            || self.options.maximum_fraction_digits.is_some()
    }

    fn precision(&self) -> Precision {
        if let Some((min, max)) = self.significant_bounds() {
            return Precision::Significant { min, max };
        }
        let (min, max) = self.fraction_bounds();
        Precision::Fraction { min, max }
    }

    /// Compact mantissas keep two significant digits below 10 and none after
    /// the point above.
    fn compact_precision(&self, mantissa: &Digits) -> Precision {
        if self.significant_bounds().is_some() || self.has_fraction_options() {
            return self.precision();
        }
        if mantissa.is_zero() || mantissa.magnitude() < 1 {
            Precision::Significant { min: 1, max: 2 }
        } else {
            Precision::Fraction { min: 0, max: 0 }
        }
    }

    fn render_standard(&self, mut digits: Digits) -> Rendered {
        let min_fraction = self.precision().apply(&mut digits);
        Rendered {
            text: self.render_digits(&digits, min_fraction, false),
            is_zero: digits.is_zero(),
            value: digits.to_f64(),
        }
    }

    /// Scientific (`step` 1) and engineering (`step` 3) notation.
    fn render_exponential(&self, digits: Digits, step: i32) -> Rendered {
        let precision = if self.significant_bounds().is_some() || self.has_fraction_options() {
            self.precision()
        } else {
            Precision::Fraction { min: 0, max: 3 }
        };
        let mut exponent = if digits.is_zero() {
            0
        } else {
            digits.magnitude().div_euclid(step) * step
        };
        let mut mantissa = digits.clone();
        mantissa.shift(-exponent);
        let mut min_fraction = precision.apply(&mut mantissa);
        if !mantissa.is_zero() && mantissa.magnitude() >= step {
            exponent += step;
            mantissa = digits;
            mantissa.shift(-exponent);
            min_fraction = precision.apply(&mut mantissa);
        }
        let text = format!(
            "{}E{exponent}",
            self.render_digits(&mantissa, min_fraction, false)
        );
        Rendered {
            text,
            is_zero: mantissa.is_zero(),
            value: mantissa.to_f64(),
        }
    }

    fn render_compact(&self, digits: Digits) -> Rendered {
        let magnitude = if digits.is_zero() { 0 } else { digits.magnitude() };
        let mut group = if magnitude >= 3 {
            magnitude.div_euclid(3).min(4)
        } else {
            0
        };
        let mut mantissa = digits.clone();
        mantissa.shift(-3 * group);
        let mut min_fraction = self.compact_precision(&mantissa).apply(&mut mantissa);
        if group < 4 && !mantissa.is_zero() && mantissa.magnitude() >= 3 {
            group += 1;
            mantissa = digits;
            mantissa.shift(-3 * group);
            min_fraction = self.compact_precision(&mantissa).apply(&mut mantissa);
        }
        let suffix = compact_suffix(group, self.options.compact_display);
        Rendered {
            text: format!("{}{suffix}", self.render_digits(&mantissa, min_fraction, true)),
            is_zero: mantissa.is_zero(),
            value: mantissa.to_f64(),
        }
    }

    fn render_digits(&self, digits: &Digits, min_fraction: usize, compact: bool) -> String {
        let (decimal_sep, group_sep) = number_separators(self.locale.language());
        let mut integer = digits.integer_part();
        if let Some(min_integer) = self.options.minimum_integer_digits {
            if integer.len() < min_integer {
                integer = format!("{}{integer}", "0".repeat(min_integer - integer.len()));
            }
        }
        let grouped = match self.options.use_grouping {
            Grouping::Off => false,
            Grouping::Always => true,
            Grouping::Min2 => integer.len() >= 5,
            Grouping::Auto if compact || min_two_grouping(self.locale.language()) => {
                integer.len() >= 5
            }
            Grouping::Auto => true,
        };
        let integer = if grouped {
            add_grouping(&integer, group_sep)
        } else {
            integer
        };

        let mut fraction = digits.fraction_part();
        while fraction.len() < min_fraction {
            fraction.push('0');
        }
        if fraction.is_empty() {
            integer
        } else {
            format!("{integer}{decimal_sep}{fraction}")
        }
    }

    fn with_affixes(&self, rendered: &Rendered) -> String {
        let body = &rendered.text;
        let language = self.locale.language();
        match self.options.style {
            NumberStyle::Decimal => body.clone(),
            NumberStyle::Percent => percent_pattern(body, language),
            NumberStyle::Unit => match self.options.unit.as_deref() {
                Some(unit) => self.unit_pattern(body, unit, rendered.value),
                None => body.clone(),
            },
            NumberStyle::Currency => match self.currency_code() {
                Some(code) => self.currency_pattern(body, &code, rendered.value),
                None => body.clone(),
            },
        }
    }

    fn is_singular(&self, value: f64) -> bool {
        self.locale.plural_category(PluralKind::Cardinal, value) == Category::One
    }

    fn unit_pattern(&self, body: &str, unit: &str, value: f64) -> String {
        let Some(names) = unit_names(unit) else {
            return format!("{body} {unit}");
        };
        let singular = self.is_singular(value);
        match self.options.unit_display {
            UnitDisplay::Narrow => format!("{body}{}", names.narrow),
            UnitDisplay::Short => {
                let short = if singular { names.short_one } else { names.short_other };
                if names.attached {
                    format!("{body}{short}")
                } else {
                    format!("{body} {short}")
                }
            }
            UnitDisplay::Long => {
                let long = if singular { names.long_one } else { names.long_other };
                format!("{body} {long}")
            }
        }
    }

    fn currency_pattern(&self, body: &str, code: &str, value: f64) -> String {
        let names = currency_names(code);
        let prefix = currency_before_amount(self.locale.language());
        let symbol = match self.options.currency_display {
            CurrencyDisplay::Name => {
                let name = match names {
                    Some(names) if self.is_singular(value) => names.one.to_string(),
                    Some(names) => names.other.to_string(),
                    None => code.to_string(),
                };
                return format!("{body} {name}");
            }
            CurrencyDisplay::Code => code,
            CurrencyDisplay::Symbol => names.map_or(code, |names| names.symbol),
            CurrencyDisplay::NarrowSymbol => names.map_or(code, |names| names.narrow),
        };
        let spaced = symbol.ends_with(|c: char| c.is_alphabetic());
        match (prefix, spaced) {
            (true, false) => format!("{symbol}{body}"),
            (true, true) => format!("{symbol}\u{a0}{body}"),
            (false, _) => format!("{body}\u{a0}{symbol}"),
        }
    }
}

// ============================================================================
// Locale data
// ============================================================================

/// Decimal and grouping separators for a language.
fn number_separators(language: &str) -> (&'static str, &'static str) {
    match language {
        // Comma decimal, period grouping
        "de" | "es" | "it" | "pt" | "nl" | "da" | "id" | "tr" | "el" | "ro" | "hr" | "sl"
        | "sr" | "vi" => (",", "."),

        // Comma decimal, space grouping
        "fr" => (",", "\u{202f}"),
        "ru" | "uk" | "pl" | "cs" | "sk" | "fi" | "sv" | "nb" | "no" | "hu" | "bg" => {
            (",", "\u{a0}")
        }

        // Period decimal, comma grouping (default English-like)
        _ => (".", ","),
    }
}

/// Languages that leave four-digit integers ungrouped.
fn min_two_grouping(language: &str) -> bool {
    matches!(language, "es" | "pl" | "pt" | "bg")
}

/// Add grouping separators to an integer string.
fn add_grouping(s: &str, sep: &str) -> String {
    let len = s.chars().count();
    if len <= 3 {
        return s.to_string();
    }
    let mut result = String::with_capacity(len + len * sep.len());
    for (i, c) in s.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push_str(sep);
        }
        result.push(c);
    }
    result
}

fn percent_pattern(body: &str, language: &str) -> String {
    match language {
        "de" | "fr" | "sv" | "nb" | "no" | "fi" | "da" | "cs" | "sk" | "ru" | "uk" | "es" => {
            format!("{body}\u{a0}%")
        }
        _ => format!("{body}%"),
    }
}

fn compact_suffix(group: i32, display: CompactDisplay) -> &'static str {
    match (group, display) {
        (1, CompactDisplay::Short) => "K",
        (2, CompactDisplay::Short) => "M",
        (3, CompactDisplay::Short) => "B",
        (4, CompactDisplay::Short) => "T",
        (1, CompactDisplay::Long) => " thousand",
        (2, CompactDisplay::Long) => " million",
        (3, CompactDisplay::Long) => " billion",
        (4, CompactDisplay::Long) => " trillion",
        _ => "",
    }
}

/// Symbol before the amount (English-style) unless the language puts it after.
fn currency_before_amount(language: &str) -> bool {
    !matches!(
        language,
        "de" | "fr"
            | "es"
            | "it"
            | "pt"
            | "nl"
            | "da"
            | "sv"
            | "no"
            | "nb"
            | "fi"
            | "pl"
            | "cs"
            | "sk"
            | "hu"
            | "ro"
            | "bg"
            | "el"
            | "ru"
            | "uk"
            | "vi"
    )
}

/// Minor unit digits of a currency.
fn currency_digits(code: &str) -> usize {
    match code {
        "JPY" | "KRW" | "VND" | "CLP" | "ISK" | "UGX" | "PYG" => 0,
        "BHD" | "KWD" | "OMR" | "JOD" | "TND" => 3,
        _ => 2,
    }
}

#[derive(Debug, Clone, Copy)]
struct CurrencyNames {
    symbol: &'static str,
    narrow: &'static str,
    one: &'static str,
    other: &'static str,
}

const fn currency(
    symbol: &'static str,
    narrow: &'static str,
    one: &'static str,
    other: &'static str,
) -> CurrencyNames {
    CurrencyNames {
        symbol,
        narrow,
        one,
        other,
    }
}

fn currency_names(code: &str) -> Option<CurrencyNames> {
    let names = match code {
        "USD" => currency("$", "$", "US dollar", "US dollars"),
        "EUR" => currency("€", "€", "euro", "euros"),
        "GBP" => currency("£", "£", "British pound", "British pounds"),
        "JPY" => currency("¥", "¥", "Japanese yen", "Japanese yen"),
        "CNY" => currency("CN¥", "¥", "Chinese yuan", "Chinese yuan"),
        "KRW" => currency("₩", "₩", "South Korean won", "South Korean won"),
        "INR" => currency("₹", "₹", "Indian rupee", "Indian rupees"),
        "RUB" => currency("RUB", "₽", "Russian ruble", "Russian rubles"),
        "BRL" => currency("R$", "R$", "Brazilian real", "Brazilian reals"),
        "CHF" => currency("CHF", "CHF", "Swiss franc", "Swiss francs"),
        "CAD" => currency("CA$", "$", "Canadian dollar", "Canadian dollars"),
        "AUD" => currency("A$", "$", "Australian dollar", "Australian dollars"),
        "HKD" => currency("HK$", "$", "Hong Kong dollar", "Hong Kong dollars"),
        "SGD" => currency("SGD", "$", "Singapore dollar", "Singapore dollars"),
        "NZD" => currency("NZ$", "$", "New Zealand dollar", "New Zealand dollars"),
        "MXN" => currency("MX$", "$", "Mexican peso", "Mexican pesos"),
        "TWD" => currency("NT$", "$", "New Taiwan dollar", "New Taiwan dollars"),
        "SEK" => currency("SEK", "kr", "Swedish krona", "Swedish kronor"),
        "NOK" => currency("NOK", "kr", "Norwegian krone", "Norwegian kroner"),
        "DKK" => currency("DKK", "kr", "Danish krone", "Danish kroner"),
        "PLN" => currency("PLN", "zł", "Polish zloty", "Polish zlotys"),
        "CZK" => currency("CZK", "Kč", "Czech koruna", "Czech korunas"),
        "THB" => currency("THB", "฿", "Thai baht", "Thai baht"),
        "ILS" => currency("₪", "₪", "Israeli new shekel", "Israeli new shekels"),
        "VND" => currency("₫", "₫", "Vietnamese dong", "Vietnamese dong"),
        _ => return None,
    };
    Some(names)
}

#[derive(Debug, Clone, Copy)]
struct UnitNames {
    short_one: &'static str,
    short_other: &'static str,
    narrow: &'static str,
    long_one: &'static str,
    long_other: &'static str,
    /// Short form written without a space, like `25%`.
    attached: bool,
}

const fn unit(
    short: (&'static str, &'static str),
    narrow: &'static str,
    long: (&'static str, &'static str),
) -> UnitNames {
    UnitNames {
        short_one: short.0,
        short_other: short.1,
        narrow,
        long_one: long.0,
        long_other: long.1,
        attached: false,
    }
}

const fn attached(symbol: &'static str, long: (&'static str, &'static str)) -> UnitNames {
    UnitNames {
        short_one: symbol,
        short_other: symbol,
        narrow: symbol,
        long_one: long.0,
        long_other: long.1,
        attached: true,
    }
}

/// English unit names. Accepts both `meter` and `length-meter` spellings.
fn unit_names(unit_id: &str) -> Option<UnitNames> {
    let names = match unit_id.split_once('-') {
        Some((category, rest)) if is_unit_category(category) => rest,
        _ => unit_id,
    };
    let names = match names {
        "percent" => attached("%", ("percent", "percent")),
        "celsius" => attached("°C", ("degree Celsius", "degrees Celsius")),
        "fahrenheit" => attached("°F", ("degree Fahrenheit", "degrees Fahrenheit")),
        "meter" => unit(("m", "m"), "m", ("meter", "meters")),
        "kilometer" => unit(("km", "km"), "km", ("kilometer", "kilometers")),
        "centimeter" => unit(("cm", "cm"), "cm", ("centimeter", "centimeters")),
        "millimeter" => unit(("mm", "mm"), "mm", ("millimeter", "millimeters")),
        "mile" => unit(("mi", "mi"), "mi", ("mile", "miles")),
        "foot" => unit(("ft", "ft"), "′", ("foot", "feet")),
        "inch" => unit(("in", "in"), "″", ("inch", "inches")),
        "kilogram" => unit(("kg", "kg"), "kg", ("kilogram", "kilograms")),
        "gram" => unit(("g", "g"), "g", ("gram", "grams")),
        "pound" => unit(("lb", "lb"), "lb", ("pound", "pounds")),
        "liter" => unit(("L", "L"), "L", ("liter", "liters")),
        "milliliter" => unit(("mL", "mL"), "mL", ("milliliter", "milliliters")),
        "second" => unit(("sec", "sec"), "s", ("second", "seconds")),
        "minute" => unit(("min", "min"), "m", ("minute", "minutes")),
        "hour" => unit(("hr", "hr"), "h", ("hour", "hours")),
        "day" => unit(("day", "days"), "d", ("day", "days")),
        "week" => unit(("wk", "wks"), "w", ("week", "weeks")),
        "month" => unit(("mth", "mths"), "m", ("month", "months")),
        "year" => unit(("yr", "yrs"), "y", ("year", "years")),
        "byte" => unit(("byte", "byte"), "B", ("byte", "bytes")),
        "kilobyte" => unit(("kB", "kB"), "kB", ("kilobyte", "kilobytes")),
        "megabyte" => unit(("MB", "MB"), "MB", ("megabyte", "megabytes")),
        "gigabyte" => unit(("GB", "GB"), "GB", ("gigabyte", "gigabytes")),
        "kilometer-per-hour" => unit(
            ("km/h", "km/h"),
            "km/h",
            ("kilometer per hour", "kilometers per hour"),
        ),
        "mile-per-hour" => unit(("mph", "mph"), "mph", ("mile per hour", "miles per hour")),
        _ => return None,
    };
    Some(names)
}

fn is_unit_category(category: &str) -> bool {
    matches!(
        category,
        "length" | "mass" | "volume" | "duration" | "digital" | "temperature" | "speed"
            | "concentr"
    )
}
