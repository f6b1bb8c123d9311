//! CLDR plural category resolution.
//!
//! Plural rules are cached per thread, per locale and per rule type, so
//! repeated formatting does not rebuild `PluralRules` instances. Locales the
//! compiled data does not cover resolve everything to `other` and log a
//! warning once per thread.

use std::cell::RefCell;

use icu_locale_core::Locale;
use icu_plurals::{PluralCategory, PluralOperands, PluralRuleType, PluralRules, RawPluralOperands};
use tracing::warn;

use crate::parser::{Category, PluralKind};

type CacheEntry = (String, PluralKind, Option<PluralRules>);

thread_local! {
    /// Per-thread cache of `PluralRules` keyed by locale tag and rule type.
    static PLURAL_RULES_CACHE: RefCell<Vec<CacheEntry>> = const { RefCell::new(Vec::new()) };
}

fn build_rules(locale: &Locale, kind: PluralKind) -> Option<PluralRules> {
    let rule_type = match kind {
        PluralKind::Cardinal => PluralRuleType::Cardinal,
        PluralKind::Ordinal => PluralRuleType::Ordinal,
    };
    match PluralRules::try_new(locale.clone().into(), rule_type.into()) {
        Ok(rules) => Some(rules),
        Err(error) => {
            warn!(locale = %locale, ?kind, %error, "plural rules unavailable, using 'other'");
            None
        }
    }
}

fn category_from(category: PluralCategory) -> Category {
    match category {
        PluralCategory::Zero => Category::Zero,
        PluralCategory::One => Category::One,
        PluralCategory::Two => Category::Two,
        PluralCategory::Few => Category::Few,
        PluralCategory::Many => Category::Many,
        PluralCategory::Other => Category::Other,
    }
}

fn select(rules: Option<&PluralRules>, n: f64) -> Category {
    let Some(rules) = rules else {
        return Category::Other;
    };
    if !n.is_finite() {
        return Category::Other;
    }
    let abs = n.abs();
    let category = if abs.fract() == 0.0 && abs < 9.0e15 {
        rules.category_for(abs as i64)
    } else {
        rules.category_for(decimal_operands(abs))
    };
    category_from(category)
}

/// Operands of a non-negative number from its shortest decimal text.
///
/// Fraction digits past the 18th are dropped.
fn decimal_operands(abs: f64) -> PluralOperands {
    let text = abs.to_string();
    let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let fraction = fraction.get(..18).unwrap_or(fraction);
    let trimmed = fraction.trim_end_matches('0');
    RawPluralOperands {
        i: integer.parse().unwrap_or(u64::MAX),
        v: fraction.len(),
        w: trimmed.len(),
        f: fraction.parse().unwrap_or(0),
        t: trimmed.parse().unwrap_or(0),
        c: 0,
    }
    .into()
}

/// Get the CLDR plural category for `n` in `locale`.
///
/// # Examples
///
/// ```
/// use icu_locale_core::Locale;
/// use nanointl::format::plural_category;
/// use nanointl::parser::{Category, PluralKind};
///
/// let en: Locale = "en".parse().unwrap();
/// assert_eq!(plural_category(&en, PluralKind::Cardinal, 1.0), Category::One);
/// assert_eq!(plural_category(&en, PluralKind::Cardinal, 2.0), Category::Other);
/// assert_eq!(plural_category(&en, PluralKind::Ordinal, 2.0), Category::Two);
///
/// let ru: Locale = "ru".parse().unwrap();
/// assert_eq!(plural_category(&ru, PluralKind::Cardinal, 5.0), Category::Many);
/// ```
pub fn plural_category(locale: &Locale, kind: PluralKind, n: f64) -> Category {
    let tag = locale.to_string();
    PLURAL_RULES_CACHE.with_borrow_mut(|cache| {
        if let Some((_, _, rules)) = cache
            .iter()
            .find(|(cached, cached_kind, _)| *cached == tag && *cached_kind == kind)
        {
            return select(rules.as_ref(), n);
        }
        let rules = build_rules(locale, kind);
        let category = select(rules.as_ref(), n);
        cache.push((tag, kind, rules));
        category
    })
}
