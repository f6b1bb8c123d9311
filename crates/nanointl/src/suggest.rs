//! "Did you mean" hints for misspelled keywords.

use strsim::damerau_levenshtein;

use crate::parser::{BUILTIN_EXTERNALS, Category};
use crate::plugins::NUMBER_STEMS;

/// Keywords a misspelling is matched against.
///
/// ```
/// use nanointl::Vocabulary;
///
/// let categories = Vocabulary::plural_categories();
/// assert_eq!(categories.suggest("oen"), vec!["one".to_string()]);
/// assert_eq!(categories.suggest("Other"), vec!["other".to_string()]);
/// assert!(categories.suggest("plural").is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    words: Vec<String>,
}

impl Vocabulary {
    /// Branch keys of `plural` and `selectordinal` arguments.
    pub fn plural_categories() -> Self {
        Category::ALL.map(Category::as_str).into_iter().collect()
    }

    /// Argument types the template grammar knows without plugins.
    pub fn argument_types() -> Self {
        ["plural", "selectordinal", "select"]
            .into_iter()
            .chain(BUILTIN_EXTERNALS.iter().copied())
            .collect()
    }

    /// Stems of `::` number skeletons.
    pub fn number_stems() -> Self {
        NUMBER_STEMS.iter().copied().collect()
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Known words within reach of `word`, nearest first, at most three.
    ///
    /// Case is ignored and swapping two neighboring letters is one edit.
    /// Every started run of three characters allows one edit. Ties keep
    /// alphabetical order; an exact match is never suggested.
    pub fn suggest(&self, word: &str) -> Vec<String> {
        let folded = word.to_lowercase();
        let reach = folded.chars().count().div_ceil(3).max(1);
        let mut near: Vec<(usize, &str)> = self
            .words()
            .filter(|known| *known != word)
            .map(|known| (damerau_levenshtein(&folded, &known.to_lowercase()), known))
            .filter(|(distance, _)| *distance <= reach)
            .collect();
        near.sort_unstable();
        near.dedup();
        near.into_iter()
            .take(3)
            .map(|(_, known)| known.to_string())
            .collect()
    }
}

impl<'a> FromIterator<&'a str> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = &'a str>>(words: I) -> Self {
        Self {
            words: words.into_iter().map(str::to_string).collect(),
        }
    }
}

impl<'a> Extend<&'a str> for Vocabulary {
    fn extend<I: IntoIterator<Item = &'a str>>(&mut self, words: I) {
        self.words.extend(words.into_iter().map(str::to_string));
    }
}

/// Render suggestions as an error-message suffix.
pub(crate) fn did_you_mean(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean: {}?)", suggestions.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transposed_letters_are_one_edit() {
        let stems = Vocabulary::number_stems();
        assert_eq!(stems.suggest("pecrent")[0], "percent");
    }

    #[test]
    fn reach_grows_with_word_length() {
        let types = Vocabulary::argument_types();
        assert_eq!(types.suggest("dat"), vec!["date".to_string()]);
        assert!(types.suggest("xy").is_empty());
        assert_eq!(types.suggest("selectordnl"), vec!["selectordinal".to_string()]);
    }

    #[test]
    fn ties_are_alphabetical() {
        let words: Vocabulary = ["bb", "ab", "cb"].into_iter().collect();
        assert_eq!(words.suggest("xb"), vec!["ab", "bb", "cb"]);
    }

    #[test]
    fn extended_words_are_candidates() {
        let mut types = Vocabulary::argument_types();
        types.extend(["currency-code"]);
        assert_eq!(types.suggest("currency-cod")[0], "currency-code");
    }
}
