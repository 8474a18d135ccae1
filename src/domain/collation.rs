use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Dictionary order for titles, in three passes like a root-locale collator:
/// base letters without case or accents, then accents (unaccented first),
/// then case (lowercase first). The raw strings only break what is left.
pub fn compare_titles(left: &str, right: &str) -> Ordering {
    base_letters(left)
        .cmp(base_letters(right))
        .then_with(|| with_accents(left).cmp(with_accents(right)))
        .then_with(|| case_marks(left).cmp(case_marks(right)))
        .then_with(|| left.cmp(right))
}

fn base_letters(text: &str) -> impl Iterator<Item = char> {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn with_accents(text: &str) -> impl Iterator<Item = char> {
    text.nfd().flat_map(char::to_lowercase)
}

fn case_marks(text: &str) -> impl Iterator<Item = bool> {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(char::is_uppercase)
}
