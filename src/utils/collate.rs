//! Human-friendly string ordering.
//!
//! Approximates a locale collation without a locale database: strings are
//! compared on their ASCII transliteration, ignoring case and punctuation
//! first, then on case (lowercase first), then on the raw text.

use deunicode::deunicode;
use std::cmp::Ordering;

/// Compare two strings the way a reader expects a sorted list to look.
///
/// `"apple" < "Banana" < "café" < "Zeta"`.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| case_key(a).cmp(&case_key(b)))
        .then_with(|| a.cmp(b))
}

/// Base letters and digits only, case-folded.
fn primary_key(s: &str) -> String {
    deunicode(s)
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Lowercase sorts before uppercase at the same position.
fn case_key(s: &str) -> Vec<bool> {
    s.chars()
        .filter(|c| c.is_alphabetic())
        .map(char::is_uppercase)
        .collect()
}
