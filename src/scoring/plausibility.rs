//! Cheap "is this probably text?" heuristic.
//!
//! The scorer favours recall: decoded results are shown to a human, so a
//! false positive costs a glance while a false negative hides the answer.

use crate::models::ScoreResult;

pub const MIN_PRINTABLE_RATIO: f64 = 0.8;

pub const COMMON_WORDS: &[&str] = &[
    "the", "and", "you", "that", "was", "for", "are", "with", "his", "they",
];

pub const HINT_WORDS: &[&str] = &["admin", "password", "user", "flag"];

/// Invisible formatting characters (Unicode category Cf) that turn up in
/// XOR output: soft hyphen, zero-width and bidi controls, BOM.
const FORMAT_CHARS: &[(char, char)] = &[
    ('\u{00AD}', '\u{00AD}'),
    ('\u{0600}', '\u{0605}'),
    ('\u{061C}', '\u{061C}'),
    ('\u{180E}', '\u{180E}'),
    ('\u{200B}', '\u{200F}'),
    ('\u{202A}', '\u{202E}'),
    ('\u{2060}', '\u{206F}'),
    ('\u{FEFF}', '\u{FEFF}'),
    ('\u{FFF9}', '\u{FFFB}'),
];

/// Control characters (including tab and newline), separators other than
/// the ASCII space, format characters and private-use code points are not
/// printable.
pub fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    !(c.is_control()
        || c.is_whitespace()
        || ('\u{E000}'..='\u{F8FF}').contains(&c)
        || FORMAT_CHARS.iter().any(|(lo, hi)| (*lo..=*hi).contains(&c)))
}

pub fn printable_ratio(text: &str) -> f64 {
    let total = text.chars().count();
    if total == 0 {
        return 0.0;
    }
    let printable = text.chars().filter(|c| is_printable(*c)).count();
    printable as f64 / total as f64
}

/// Score a candidate plaintext. Word matching is case-insensitive substring
/// matching, so "feathers" counts as a hit for "the".
pub fn score(text: &str) -> ScoreResult {
    if text.is_empty() {
        return ScoreResult::implausible(0.0);
    }

    let ratio = printable_ratio(text);
    if ratio < MIN_PRINTABLE_RATIO {
        return ScoreResult::implausible(ratio);
    }

    let lower = text.to_lowercase();
    let dictionary_word_hits = COMMON_WORDS.iter().filter(|w| lower.contains(*w)).count();
    let hint_word_hits = HINT_WORDS.iter().filter(|w| lower.contains(*w)).count();

    ScoreResult {
        printable_ratio: ratio,
        dictionary_word_hits,
        hint_word_hits,
        is_plausible: dictionary_word_hits > 0 || hint_word_hits > 0,
    }
}
