use serde::{Deserialize, Serialize};

/// Outcome of the plaintext plausibility heuristic for one decoded text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Share of printable characters, in `[0, 1]`.
    pub printable_ratio: f64,
    /// Number of common English words found.
    pub dictionary_word_hits: usize,
    /// Number of domain hint words ("admin", "flag", ...) found.
    pub hint_word_hits: usize,
    pub is_plausible: bool,
}

impl ScoreResult {
    pub fn implausible(printable_ratio: f64) -> Self {
        Self {
            printable_ratio,
            dictionary_word_hits: 0,
            hint_word_hits: 0,
            is_plausible: false,
        }
    }
}
