use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use super::score::ScoreResult;
use crate::scoring;

/// Which strategy produced a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Method {
    Dictionary,
    BruteForce,
    Base64,
    Rot13,
    Caesar { shift: u8 },
    Xor { key: String },
    TokenSecret,
    Arithmetic,
    KnownAnswer,
    FallbackGuess,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Dictionary => f.write_str("dictionary"),
            Method::BruteForce => f.write_str("bruteforce"),
            Method::Base64 => f.write_str("base64"),
            Method::Rot13 => f.write_str("rot13"),
            Method::Caesar { shift } => write!(f, "caesar_shift_{}", shift),
            Method::Xor { key } => write!(f, "xor_{}", key),
            Method::TokenSecret => f.write_str("token_secret"),
            Method::Arithmetic => f.write_str("arithmetic"),
            Method::KnownAnswer => f.write_str("known_answer"),
            Method::FallbackGuess => f.write_str("fallback_guess"),
        }
    }
}

impl Serialize for Method {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// How much a candidate can be trusted, ordered from strongest to weakest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Proven by equality: digest match or signature verification.
    Exact,
    /// Computed deterministically from the input (e.g. an arithmetic challenge).
    Derived,
    /// Passed the plausibility heuristic.
    Plausible,
    /// Emitted without passing the heuristic (ROT13 always is).
    Implausible,
    /// A fallback answer with no evidence behind it.
    Guess,
}

impl Confidence {
    /// Lower is stronger. Exact = 0 .. Guess = 4.
    pub fn rank(&self) -> u8 {
        match self {
            Confidence::Exact => 0,
            Confidence::Derived => 1,
            Confidence::Plausible => 2,
            Confidence::Implausible => 3,
            Confidence::Guess => 4,
        }
    }

    pub fn from_score(score: &ScoreResult) -> Self {
        if score.is_plausible {
            Confidence::Plausible
        } else {
            Confidence::Implausible
        }
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self, Confidence::Exact | Confidence::Derived)
    }
}

/// A recovered plaintext, preimage, or secret.
#[derive(Debug, Clone, Serialize)]
pub struct Candidate {
    pub method: Method,
    pub value: String,
    pub confidence: Confidence,
    /// Present for every heuristically gated candidate.
    pub score: Option<ScoreResult>,
    /// 1-based position of this candidate in the search order, counting the
    /// hit itself. The first wordlist entry is 1.
    pub attempts: Option<u64>,
}

impl Candidate {
    /// A candidate proven by equality; it skips scoring.
    pub fn exact(method: Method, value: impl Into<String>, attempts: u64) -> Self {
        Self {
            method,
            value: value.into(),
            confidence: Confidence::Exact,
            score: None,
            attempts: Some(attempts),
        }
    }

    /// Score `value` and derive the confidence from that score.
    pub fn scored(method: Method, value: impl Into<String>) -> Self {
        let value = value.into();
        let score = scoring::score(&value);
        Self {
            method,
            confidence: Confidence::from_score(&score),
            value,
            score: Some(score),
            attempts: None,
        }
    }

    pub fn derived(method: Method, value: impl Into<String>) -> Self {
        Self {
            method,
            value: value.into(),
            confidence: Confidence::Derived,
            score: None,
            attempts: None,
        }
    }

    pub fn guess(value: impl Into<String>) -> Self {
        Self {
            method: Method::FallbackGuess,
            value: value.into(),
            confidence: Confidence::Guess,
            score: None,
            attempts: None,
        }
    }

    pub fn is_plausible(&self) -> bool {
        self.score.as_ref().map_or(false, |s| s.is_plausible)
    }
}
