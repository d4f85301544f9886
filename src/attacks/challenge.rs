use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info, warn};

use crate::models::{Candidate, Method};

static ARITHMETIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(-?\d+)\s*([+\-*/xX×])\s*(-?\d+)").expect("arithmetic pattern is valid")
});

const KNOWN_ANSWERS: &[(&str, &str)] = &[
    ("What is the name of the company behind the Juice Shop?", "OWASP"),
    ("What is the first name of the person who started the OWASP Juice Shop project?", "Björn"),
    ("What is the answer to the Ultimate Question of Life, the Universe and Everything?", "42"),
    ("How many main characters are there in the Dunder Mifflin Scranton sitcom?", "9"),
    ("What is the name of the authentication method that does not require a password?", "OAuth"),
];

/// Most common answer across known challenges. Only ever returned as a guess.
const FALLBACK_ANSWER: &str = "42";

/// Evaluate the first `a <op> b` expression in `question`.
pub fn solve_arithmetic(question: &str) -> Option<i64> {
    let caps = ARITHMETIC.captures(question)?;
    let a: i64 = caps[1].parse().ok()?;
    let b: i64 = caps[3].parse().ok()?;
    match &caps[2] {
        "+" => a.checked_add(b),
        "-" => a.checked_sub(b),
        "*" | "x" | "X" | "×" => a.checked_mul(b),
        "/" => a.checked_div(b),
        _ => None,
    }
}

fn lookup_known(question: &str) -> Option<&'static str> {
    let trimmed = question.trim();
    if let Some((_, answer)) = KNOWN_ANSWERS.iter().find(|(q, _)| *q == trimmed) {
        return Some(answer);
    }

    // Keyword fallbacks only apply to questions phrased the expected way
    let lower = trimmed.to_lowercase();
    if trimmed.contains("What is") {
        if lower.contains("ultimate question") {
            return Some("42");
        }
        if lower.contains("owasp") {
            return Some("OWASP");
        }
    }
    if trimmed.contains("How many") && lower.contains("main characters") && lower.contains("dunder mifflin") {
        return Some("9");
    }
    None
}

/// Answer a challenge question. Arithmetic and known questions come back as
/// derived answers. With `allow_guess`, an unsolvable question yields the
/// most common fallback answer tagged as a guess; otherwise `None`.
pub fn solve_challenge(question: &str, allow_guess: bool) -> Option<Candidate> {
    if let Some(value) = solve_arithmetic(question) {
        info!(answer = value, "Solved arithmetic challenge");
        return Some(Candidate::derived(Method::Arithmetic, value.to_string()));
    }

    if let Some(answer) = lookup_known(question) {
        info!(answer, "Answered known challenge");
        return Some(Candidate::derived(Method::KnownAnswer, answer));
    }

    if allow_guess {
        warn!(guess = FALLBACK_ANSWER, "No solver matched, returning fallback guess");
        return Some(Candidate::guess(FALLBACK_ANSWER));
    }

    debug!("No solver matched challenge");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Confidence;

    #[test]
    fn test_arithmetic_operators() {
        assert_eq!(solve_arithmetic("What is 3+7?"), Some(10));
        assert_eq!(solve_arithmetic("12 - 20 = ?"), Some(-8));
        assert_eq!(solve_arithmetic("6*7"), Some(42));
        assert_eq!(solve_arithmetic("9 / 2"), Some(4));
    }

    #[test]
    fn test_operator_is_taken_from_expression() {
        // The '-' in the prefix must not change the operation
        assert_eq!(solve_arithmetic("Anti-bot check: 5 + 5"), Some(10));
    }

    #[test]
    fn test_division_by_zero_is_unsolved() {
        assert_eq!(solve_arithmetic("1/0"), None);
        assert!(solve_challenge("1/0", false).is_none());
    }

    #[test]
    fn test_known_answer() {
        let c = solve_challenge("What is the name of the company behind the Juice Shop?", false).unwrap();
        assert_eq!(c.value, "OWASP");
        assert_eq!(c.method, Method::KnownAnswer);
        assert_eq!(c.confidence, Confidence::Derived);
    }

    #[test]
    fn test_known_answer_by_pattern() {
        let c = solve_challenge("Quick! What is the reply to the Ultimate Question?", false).unwrap();
        assert_eq!(c.value, "42");
        let c = solve_challenge("Tell me: What is OWASP short for?", false).unwrap();
        assert_eq!(c.value, "OWASP");
    }

    #[test]
    fn test_keyword_needs_question_phrase() {
        assert!(solve_challenge("Tell me the Ultimate Question answer", false).is_none());
    }

    #[test]
    fn test_juice_shop_founder() {
        let c = solve_challenge(
            "What is the first name of the person who started the OWASP Juice Shop project?",
            false,
        )
        .unwrap();
        assert_eq!(c.value, "Björn");
        assert_eq!(c.method, Method::KnownAnswer);
    }

    #[test]
    fn test_unsolvable_without_guess_is_none() {
        assert!(solve_challenge("What colour is the sky?", false).is_none());
    }

    #[test]
    fn test_guess_is_labeled() {
        let c = solve_challenge("What colour is the sky?", true).unwrap();
        assert_eq!(c.confidence, Confidence::Guess);
        assert_eq!(c.method, Method::FallbackGuess);
        assert!(!c.confidence.is_confirmed());
    }
}
