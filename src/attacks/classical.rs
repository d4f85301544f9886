use data_encoding::BASE64;
use rayon::prelude::*;
use tracing::{debug, error, warn};

use super::blocks::{decode_base64, decode_hex};
use crate::config::AttackConfig;
use crate::errors::CrackError;
use crate::models::{Candidate, EncodingHint, Method};
use crate::scoring;

/// Decoding strategies, tried in this order. Results are concatenated, so the
/// order doubles as the tie-break when a caller keeps only the first result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherStrategy {
    Base64,
    Rot13,
    Caesar,
    Xor,
}

impl CipherStrategy {
    pub const ALL: [CipherStrategy; 4] = [
        CipherStrategy::Base64,
        CipherStrategy::Rot13,
        CipherStrategy::Caesar,
        CipherStrategy::Xor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Base64 => "base64",
            Self::Rot13 => "rot13",
            Self::Caesar => "caesar",
            Self::Xor => "xor",
        }
    }

    pub fn attempt(
        &self,
        ciphertext: &str,
        hint: EncodingHint,
        config: &AttackConfig,
    ) -> Result<Vec<Candidate>, CrackError> {
        match self {
            Self::Base64 => attempt_base64(ciphertext).map(|c| vec![c]),
            // ROT13 cannot fail, so its result is always kept
            Self::Rot13 => Ok(vec![Candidate::scored(Method::Rot13, rot13(ciphertext))]),
            Self::Caesar => Ok(attempt_caesar(ciphertext)),
            Self::Xor => attempt_xor(ciphertext, hint, &config.xor_keys),
        }
    }
}

/// Run every strategy against `ciphertext`, guessing its encoding.
pub fn break_cipher(ciphertext: &str, config: &AttackConfig) -> Result<Vec<Candidate>, CrackError> {
    break_cipher_as(ciphertext, EncodingHint::Auto, config)
}

/// Run every strategy in order. A recoverable failure skips that strategy
/// and the rest still run; any other error aborts the whole run.
pub fn break_cipher_as(
    ciphertext: &str,
    hint: EncodingHint,
    config: &AttackConfig,
) -> Result<Vec<Candidate>, CrackError> {
    let mut candidates = Vec::new();
    for strategy in CipherStrategy::ALL {
        match strategy.attempt(ciphertext, hint, config) {
            Ok(found) => {
                debug!(strategy = strategy.as_str(), kept = found.len(), "Strategy finished");
                candidates.extend(found);
            }
            Err(e) if e.is_recoverable() => {
                warn!(strategy = strategy.as_str(), error = %e, "Strategy skipped");
            }
            Err(e) => {
                error!(strategy = strategy.as_str(), error = %e, "Strategy failed, aborting");
                return Err(e);
            }
        }
    }
    Ok(candidates)
}

fn attempt_base64(ciphertext: &str) -> Result<Candidate, CrackError> {
    let mut compact: String = ciphertext.chars().filter(|c| !c.is_whitespace()).collect();
    while compact.len() % 4 != 0 {
        compact.push('=');
    }
    let decoded = BASE64
        .decode(compact.as_bytes())
        .map_err(|e| CrackError::MalformedInput(format!("Invalid Base64: {}", e)))?;
    let text = String::from_utf8(decoded)
        .map_err(|_| CrackError::MalformedInput("Base64 payload is not UTF-8".into()))?;
    if text.is_empty() || !text.chars().all(scoring::is_printable) {
        return Err(CrackError::MalformedInput("Base64 payload is not printable".into()));
    }
    Ok(Candidate::scored(Method::Base64, text))
}

fn attempt_caesar(ciphertext: &str) -> Vec<Candidate> {
    (1u8..=25)
        .into_par_iter()
        .map(|shift| Candidate::scored(Method::Caesar { shift }, caesar_decode(ciphertext, shift)))
        .filter(Candidate::is_plausible)
        .collect()
}

fn attempt_xor(ciphertext: &str, hint: EncodingHint, keys: &[String]) -> Result<Vec<Candidate>, CrackError> {
    if keys.iter().any(|k| k.is_empty()) {
        return Err(CrackError::Config("XOR keys must not be empty".into()));
    }
    Ok(keys
        .par_iter()
        .filter_map(|key| match xor_decode_as(ciphertext, key, hint) {
            Ok(text) => Some(Candidate::scored(Method::Xor { key: key.clone() }, text)),
            Err(e) => {
                debug!(key = %key, error = %e, "XOR decode failed");
                None
            }
        })
        .filter(Candidate::is_plausible)
        .collect())
}

fn shift_letter(c: char, shift: u8) -> char {
    let base = if c.is_ascii_lowercase() {
        b'a'
    } else if c.is_ascii_uppercase() {
        b'A'
    } else {
        return c;
    };
    let offset = (c as u8 - base + shift % 26) % 26;
    (base + offset) as char
}

/// Rotate ASCII letters forward by `shift`. Everything else passes through.
pub fn caesar_encode(text: &str, shift: u8) -> String {
    text.chars().map(|c| shift_letter(c, shift % 26)).collect()
}

pub fn caesar_decode(text: &str, shift: u8) -> String {
    text.chars().map(|c| shift_letter(c, 26 - shift % 26)).collect()
}

pub fn rot13(text: &str) -> String {
    caesar_encode(text, 13)
}

/// XOR with a repeating key. Hex input is decoded to bytes first, each result
/// byte mapping to the char with the same code point; otherwise the input
/// characters themselves are XORed with the key characters.
pub fn xor_decode(ciphertext: &str, key: &str) -> Result<String, CrackError> {
    xor_decode_as(ciphertext, key, EncodingHint::Auto)
}

/// XOR with a repeating key, decoding the input as `hint` says. `Hex` and
/// `Base64` XOR the decoded bytes, `Text` XORs the characters, and `Auto`
/// tries hex before falling back to characters.
pub fn xor_decode_as(ciphertext: &str, key: &str, hint: EncodingHint) -> Result<String, CrackError> {
    if key.is_empty() {
        return Err(CrackError::MalformedInput("XOR key is empty".into()));
    }
    match hint {
        EncodingHint::Hex => Ok(xor_bytes(&decode_hex(ciphertext.trim())?, key)),
        EncodingHint::Base64 => Ok(xor_bytes(&decode_base64(ciphertext.trim())?, key)),
        EncodingHint::Text => xor_chars(ciphertext, key),
        EncodingHint::Auto => match decode_hex(ciphertext) {
            Ok(bytes) => Ok(xor_bytes(&bytes, key)),
            Err(_) => xor_chars(ciphertext, key),
        },
    }
}

fn xor_bytes(bytes: &[u8], key: &str) -> String {
    bytes
        .iter()
        .zip(key.as_bytes().iter().cycle())
        .map(|(b, k)| char::from(b ^ k))
        .collect()
}

fn xor_chars(ciphertext: &str, key: &str) -> Result<String, CrackError> {
    ciphertext
        .chars()
        .zip(key.chars().cycle())
        .map(|(c, k)| {
            char::from_u32(c as u32 ^ k as u32).ok_or_else(|| {
                CrackError::MalformedInput(format!("XOR of {:?} with {:?} is not a char", c, k))
            })
        })
        .collect()
}

/// Hex encoding of `plaintext` XORed with a repeating `key`.
pub fn xor_encode_hex(plaintext: &str, key: &str) -> String {
    let bytes: Vec<u8> = plaintext
        .bytes()
        .zip(key.bytes().cycle())
        .map(|(b, k)| b ^ k)
        .collect();
    data_encoding::HEXLOWER.encode(&bytes)
}
