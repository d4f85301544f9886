use std::collections::HashSet;

use data_encoding::{BASE64, HEXLOWER_PERMISSIVE};
use tracing::{debug, warn};

use crate::errors::CrackError;
use crate::models::{BlockAnalysis, EncodingHint, Weakness};

pub const BLOCK_SIZE: usize = 16;

/// Lengths checked by the key-size hint, with the hint text for each.
/// Divisibility says nothing reliable about the key; these are leads only.
const KEY_SIZE_HINTS: &[(usize, &str)] = &[
    (16, "Possible 64-bit key (weak)"),
    (24, "Possible 128-bit key"),
    (32, "Possible 192-bit key"),
    (48, "Possible 256-bit key (strong)"),
];

/// Hex if every character is a hex digit, Base64 otherwise.
pub fn decode_ciphertext(ciphertext: &str) -> Result<Vec<u8>, CrackError> {
    decode_ciphertext_as(ciphertext, EncodingHint::Auto)
}

/// Decode using the caller's hint. `Text` takes the bytes as they are.
pub fn decode_ciphertext_as(ciphertext: &str, hint: EncodingHint) -> Result<Vec<u8>, CrackError> {
    let trimmed = ciphertext.trim();
    if trimmed.is_empty() {
        return Err(CrackError::MalformedInput("Ciphertext is empty".into()));
    }
    match hint {
        EncodingHint::Hex => decode_hex(trimmed),
        EncodingHint::Base64 => decode_base64(trimmed),
        EncodingHint::Text => Ok(trimmed.as_bytes().to_vec()),
        EncodingHint::Auto if trimmed.chars().all(|c| c.is_ascii_hexdigit()) => decode_hex(trimmed),
        EncodingHint::Auto => decode_base64(trimmed),
    }
}

pub(crate) fn decode_hex(text: &str) -> Result<Vec<u8>, CrackError> {
    HEXLOWER_PERMISSIVE
        .decode(text.as_bytes())
        .map_err(|e| CrackError::MalformedInput(format!("Invalid hex: {}", e)))
}

pub(crate) fn decode_base64(text: &str) -> Result<Vec<u8>, CrackError> {
    BASE64
        .decode(text.as_bytes())
        .map_err(|e| CrackError::MalformedInput(format!("Invalid Base64: {}", e)))
}

/// Number of blocks that repeat an earlier block. A trailing partial block
/// is compared as-is.
pub fn count_repeated_blocks(data: &[u8], block_size: usize) -> usize {
    let mut seen = HashSet::new();
    data.chunks(block_size).filter(|block| !seen.insert(*block)).count()
}

/// Fingerprint a ciphertext for block-mode weaknesses, guessing its encoding.
pub fn analyze(ciphertext: &str) -> BlockAnalysis {
    analyze_as(ciphertext, EncodingHint::Auto)
}

/// Fingerprint a ciphertext for block-mode weaknesses.
///
/// The ECB check runs on the decoded bytes. Padding and key-size hints look
/// at the length of the input string as given, not the decoded length.
pub fn analyze_as(ciphertext: &str, hint: EncodingHint) -> BlockAnalysis {
    let mut analysis = BlockAnalysis::default();

    match decode_ciphertext_as(ciphertext, hint) {
        Ok(data) => {
            analysis.decoded_len = data.len();
            analysis.block_count = data.len().div_ceil(BLOCK_SIZE);
            analysis.repeated_blocks = count_repeated_blocks(&data, BLOCK_SIZE);
            if analysis.repeated_blocks > 0 {
                analysis.weaknesses.push(Weakness::EcbMode);
                analysis.recommendations.push("Use CBC or GCM mode instead".to_string());
            }
        }
        Err(e) => warn!(error = %e, "Could not decode ciphertext, skipping ECB check"),
    }

    let length = ciphertext.trim().len();
    if length > 0 && length % 8 == 0 {
        analysis.weaknesses.push(Weakness::WeakPadding);
    }

    for (size, description) in KEY_SIZE_HINTS {
        if length > 0 && length % size == 0 {
            analysis.key_size_hints.push(description.to_string());
        }
    }

    debug!(
        length,
        blocks = analysis.block_count,
        repeated = analysis.repeated_blocks,
        "Block analysis finished"
    );
    analysis
}
