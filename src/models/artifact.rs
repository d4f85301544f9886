use std::fmt;
use std::str::FromStr;

use data_encoding::HEXLOWER_PERMISSIVE;
use serde::{Deserialize, Serialize};
use crate::errors::CrackError;

/// Digest algorithms the hash cracker understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    Sha256,
}

impl HashAlgorithm {
    /// Digest length in bytes.
    pub fn digest_len(&self) -> usize {
        match self {
            Self::Md5 => 16,
            Self::Sha1 => 20,
            Self::Sha256 => 32,
        }
    }

    /// Only MD5 falls back to brute force once the wordlist is exhausted.
    /// SHA-1 and SHA-256 stop after the dictionary pass.
    pub fn supports_bruteforce(&self) -> bool {
        matches!(self, Self::Md5)
    }

    /// Guess the algorithm from the length of a hex digest.
    pub fn from_hex_len(len: usize) -> Option<Self> {
        match len {
            32 => Some(Self::Md5),
            40 => Some(Self::Sha1),
            64 => Some(Self::Sha256),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashAlgorithm {
    type Err = CrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "").as_str() {
            "md5" => Ok(Self::Md5),
            "sha1" => Ok(Self::Sha1),
            "sha256" => Ok(Self::Sha256),
            other => Err(CrackError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

/// A target digest. The algorithm tag is fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest {
    bytes: Vec<u8>,
    algorithm: HashAlgorithm,
}

impl Digest {
    pub fn new(bytes: Vec<u8>, algorithm: HashAlgorithm) -> Result<Self, CrackError> {
        if bytes.len() != algorithm.digest_len() {
            return Err(CrackError::MalformedInput(format!(
                "{} digest must be {} bytes, got {}",
                algorithm,
                algorithm.digest_len(),
                bytes.len()
            )));
        }
        Ok(Self { bytes, algorithm })
    }

    /// Parse a hex digest. Upper and lower case are both accepted.
    pub fn from_hex(hex: &str, algorithm: HashAlgorithm) -> Result<Self, CrackError> {
        let bytes = HEXLOWER_PERMISSIVE
            .decode(hex.trim().as_bytes())
            .map_err(|e| CrackError::MalformedInput(format!("Invalid hex digest: {}", e)))?;
        Self::new(bytes, algorithm)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    pub fn to_hex(&self) -> String {
        data_encoding::HEXLOWER.encode(&self.bytes)
    }
}

/// How the caller believes a ciphertext is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingHint {
    #[default]
    Auto,
    Hex,
    Base64,
    Text,
}

impl FromStr for EncodingHint {
    type Err = CrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "hex" => Ok(Self::Hex),
            "base64" | "b64" => Ok(Self::Base64),
            "text" | "raw" => Ok(Self::Text),
            other => Err(CrackError::Config(format!("Unknown encoding '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ciphertext {
    text: String,
    hint: EncodingHint,
}

impl Ciphertext {
    pub fn new(text: impl Into<String>, hint: EncodingHint) -> Self {
        Self { text: text.into(), hint }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn hint(&self) -> EncodingHint {
        self.hint
    }
}

/// The three raw (still encoded) segments of a `header.payload.signature` token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    header: String,
    payload: String,
    signature: String,
}

impl Token {
    pub fn parse(token: &str) -> Result<Self, CrackError> {
        let parts: Vec<&str> = token.trim().split('.').collect();
        if parts.len() != 3 {
            return Err(CrackError::MalformedInput(format!(
                "Token must have 3 segments, got {}",
                parts.len()
            )));
        }
        if parts[0].is_empty() || parts[1].is_empty() {
            return Err(CrackError::MalformedInput("Token header or payload is empty".into()));
        }
        Ok(Self {
            header: parts[0].to_string(),
            payload: parts[1].to_string(),
            signature: parts[2].to_string(),
        })
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// The bytes covered by the signature: `header.payload`.
    pub fn signing_input(&self) -> String {
        format!("{}.{}", self.header, self.payload)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.header, self.payload, self.signature)
    }
}

/// Anything the engine can be asked to attack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artifact {
    Digest(Digest),
    Ciphertext(Ciphertext),
    ObservedSequence(Vec<i64>),
    Token(Token),
}

impl Artifact {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Digest(_) => "digest",
            Self::Ciphertext(_) => "ciphertext",
            Self::ObservedSequence(_) => "observed_sequence",
            Self::Token(_) => "token",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_from_hex_accepts_uppercase() {
        let lower = Digest::from_hex("5f4dcc3b5aa765d61d8327deb882cf99", HashAlgorithm::Md5).unwrap();
        let upper = Digest::from_hex("5F4DCC3B5AA765D61D8327DEB882CF99", HashAlgorithm::Md5).unwrap();
        assert_eq!(lower, upper);
        assert_eq!(lower.to_hex(), "5f4dcc3b5aa765d61d8327deb882cf99");
    }

    #[test]
    fn test_digest_rejects_wrong_length() {
        let err = Digest::from_hex("abcd", HashAlgorithm::Sha1).unwrap_err();
        assert!(matches!(err, CrackError::MalformedInput(_)));
    }

    #[test]
    fn test_digest_rejects_non_hex() {
        assert!(Digest::from_hex("zz", HashAlgorithm::Md5).is_err());
    }

    #[test]
    fn test_algorithm_from_hex_len() {
        assert_eq!(HashAlgorithm::from_hex_len(32), Some(HashAlgorithm::Md5));
        assert_eq!(HashAlgorithm::from_hex_len(40), Some(HashAlgorithm::Sha1));
        assert_eq!(HashAlgorithm::from_hex_len(64), Some(HashAlgorithm::Sha256));
        assert_eq!(HashAlgorithm::from_hex_len(12), None);
    }

    #[test]
    fn test_algorithm_from_str() {
        assert_eq!("SHA-256".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha256);
        assert_eq!("md5".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Md5);
        assert!("crc32".parse::<HashAlgorithm>().is_err());
    }

    #[test]
    fn test_only_md5_brute_forces() {
        assert!(HashAlgorithm::Md5.supports_bruteforce());
        assert!(!HashAlgorithm::Sha1.supports_bruteforce());
        assert!(!HashAlgorithm::Sha256.supports_bruteforce());
    }

    #[test]
    fn test_token_parse_segments() {
        let token = Token::parse("aGVhZA.Ym9keQ.c2ln").unwrap();
        assert_eq!(token.header(), "aGVhZA");
        assert_eq!(token.payload(), "Ym9keQ");
        assert_eq!(token.signature(), "c2ln");
        assert_eq!(token.signing_input(), "aGVhZA.Ym9keQ");
        assert_eq!(token.to_string(), "aGVhZA.Ym9keQ.c2ln");
    }

    #[test]
    fn test_token_parse_allows_empty_signature() {
        let token = Token::parse("aGVhZA.Ym9keQ.").unwrap();
        assert!(token.signature().is_empty());
    }

    #[test]
    fn test_token_parse_rejects_two_segments() {
        assert!(Token::parse("a.b").is_err());
        assert!(Token::parse(".b.c").is_err());
    }

    #[test]
    fn test_encoding_hint_from_str() {
        assert_eq!("HEX".parse::<EncodingHint>().unwrap(), EncodingHint::Hex);
        assert_eq!("b64".parse::<EncodingHint>().unwrap(), EncodingHint::Base64);
        assert!(matches!("utf16".parse::<EncodingHint>(), Err(CrackError::Config(_))));
    }
}
