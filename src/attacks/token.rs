use std::fmt;
use std::str::FromStr;

use data_encoding::BASE64URL_NOPAD;
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Sha256, Sha384, Sha512};
use tracing::{debug, info, warn};

use crate::errors::CrackError;
use crate::models::{Candidate, Method, Token};

/// Signing algorithms a token header may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenAlgorithm {
    None,
    Hs256,
    Hs384,
    Hs512,
}

impl TokenAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Hs256 => "HS256",
            Self::Hs384 => "HS384",
            Self::Hs512 => "HS512",
        }
    }

    pub fn is_symmetric(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for TokenAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenAlgorithm {
    type Err = CrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "NONE" => Ok(Self::None),
            "HS256" => Ok(Self::Hs256),
            "HS384" => Ok(Self::Hs384),
            "HS512" => Ok(Self::Hs512),
            _ => Err(CrackError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHeader {
    pub alg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,
}

impl TokenHeader {
    fn jwt(alg: TokenAlgorithm) -> Self {
        Self { alg: alg.as_str().to_string(), typ: Some("JWT".to_string()) }
    }
}

/// A token with its header and payload decoded.
#[derive(Debug, Clone)]
pub struct DecodedToken {
    pub header: TokenHeader,
    pub payload: Value,
    pub signature: Vec<u8>,
}

pub fn encode_segment(bytes: &[u8]) -> String {
    BASE64URL_NOPAD.encode(bytes)
}

/// Decode a Base64url segment, tolerating stray `=` padding.
pub fn decode_segment(segment: &str) -> Result<Vec<u8>, CrackError> {
    BASE64URL_NOPAD
        .decode(segment.trim_end_matches('=').as_bytes())
        .map_err(|e| CrackError::MalformedInput(format!("Invalid Base64url segment: {}", e)))
}

pub fn decode_token(token: &str) -> Result<DecodedToken, CrackError> {
    decode_parts(&Token::parse(token)?)
}

fn decode_parts(token: &Token) -> Result<DecodedToken, CrackError> {
    let header: TokenHeader = serde_json::from_slice(&decode_segment(token.header())?)?;
    let payload: Value = serde_json::from_slice(&decode_segment(token.payload())?)?;
    let signature = decode_segment(token.signature())?;
    Ok(DecodedToken { header, payload, signature })
}

/// Build an unsigned token declaring `alg: none`. Verifiers that trust the
/// declared algorithm accept it without a signature.
pub fn forge_none_algorithm(payload: &Map<String, Value>) -> Result<String, CrackError> {
    let header = serde_json::to_vec(&TokenHeader::jwt(TokenAlgorithm::None))?;
    let body = serde_json::to_vec(payload)?;
    Ok(format!("{}.{}.", encode_segment(&header), encode_segment(&body)))
}

fn keyed<M: Mac + KeyInit>(secret: &[u8], input: &[u8]) -> Result<M, CrackError> {
    let mut mac = <M as Mac>::new_from_slice(secret)
        .map_err(|e| CrackError::Internal(format!("HMAC key rejected: {}", e)))?;
    mac.update(input);
    Ok(mac)
}

fn sign(alg: TokenAlgorithm, secret: &[u8], input: &[u8]) -> Result<Vec<u8>, CrackError> {
    let tag = match alg {
        TokenAlgorithm::Hs256 => keyed::<Hmac<Sha256>>(secret, input)?.finalize().into_bytes().to_vec(),
        TokenAlgorithm::Hs384 => keyed::<Hmac<Sha384>>(secret, input)?.finalize().into_bytes().to_vec(),
        TokenAlgorithm::Hs512 => keyed::<Hmac<Sha512>>(secret, input)?.finalize().into_bytes().to_vec(),
        TokenAlgorithm::None => return Err(CrackError::UnsupportedAlgorithm(alg.to_string())),
    };
    Ok(tag)
}

/// Constant-time signature check.
fn verify(alg: TokenAlgorithm, secret: &[u8], input: &[u8], signature: &[u8]) -> Result<bool, CrackError> {
    let ok = match alg {
        TokenAlgorithm::Hs256 => keyed::<Hmac<Sha256>>(secret, input)?.verify_slice(signature).is_ok(),
        TokenAlgorithm::Hs384 => keyed::<Hmac<Sha384>>(secret, input)?.verify_slice(signature).is_ok(),
        TokenAlgorithm::Hs512 => keyed::<Hmac<Sha512>>(secret, input)?.verify_slice(signature).is_ok(),
        TokenAlgorithm::None => return Err(CrackError::UnsupportedAlgorithm(alg.to_string())),
    };
    Ok(ok)
}

/// Sign `payload` with an HMAC secret, e.g. to re-issue a modified token
/// once its secret is known.
pub fn sign_token(payload: &Map<String, Value>, secret: &str, alg: TokenAlgorithm) -> Result<String, CrackError> {
    if !alg.is_symmetric() {
        return Err(CrackError::UnsupportedAlgorithm(alg.to_string()));
    }
    let header = serde_json::to_vec(&TokenHeader::jwt(alg))?;
    let body = serde_json::to_vec(payload)?;
    let signing_input = format!("{}.{}", encode_segment(&header), encode_segment(&body));
    let signature = sign(alg, secret.as_bytes(), signing_input.as_bytes())?;
    Ok(format!("{}.{}", signing_input, encode_segment(&signature)))
}

/// Check `token` against one secret. Malformed tokens are an error.
pub fn verify_secret(token: &str, secret: &str) -> Result<bool, CrackError> {
    let parsed = Token::parse(token)?;
    let decoded = decode_parts(&parsed)?;
    let alg: TokenAlgorithm = decoded.header.alg.parse()?;
    verify(alg, secret.as_bytes(), parsed.signing_input().as_bytes(), &decoded.signature)
}

/// Try each secret in order under the token's declared algorithm. The first
/// one that verifies wins. Signature mismatches and malformed tokens both just
/// move on to the next candidate, so `None` covers "not in the wordlist" and
/// "cannot be cracked this way".
pub fn crack_secret(token: &str, wordlist: &[String]) -> Option<Candidate> {
    info!(candidates = wordlist.len(), "Starting token secret crack");
    for (i, secret) in wordlist.iter().enumerate() {
        match verify_secret(token, secret) {
            Ok(true) => {
                info!(position = i + 1, "Token secret found");
                return Some(Candidate::exact(Method::TokenSecret, secret.clone(), i as u64 + 1));
            }
            Ok(false) => {}
            Err(e) => debug!(position = i + 1, error = %e, "Verification failed, trying next"),
        }
    }
    warn!(candidates = wordlist.len(), "Token secret not found");
    None
}
