use std::fmt;

use crate::errors::CrackError;
use super::defaults::DEFAULT_CHARSET;

/// An ordered set of characters. Duplicates are dropped, first occurrence wins,
/// so iteration order is the lexicographic order used by brute force.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Charset {
    chars: Vec<char>,
}

impl Charset {
    pub fn new(chars: &str) -> Result<Self, CrackError> {
        let mut ordered: Vec<char> = Vec::new();
        for c in chars.chars() {
            if !ordered.contains(&c) {
                ordered.push(c);
            }
        }
        if ordered.is_empty() {
            return Err(CrackError::Config("Charset must not be empty".into()));
        }
        Ok(Self { chars: ordered })
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

impl Default for Charset {
    fn default() -> Self {
        Self { chars: DEFAULT_CHARSET.chars().collect() }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.chars {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}
