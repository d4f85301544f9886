use serde::{Deserialize, Serialize};
use crate::models::LcgParameters;

/// Top-level YAML configuration. Every section is optional.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct CrackConfig {
    pub attack: Option<AttackSection>,
    pub cipher: Option<CipherSection>,
    pub lcg: Option<LcgSection>,
    pub timing: Option<TimingSection>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AttackSection {
    pub max_bruteforce_length: Option<usize>,
    pub charset: Option<String>,
    pub max_attempts: Option<u64>,
    pub threads: Option<usize>,
    /// Passwords tried before brute force, in order.
    pub wordlist: Option<Vec<String>>,
    /// Secrets tried against signed tokens, in order.
    pub secrets: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct CipherSection {
    pub xor_keys: Option<Vec<String>>,
    /// Also run the block-mode analyzer when breaking a ciphertext.
    pub analyze_blocks: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct LcgSection {
    pub catalog: Option<Vec<LcgParameters>>,
    pub predict: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct TimingSection {
    pub threshold: Option<f64>,
    pub max_length: Option<usize>,
    pub samples: Option<usize>,
    pub charset: Option<String>,
}
