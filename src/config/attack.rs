use crate::errors::CrackError;
use crate::models::LcgParameters;
use crate::wordlist::{common_passwords, common_secrets, Charset, DEFAULT_CHARSET};
use super::types::CrackConfig;

pub const DEFAULT_MAX_BRUTEFORCE_LENGTH: usize = 5;
pub const MAX_BRUTEFORCE_LENGTH: usize = 8;
pub const DEFAULT_XOR_KEYS: &[&str] = &["key", "password", "secret", "admin"];
pub const DEFAULT_TIMING_THRESHOLD: f64 = 0.10;
pub const DEFAULT_TIMING_MAX_LENGTH: usize = 20;
pub const DEFAULT_PREDICTION_COUNT: usize = 10;

/// Runtime settings shared by every attack. Built from defaults, a YAML file,
/// and CLI flags, in that order of precedence (last wins).
#[derive(Debug, Clone)]
pub struct AttackConfig {
    /// Dictionary order matters: the first match wins.
    pub wordlist: Vec<String>,
    pub secrets: Vec<String>,
    pub max_bruteforce_length: usize,
    pub charset: String,
    /// Upper bound on candidates tested by the hash cracker.
    pub max_attempts: Option<u64>,
    /// Worker threads; 0 means one per core.
    pub threads: usize,
    pub xor_keys: Vec<String>,
    pub analyze_blocks: bool,
    pub lcg_catalog: Vec<LcgParameters>,
    /// How many future values the LCG engine predicts.
    pub prediction_count: usize,
    pub timing: TimingConfig,
}

#[derive(Debug, Clone)]
pub struct TimingConfig {
    pub threshold: f64,
    pub max_length: usize,
    pub samples: usize,
    pub charset: String,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_TIMING_THRESHOLD,
            max_length: DEFAULT_TIMING_MAX_LENGTH,
            samples: 1,
            charset: "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789".to_string(),
        }
    }
}

impl Default for AttackConfig {
    fn default() -> Self {
        Self {
            wordlist: common_passwords(),
            secrets: common_secrets(),
            max_bruteforce_length: DEFAULT_MAX_BRUTEFORCE_LENGTH,
            charset: DEFAULT_CHARSET.to_string(),
            max_attempts: None,
            threads: 0,
            xor_keys: DEFAULT_XOR_KEYS.iter().map(|s| s.to_string()).collect(),
            analyze_blocks: true,
            lcg_catalog: LcgParameters::catalog(),
            prediction_count: DEFAULT_PREDICTION_COUNT,
            timing: TimingConfig::default(),
        }
    }
}

impl AttackConfig {
    /// Defaults overlaid with whatever the file configures.
    pub fn from_file_config(file: &CrackConfig) -> Self {
        let mut config = Self::default();
        if let Some(attack) = &file.attack {
            if let Some(v) = attack.max_bruteforce_length {
                config.max_bruteforce_length = v;
            }
            if let Some(v) = &attack.charset {
                config.charset = v.clone();
            }
            if attack.max_attempts.is_some() {
                config.max_attempts = attack.max_attempts;
            }
            if let Some(v) = attack.threads {
                config.threads = v;
            }
            if let Some(v) = &attack.wordlist {
                config.wordlist = v.clone();
            }
            if let Some(v) = &attack.secrets {
                config.secrets = v.clone();
            }
        }
        if let Some(cipher) = &file.cipher {
            if let Some(v) = &cipher.xor_keys {
                config.xor_keys = v.clone();
            }
            if let Some(v) = cipher.analyze_blocks {
                config.analyze_blocks = v;
            }
        }
        if let Some(lcg) = &file.lcg {
            if let Some(catalog) = &lcg.catalog {
                config.lcg_catalog = catalog.clone();
            }
            if let Some(v) = lcg.predict {
                config.prediction_count = v;
            }
        }
        if let Some(timing) = &file.timing {
            if let Some(v) = timing.threshold {
                config.timing.threshold = v;
            }
            if let Some(v) = timing.max_length {
                config.timing.max_length = v;
            }
            if let Some(v) = timing.samples {
                config.timing.samples = v;
            }
            if let Some(v) = &timing.charset {
                config.timing.charset = v.clone();
            }
        }
        config
    }

    /// Fail fast on settings that would make a search meaningless. Called
    /// before any attack starts.
    pub fn validate(&self) -> Result<(), CrackError> {
        if self.max_bruteforce_length == 0 || self.max_bruteforce_length > MAX_BRUTEFORCE_LENGTH {
            return Err(CrackError::Config(format!(
                "max_bruteforce_length must be between 1 and {}, got {}",
                MAX_BRUTEFORCE_LENGTH, self.max_bruteforce_length
            )));
        }
        Charset::new(&self.charset)?;
        Charset::new(&self.timing.charset)?;
        if self.max_attempts == Some(0) {
            return Err(CrackError::Config("max_attempts must be at least 1".into()));
        }
        if self.xor_keys.iter().any(|k| k.is_empty()) {
            return Err(CrackError::Config("XOR keys must not be empty".into()));
        }
        if !(self.timing.threshold > 0.0 && self.timing.threshold.is_finite()) {
            return Err(CrackError::Config(format!(
                "timing threshold must be a positive number, got {}",
                self.timing.threshold
            )));
        }
        if self.timing.samples == 0 {
            return Err(CrackError::Config("timing samples must be at least 1".into()));
        }
        Ok(())
    }

    pub fn charset(&self) -> Result<Charset, CrackError> {
        Charset::new(&self.charset)
    }

    pub fn with_wordlist<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.wordlist = words.into_iter().map(Into::into).collect();
        self
    }
}
