use md5::Md5;
use sha1::Sha1;
use sha2::{Digest as _, Sha256};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::AttackConfig;
use crate::errors::CrackError;
use crate::models::{Candidate, Digest, HashAlgorithm, Method};
use crate::search::{SearchOutcome, SearchPool};
use crate::wordlist::BruteForceSpace;

pub fn compute_digest(algorithm: HashAlgorithm, input: &[u8]) -> Vec<u8> {
    match algorithm {
        HashAlgorithm::Md5 => Md5::digest(input).to_vec(),
        HashAlgorithm::Sha1 => Sha1::digest(input).to_vec(),
        HashAlgorithm::Sha256 => Sha256::digest(input).to_vec(),
    }
}

pub fn hash_hex(algorithm: HashAlgorithm, input: &str) -> String {
    data_encoding::HEXLOWER.encode(&compute_digest(algorithm, input.as_bytes()))
}

/// Recover a preimage for `digest`.
///
/// The wordlist is tried first, in order. MD5 then falls back to brute force
/// over `charset` up to `max_bruteforce_length`; SHA-1 and SHA-256 stop after
/// the wordlist. Returns `Ok(None)` when nothing matches within the budget.
pub fn crack(digest: &Digest, config: &AttackConfig) -> Result<Option<Candidate>, CrackError> {
    crack_with_cancel(digest, config, CancellationToken::new())
}

/// Like [`crack`], stopping early once `cancel` fires.
pub fn crack_with_cancel(
    digest: &Digest,
    config: &AttackConfig,
    cancel: CancellationToken,
) -> Result<Option<Candidate>, CrackError> {
    config.validate()?;
    let algorithm = digest.algorithm();

    let wordlist_len = config.wordlist.len() as u64;
    let bruteforce = if algorithm.supports_bruteforce() {
        Some(BruteForceSpace::new(config.charset()?, config.max_bruteforce_length))
    } else {
        None
    };
    let bruteforce_len = bruteforce.as_ref().map_or(0, |b| b.len());
    let full_len = wordlist_len.saturating_add(bruteforce_len);
    let search_len = config.max_attempts.map_or(full_len, |max| full_len.min(max));

    info!(
        algorithm = %algorithm,
        wordlist = wordlist_len,
        bruteforce = bruteforce_len,
        budget = search_len,
        "Starting hash crack"
    );

    let candidate_at = |index: u64| -> Option<String> {
        if index < wordlist_len {
            Some(config.wordlist[index as usize].clone())
        } else {
            bruteforce.as_ref()?.get(index - wordlist_len)
        }
    };

    let target = digest.bytes();
    let pool = SearchPool::new(config.threads)?.with_cancel_token(cancel);
    let outcome = pool.find_first(search_len, |index| {
        candidate_at(index)
            .map_or(false, |c| compute_digest(algorithm, c.as_bytes()) == target)
    });

    match outcome {
        SearchOutcome::Found { index, tested } => {
            let value = candidate_at(index)
                .ok_or_else(|| CrackError::Internal(format!("No candidate at index {}", index)))?;
            let method = if index < wordlist_len { Method::Dictionary } else { Method::BruteForce };
            info!(algorithm = %algorithm, method = %method, position = index + 1, tested, "Hash cracked");
            // attempts = position in sequential order, independent of thread count
            Ok(Some(Candidate::exact(method, value, index + 1)))
        }
        SearchOutcome::Exhausted { tested } => {
            debug!(algorithm = %algorithm, tested, "Hash search exhausted");
            Ok(None)
        }
        SearchOutcome::Cancelled { tested } => Err(CrackError::Cancelled(format!(
            "hash crack stopped after {} candidates",
            tested
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Confidence;

    fn digest_of(algorithm: HashAlgorithm, s: &str) -> Digest {
        Digest::from_hex(&hash_hex(algorithm, s), algorithm).unwrap()
    }

    fn small_config() -> AttackConfig {
        AttackConfig {
            max_bruteforce_length: 3,
            threads: 2,
            ..Default::default()
        }
        .with_wordlist(["letmein", "hunter2", "password"])
    }

    #[test]
    fn test_known_vectors() {
        assert_eq!(hash_hex(HashAlgorithm::Md5, "password"), "5f4dcc3b5aa765d61d8327deb882cf99");
        assert_eq!(hash_hex(HashAlgorithm::Sha1, "password"), "5baa61e4c9b93f3f0682250b6cf8331b7ee68fd8");
        assert_eq!(
            hash_hex(HashAlgorithm::Sha256, "password"),
            "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8"
        );
    }

    #[test]
    fn test_dictionary_hit_for_every_algorithm() {
        for algorithm in [HashAlgorithm::Md5, HashAlgorithm::Sha1, HashAlgorithm::Sha256] {
            let found = crack(&digest_of(algorithm, "hunter2"), &small_config()).unwrap().unwrap();
            assert_eq!(found.value, "hunter2");
            assert_eq!(found.method, Method::Dictionary);
            assert_eq!(found.confidence, Confidence::Exact);
            assert_eq!(found.attempts, Some(2));
        }
    }

    #[test]
    fn test_first_dictionary_entry_wins_on_duplicates() {
        let config = small_config().with_wordlist(["a", "dup", "dup"]);
        let found = crack(&digest_of(HashAlgorithm::Sha1, "dup"), &config).unwrap().unwrap();
        assert_eq!(found.attempts, Some(2));
    }

    #[test]
    fn test_attempts_count_includes_the_hit() {
        let first = crack(&digest_of(HashAlgorithm::Md5, "letmein"), &small_config()).unwrap().unwrap();
        assert_eq!(first.attempts, Some(1));
        // Three wordlist entries, then "a" is the first brute-force string
        let brute = crack(&digest_of(HashAlgorithm::Md5, "a"), &small_config()).unwrap().unwrap();
        assert_eq!(brute.attempts, Some(4));
    }

    #[test]
    fn test_md5_falls_back_to_bruteforce() {
        let found = crack(&digest_of(HashAlgorithm::Md5, "z9"), &small_config()).unwrap().unwrap();
        assert_eq!(found.value, "z9");
        assert_eq!(found.method, Method::BruteForce);
    }

    #[test]
    fn test_sha1_does_not_bruteforce() {
        let result = crack(&digest_of(HashAlgorithm::Sha1, "ab"), &small_config()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_not_found_beyond_length_bound() {
        let config = AttackConfig { max_bruteforce_length: 2, ..small_config() };
        let result = crack(&digest_of(HashAlgorithm::Md5, "abc"), &config).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_budget_limits_search() {
        let config = AttackConfig { max_attempts: Some(3), ..small_config() };
        // "a" is the 4th candidate (after three dictionary words)
        assert!(crack(&digest_of(HashAlgorithm::Md5, "a"), &config).unwrap().is_none());
        let config = AttackConfig { max_attempts: Some(4), ..small_config() };
        assert!(crack(&digest_of(HashAlgorithm::Md5, "a"), &config).unwrap().is_some());
    }

    #[test]
    fn test_config_error_before_search() {
        let config = AttackConfig { charset: String::new(), ..small_config() };
        let err = crack(&digest_of(HashAlgorithm::Md5, "a"), &config).unwrap_err();
        assert!(matches!(err, CrackError::Config(_)));
    }

    #[test]
    fn test_cancelled_search_reports_cancellation() {
        let token = CancellationToken::new();
        token.cancel();
        let err = crack_with_cancel(&digest_of(HashAlgorithm::Md5, "zzz"), &small_config(), token)
            .unwrap_err();
        assert!(matches!(err, CrackError::Cancelled(_)));
    }
}
