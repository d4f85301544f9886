use std::fs;

use cryptbreak::attacks::{self, hash_hex};
use cryptbreak::config::{parse_config, AttackConfig};
use cryptbreak::errors::CrackError;
use cryptbreak::models::{Artifact, Digest, Findings, HashAlgorithm, Method, PredictionSource};
use cryptbreak::wordlist::parse_wordlist;
use tempfile::TempDir;

fn write_config(dir: &TempDir, name: &str, yaml: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, yaml).unwrap();
    path
}

#[tokio::test]
async fn test_config_file_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "crack.yaml",
        r#"
attack:
  max_bruteforce_length: 3
  charset: "xyz"
  wordlist: [orange, banana]
cipher:
  xor_keys: [k]
  analyze_blocks: false
lcg:
  predict: 4
timing:
  max_length: 6
"#,
    );

    let file = parse_config(&path).await.unwrap();
    let config = AttackConfig::from_file_config(&file);
    assert_eq!(config.max_bruteforce_length, 3);
    assert_eq!(config.charset, "xyz");
    assert_eq!(config.wordlist, vec!["orange", "banana"]);
    assert_eq!(config.xor_keys, vec!["k"]);
    assert!(!config.analyze_blocks);
    assert_eq!(config.prediction_count, 4);
    assert_eq!(config.timing.max_length, 6);
    // Untouched sections keep their defaults
    assert_eq!(config.lcg_catalog.len(), 3);
    assert!(config.secrets.contains(&"secret".to_string()));
}

#[tokio::test]
async fn test_configured_charset_drives_bruteforce() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "crack.yaml",
        "attack:\n  max_bruteforce_length: 3\n  charset: \"xyz\"\n  wordlist: []\n",
    );
    let config = AttackConfig::from_file_config(&parse_config(&path).await.unwrap());

    let digest = Digest::from_hex(&hash_hex(HashAlgorithm::Md5, "zyx"), HashAlgorithm::Md5).unwrap();
    let findings = attacks::attack(&Artifact::Digest(digest), &config).unwrap();
    let found = findings.best().unwrap();
    assert_eq!(found.value, "zyx");
    assert_eq!(found.method, Method::BruteForce);
}

#[tokio::test]
async fn test_custom_lcg_catalog_from_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "lcg.yaml",
        "lcg:\n  catalog:\n    - { name: tiny, a: 5, c: 1, m: 16 }\n  predict: 2\n",
    );
    let config = AttackConfig::from_file_config(&parse_config(&path).await.unwrap());

    // 1 -> 6 -> 15 -> 12 -> 13 -> 2 under (5x + 1) mod 16
    let findings = attacks::attack(&Artifact::ObservedSequence(vec![1, 6, 15, 12]), &config).unwrap();
    let Findings::ObservedSequence { prediction } = findings else {
        panic!("unexpected findings");
    };
    assert_eq!(prediction.values, vec![13, 2]);
    assert!(matches!(prediction.source, PredictionSource::LcgRecovery { .. }));
}

#[tokio::test]
async fn test_missing_config_file_is_config_error() {
    let dir = TempDir::new().unwrap();
    let err = parse_config(&dir.path().join("absent.yaml")).await.unwrap_err();
    assert!(matches!(err, CrackError::Config(_)));
    assert_eq!(err.classify().exit_code, 2);
}

#[tokio::test]
async fn test_invalid_limits_fail_before_search() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "bad.yaml", "attack:\n  max_bruteforce_length: 12\n");
    let err = parse_config(&path).await.unwrap_err();
    assert!(matches!(err, CrackError::Config(_)));
}

#[tokio::test]
async fn test_oversized_config_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("huge.yaml");
    fs::write(&path, "#".repeat(1_048_577)).unwrap();
    let err = parse_config(&path).await.unwrap_err();
    assert!(err.to_string().contains("1MB"));
}

#[test]
fn test_wordlist_file_parsing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("words.txt");
    fs::write(&path, "# common\nletmein\r\n\nhunter2\n  \nqwerty\n").unwrap();
    let words = parse_wordlist(&fs::read_to_string(&path).unwrap());
    assert_eq!(words, vec!["letmein", "hunter2", "qwerty"]);
}
