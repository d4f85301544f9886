pub mod defaults;
pub mod charset;
pub mod bruteforce;

pub use defaults::{common_passwords, common_secrets, DEFAULT_CHARSET};
pub use charset::Charset;
pub use bruteforce::BruteForceSpace;

/// Parse a newline separated wordlist. Blank lines and `#` comments are skipped,
/// order is preserved.
pub fn parse_wordlist(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|l| l.trim_end_matches('\r'))
        .filter(|l| !l.trim().is_empty() && !l.starts_with('#'))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wordlist_preserves_order() {
        let words = parse_wordlist("zeta\nalpha\r\n\n# comment\nbeta\n");
        assert_eq!(words, vec!["zeta", "alpha", "beta"]);
    }
}
