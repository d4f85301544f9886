/// Brute-force alphabet: lowercase letters followed by digits.
pub const DEFAULT_CHARSET: &str = "abcdefghijklmnopqrstuvwxyz0123456789";

const COMMON_PASSWORDS: &[&str] = &[
    "password", "123456", "admin", "test", "guest", "user",
    "root", "toor", "pass", "secret", "login", "password123",
    "admin123", "qwerty", "abc123", "welcome", "monkey",
    "dragon", "letmein", "trustno1", "111111", "1234",
    "juice", "juiceshop", "owasp", "security", "hacker",
];

// The empty string is intentional: some services sign with an unset secret.
const COMMON_SECRETS: &[&str] = &[
    "secret", "key", "password", "admin", "test", "jwt",
    "your-256-bit-secret", "supersecret", "mySecret",
    "juice", "juiceshop", "owasp", "", "null", "undefined",
    "default", "changeme", "secretkey", "privatekey",
];

/// Used by the hash cracker when the caller supplies no wordlist.
pub fn common_passwords() -> Vec<String> {
    COMMON_PASSWORDS.iter().map(|s| s.to_string()).collect()
}

/// Used by the token secret cracker when the caller supplies no wordlist.
pub fn common_secrets() -> Vec<String> {
    COMMON_SECRETS.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lists_start_with_most_common() {
        assert_eq!(common_passwords()[0], "password");
        assert_eq!(common_secrets()[0], "secret");
    }

    #[test]
    fn test_secrets_include_empty_string() {
        assert!(common_secrets().iter().any(|s| s.is_empty()));
    }

    #[test]
    fn test_default_charset_size() {
        assert_eq!(DEFAULT_CHARSET.chars().count(), 36);
    }
}
