//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use chrono::{DateTime, Utc};
use sha3::{Digest, Keccak256};

/// Words that unconditionally unsubscribe and reset a user
pub const STOP_WORDS: [&str; 4] = ["stop", "unsubscribe", "cancel", "list"];

/// Check whether text contains any stop word (case-insensitive substring match)
pub fn contains_stop_word(text: &str) -> bool {
    let lower = text.to_lowercase();
    STOP_WORDS.iter().any(|word| lower.contains(word))
}

/// Validate an EVM wallet address.
///
/// `0x` followed by 40 hex digits. Single-case hex is accepted as-is; mixed
/// case has to carry a valid EIP-55 checksum.
pub fn is_wallet_address(text: &str) -> bool {
    let Some(hex) = text.strip_prefix("0x") else {
        return false;
    };
    if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return false;
    }

    let has_lower = hex.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = hex.chars().any(|c| c.is_ascii_uppercase());
    if !(has_lower && has_upper) {
        return true;
    }

    hex == checksum_hex(hex)
}

/// EIP-55 mixed-case encoding of 40 hex digits (without the `0x` prefix)
pub fn checksum_hex(hex: &str) -> String {
    let lower = hex.to_ascii_lowercase();
    let mut hasher = Keccak256::new();
    hasher.update(lower.as_bytes());
    let hash = hasher.finalize();

    lower
        .chars()
        .enumerate()
        .map(|(i, c)| {
            let byte = hash[i / 2];
            let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
            if c.is_ascii_alphabetic() && nibble >= 8 {
                c.to_ascii_uppercase()
            } else {
                c
            }
        })
        .collect()
}

/// Parse a positive integer alert threshold
pub fn parse_threshold(text: &str) -> Option<u64> {
    text.trim().parse::<u64>().ok().filter(|value| *value > 0)
}

/// Escape Redis glob metacharacters so the text only matches itself
pub fn escape_glob(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Translate a Redis-style glob (`*`, `?`, backslash escapes) to an anchored regex
pub fn glob_to_regex(pattern: &str) -> String {
    let mut regex = String::from("^");
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        match c {
            '*' => regex.push_str(".*"),
            '?' => regex.push('.'),
            '\\' => {
                if let Some(escaped) = chars.next() {
                    regex.push_str(&regex::escape(&escaped.to_string()));
                }
            }
            other => regex.push_str(&regex::escape(&other.to_string())),
        }
    }
    regex.push('$');
    regex
}

/// Format an integer amount of base units as a decimal string
pub fn format_units(raw: &str, decimals: u32) -> Option<String> {
    let value: u128 = raw.trim().parse().ok()?;
    let base = 10u128.checked_pow(decimals)?;
    let whole = value / base;
    let fraction = value % base;

    if fraction == 0 {
        return Some(format!("{}.0", whole));
    }

    let fraction = format!("{:0width$}", fraction, width = decimals as usize);
    Some(format!("{}.{}", whole, fraction.trim_end_matches('0')))
}

/// Format a timestamp for display
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Truncate text to a maximum number of characters with ellipsis
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_length.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_stop_words() {
        assert!(contains_stop_word("STOP"));
        assert!(contains_stop_word("please cancel that"));
        assert!(contains_stop_word("Unsubscribe me"));
        assert!(contains_stop_word("playlist"));
        assert!(!contains_stop_word("1"));
        assert!(!contains_stop_word("hello"));
    }

    #[test]
    fn test_wallet_address_checksum() {
        // EIP-55 reference vectors
        assert!(is_wallet_address("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"));
        assert!(is_wallet_address("0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359"));
        assert!(is_wallet_address("0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB"));
        assert!(is_wallet_address("0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb"));

        // single case skips the checksum
        assert!(is_wallet_address("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed"));
        assert!(is_wallet_address("0x5AAEB6053F3E94C9B9A09F33669435E7EF1BEAED"));

        // broken checksum
        assert!(!is_wallet_address("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAeD"));
        // wrong length or alphabet
        assert!(!is_wallet_address("0x123"));
        assert!(!is_wallet_address("5aaeb6053f3e94c9b9a09f33669435e7ef1beaed"));
        assert!(!is_wallet_address("0xzzzeb6053f3e94c9b9a09f33669435e7ef1beaed"));
    }

    #[test]
    fn test_checksum_hex() {
        assert_eq!(
            checksum_hex("5aaeb6053f3e94c9b9a09f33669435e7ef1beaed"),
            "5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"
        );
    }

    #[test]
    fn test_parse_threshold() {
        assert_eq!(parse_threshold("20"), Some(20));
        assert_eq!(parse_threshold(" 7 "), Some(7));
        assert_eq!(parse_threshold("0"), None);
        assert_eq!(parse_threshold("-5"), None);
        assert_eq!(parse_threshold("abc"), None);
        assert_eq!(parse_threshold(""), None);
    }

    #[test]
    fn test_glob_translation() {
        let regex = regex::Regex::new(&glob_to_regex("*:gas_alert:1")).unwrap();
        assert!(regex.is_match("42:gas_alert:1"));
        assert!(!regex.is_match("42:gas_alert:137"));

        let pattern = format!("{}:*", escape_glob("a*b"));
        let regex = regex::Regex::new(&glob_to_regex(&pattern)).unwrap();
        assert!(regex.is_match("a*b:step"));
        assert!(!regex.is_match("axxb:step"));
    }

    #[test]
    fn test_format_units() {
        assert_eq!(format_units("1000000000000000000", 18).as_deref(), Some("1.0"));
        assert_eq!(format_units("1500000000000000000", 18).as_deref(), Some("1.5"));
        assert_eq!(format_units("1", 18).as_deref(), Some("0.000000000000000001"));
        assert_eq!(format_units("0", 18).as_deref(), Some("0.0"));
        assert_eq!(format_units("nope", 18), None);
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("hello", 10), "hello");
        assert_eq!(truncate_text("0x1234567890abcdef", 13), "0x1234567...");
    }

    #[test]
    fn test_truncate_text_counts_characters() {
        assert_eq!(truncate_text("Ξthereum Ξthereum", 10), "Ξthereu...");
        assert_eq!(truncate_text("ΞΞΞ", 3), "ΞΞΞ");
    }

    proptest! {
        #[test]
        fn prop_truncate_text_stays_within_limit(text in "\\PC{0,40}", max_length in 3usize..30) {
            prop_assert!(truncate_text(&text, max_length).chars().count() <= max_length);
        }

        #[test]
        fn prop_digit_only_input_is_never_a_stop_word(text in "[0-9]{0,12}") {
            prop_assert!(!contains_stop_word(&text));
        }

        #[test]
        fn prop_escaped_text_matches_only_itself(text in "[a-z0-9*?:]{1,12}", other in "[a-z0-9:]{1,12}") {
            let regex = regex::Regex::new(&glob_to_regex(&escape_glob(&text))).unwrap();
            prop_assert!(regex.is_match(&text));
            prop_assert_eq!(regex.is_match(&other), other == text);
        }
    }
}
