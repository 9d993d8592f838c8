//! Faculty authorization keys for session verification.
//!
//! Each faculty profile holds a short numeric key. A session is locked once
//! someone presents the key of the faculty originally scheduled for its slot.

use rand::Rng;

use crate::error::CoreError;

/// Number of digits in an authorization key.
pub const KEY_DIGITS: usize = 6;

/// Smallest key value (keeps every key exactly six digits long).
const KEY_MIN: u32 = 100_000;

/// Largest key value.
const KEY_MAX: u32 = 999_999;

/// Generate a fresh random six-digit authorization key.
pub fn generate_authorization_key() -> String {
    rand::rng().random_range(KEY_MIN..=KEY_MAX).to_string()
}

/// Reject admin-supplied keys that are not exactly six ASCII digits.
pub fn validate_key_format(key: &str) -> Result<(), CoreError> {
    if key.len() == KEY_DIGITS && key.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "authorization key must be exactly {KEY_DIGITS} digits"
        )))
    }
}

/// Compare a submitted key against the stored one.
///
/// Exact string equality; a profile without a key never matches.
pub fn check_authorization_key(
    stored_key: Option<&str>,
    submitted: &str,
) -> Result<(), CoreError> {
    match stored_key {
        Some(stored) if stored == submitted => Ok(()),
        _ => Err(CoreError::Unauthorized("Invalid 6-digit Token".into())),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn generated_keys_are_six_digits() {
        for _ in 0..200 {
            let key = generate_authorization_key();
            assert_eq!(key.len(), KEY_DIGITS);
            assert!(key.chars().all(|c| c.is_ascii_digit()));
            assert!(!key.starts_with('0'));
        }
    }

    #[test]
    fn key_format() {
        assert!(validate_key_format("012345").is_ok());
        assert!(validate_key_format("12345").is_err());
        assert!(validate_key_format("12345a").is_err());
        assert!(validate_key_format("1234567").is_err());
    }

    #[test]
    fn matching_key_passes() {
        assert!(check_authorization_key(Some("482913"), "482913").is_ok());
    }

    #[test]
    fn mismatched_key_is_unauthorized() {
        assert_matches!(
            check_authorization_key(Some("482913"), "482914"),
            Err(CoreError::Unauthorized(_))
        );
    }

    #[test]
    fn comparison_is_exact() {
        assert!(check_authorization_key(Some("482913"), " 482913").is_err());
    }

    #[test]
    fn missing_key_never_matches() {
        assert!(check_authorization_key(None, "").is_err());
        assert!(check_authorization_key(None, "482913").is_err());
    }
}
