//! Password Hashing and Verification
//!
//! - Argon2id hashing with a random salt per password, stored as a PHC string
//! - Optional application-wide pepper appended before hashing
//! - Clear-text passwords are NFKC-normalized and zeroized on drop
//!
//! Two entry points exist for clear text: [`PlainPassword::new`] applies the
//! site password policy (registration), [`PlainPassword::unchecked`] does not
//! (login, where any submitted string must simply fail to verify).

use std::fmt;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Passwords refused outright, compared case-insensitively
const COMMON_PASSWORDS: &[&str] = &[
    "password",
    "password1",
    "password123",
    "passw0rd",
    "abcdefgh",
    "letmein1",
    "welcome1",
    "iloveyou",
    "sunshine",
    "princess",
    "football",
    "baseball",
    "trustno1",
    "qwertyui",
    "qwerty123",
    "asdfghjk",
    "zxcvbnm1",
];

/// Reasons a password is refused at registration.
///
/// Display strings are shown next to the password field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("This field is required.")]
    Blank,

    #[error("This password is too short. It must contain at least {min} characters.")]
    TooShort { min: usize },

    #[error("This password is too long. It must contain at most {max} characters.")]
    TooLong { max: usize },

    #[error("This password contains control characters.")]
    ControlCharacter,

    #[error("This password is too common.")]
    Common,

    #[error("This password is entirely numeric.")]
    EntirelyNumeric,
}

#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear text
// ============================================================================

/// Clear-text password, wiped from memory when dropped.
///
/// Not `Clone`; `Debug` is redacted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct PlainPassword(String);

impl PlainPassword {
    /// Normalize and check against the site password policy
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let raw = Zeroizing::new(raw);
        let normalized: String = raw.nfkc().collect();
        let candidate = Self(normalized);

        if candidate.0.trim().is_empty() {
            return Err(PasswordPolicyError::Blank);
        }

        let char_count = candidate.0.chars().count();
        if char_count < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
            });
        }
        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
            });
        }

        if candidate
            .0
            .chars()
            .any(|ch| ch.is_control() && ch != '\t')
        {
            return Err(PasswordPolicyError::ControlCharacter);
        }

        if candidate.0.chars().all(|ch| ch.is_ascii_digit()) {
            return Err(PasswordPolicyError::EntirelyNumeric);
        }

        if is_common(&candidate.0) {
            return Err(PasswordPolicyError::Common);
        }

        Ok(candidate)
    }

    /// Normalize without policy checks
    pub fn unchecked(raw: String) -> Self {
        let raw = Zeroizing::new(raw);
        Self(raw.nfkc().collect())
    }

    /// Hash with Argon2id (default parameters: m=19 MiB, t=2, p=1)
    pub fn hash(&self, pepper: Option<&[u8]>) -> Result<PasswordDigest, PasswordHashError> {
        let input = self.peppered(pepper);
        let salt = SaltString::generate(&mut OsRng);

        let hash = Argon2::default()
            .hash_password(&input, &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(PasswordDigest(hash.to_string()))
    }

    fn peppered(&self, pepper: Option<&[u8]>) -> Zeroizing<Vec<u8>> {
        let mut input = Zeroizing::new(self.0.as_bytes().to_vec());
        if let Some(pepper) = pepper {
            input.extend_from_slice(pepper);
        }
        input
    }
}

impl fmt::Debug for PlainPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PlainPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// Digest
// ============================================================================

/// Argon2id hash in PHC string format, safe to store
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Load a stored PHC string, checking that it parses
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let phc = s.into();
        PasswordHash::new(&phc).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self(phc))
    }

    pub fn as_phc_string(&self) -> &str {
        &self.0
    }

    /// Constant-time verification (inside `argon2`)
    pub fn verify(&self, password: &PlainPassword, pepper: Option<&[u8]>) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.0) else {
            return false;
        };

        Argon2::default()
            .verify_password(&password.peppered(pepper), &parsed)
            .is_ok()
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PasswordDigest").field(&"[HASH]").finish()
    }
}

fn is_common(password: &str) -> bool {
    let lower = password.to_lowercase();

    let mut chars = lower.chars();
    if let Some(first) = chars.next() {
        if chars.all(|c| c == first) {
            return true;
        }
    }

    if is_sequential(&lower) {
        return true;
    }

    COMMON_PASSWORDS.contains(&lower.as_str())
}

/// "abcdefgh", "87654321" and the like: every char one step from the last
fn is_sequential(s: &str) -> bool {
    let codes: Vec<u32> = s.chars().map(u32::from).collect();
    if codes.len() < 2 {
        return false;
    }

    let ascending = codes.windows(2).all(|w| w[1] == w[0] + 1);
    let descending = codes.windows(2).all(|w| w[0] == w[1] + 1);
    ascending || descending
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_rejections() {
        assert_eq!(
            PlainPassword::new("".to_string()).unwrap_err(),
            PasswordPolicyError::Blank
        );
        assert_eq!(
            PlainPassword::new("        ".to_string()).unwrap_err(),
            PasswordPolicyError::Blank
        );
        assert_eq!(
            PlainPassword::new("short".to_string()).unwrap_err(),
            PasswordPolicyError::TooShort { min: 8 }
        );
        assert_eq!(
            PlainPassword::new("x".repeat(MAX_PASSWORD_LENGTH + 1)).unwrap_err(),
            PasswordPolicyError::TooLong { max: 128 }
        );
        assert_eq!(
            PlainPassword::new("bad\u{7}bell pass".to_string()).unwrap_err(),
            PasswordPolicyError::ControlCharacter
        );
        assert_eq!(
            PlainPassword::new("90210553".to_string()).unwrap_err(),
            PasswordPolicyError::EntirelyNumeric
        );
        assert_eq!(
            PlainPassword::new("Password123".to_string()).unwrap_err(),
            PasswordPolicyError::Common
        );
        assert_eq!(
            PlainPassword::new("abcdefghij".to_string()).unwrap_err(),
            PasswordPolicyError::Common
        );
        assert_eq!(
            PlainPassword::new("zzzzzzzzz".to_string()).unwrap_err(),
            PasswordPolicyError::Common
        );
    }

    #[test]
    fn test_policy_accepts() {
        assert!(PlainPassword::new("cupcake-lover-42".to_string()).is_ok());
        assert!(PlainPassword::new("パスワードは安全です".to_string()).is_ok());
    }

    #[test]
    fn test_policy_messages_are_field_ready() {
        let err = PlainPassword::new("tiny".to_string()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "This password is too short. It must contain at least 8 characters."
        );
    }

    #[test]
    fn test_hash_and_verify() {
        let password = PlainPassword::new("cupcake-lover-42".to_string()).unwrap();
        let digest = password.hash(None).unwrap();

        assert!(digest.as_phc_string().starts_with("$argon2id$"));
        assert!(!digest.as_phc_string().contains("cupcake-lover-42"));
        assert!(digest.verify(&password, None));
        assert!(!digest.verify(&PlainPassword::unchecked("cupcake-lover-43".into()), None));
    }

    #[test]
    fn test_pepper_must_match() {
        let password = PlainPassword::unchecked("cupcake-lover-42".to_string());
        let digest = password.hash(Some(b"pepper")).unwrap();

        assert!(digest.verify(&password, Some(b"pepper")));
        assert!(!digest.verify(&password, None));
        assert!(!digest.verify(&password, Some(b"salt")));
    }

    #[test]
    fn test_nfkc_normalization_on_both_paths() {
        // Fullwidth letters normalize to ASCII, so both spellings verify.
        let stored = PlainPassword::new("ｃｕｐｃａｋｅ-lover".to_string()).unwrap();
        let digest = stored.hash(None).unwrap();
        assert!(digest.verify(&PlainPassword::unchecked("cupcake-lover".into()), None));
    }

    #[test]
    fn test_phc_roundtrip_and_invalid() {
        let password = PlainPassword::unchecked("cupcake-lover-42".to_string());
        let digest = password.hash(None).unwrap();
        let restored = PasswordDigest::from_phc_string(digest.as_phc_string()).unwrap();
        assert!(restored.verify(&password, None));

        assert!(PasswordDigest::from_phc_string("cupcake-lover-42").is_err());
    }

    #[test]
    fn test_debug_redaction() {
        let password = PlainPassword::unchecked("hunter2hunter2".to_string());
        let debug = format!("{password:?}");
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("hunter2"));
    }
}
