//! User Name Value Object
//!
//! The handle a member logs in with and is greeted by.
//!
//! ## Rules
//! - NFKC normalized and trimmed before validation
//! - 1 to 150 characters
//! - Letters, digits and `@ . + - _` only (letters and digits in any script)
//! - Case is kept for display; uniqueness and lookup use the lowercase form

use std::fmt;

use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 150;

/// Allowed special characters in user name
const ALLOWED_SPECIAL_CHARS: &[char] = &['@', '.', '+', '-', '_'];

/// Error returned when user name validation fails
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserNameError {
    #[error("This field is required.")]
    Empty,

    #[error("Ensure this value has at most {max} characters (it has {length}).")]
    TooLong { length: usize, max: usize },

    #[error(
        "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters."
    )]
    InvalidCharacter { char: char },
}

/// Validated, normalized user name
///
/// # Storage
/// - `original`: what the member typed (trimmed, NFKC normalized)
/// - `canonical`: lowercase form for uniqueness checks
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct UserName {
    original: String,
    canonical: String,
}

impl UserName {
    pub fn new(input: impl AsRef<str>) -> Result<Self, UserNameError> {
        let original = Self::normalize(input.as_ref());
        Self::validate(&original)?;
        let canonical = original.to_lowercase();
        Ok(Self {
            original,
            canonical,
        })
    }

    /// Get the original user name (preserves case)
    #[inline]
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Get the canonical (lowercase) user name
    #[inline]
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// Rebuild from a stored value (already validated on the way in)
    pub fn from_db(original: &str) -> Self {
        Self {
            original: original.to_string(),
            canonical: original.to_lowercase(),
        }
    }

    fn normalize(input: &str) -> String {
        input.nfkc().collect::<String>().trim().to_string()
    }

    fn validate(name: &str) -> Result<(), UserNameError> {
        if name.is_empty() {
            return Err(UserNameError::Empty);
        }

        let length = name.chars().count();
        if length > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong {
                length,
                max: USER_NAME_MAX_LENGTH,
            });
        }

        if let Some(char) = name.chars().find(|&c| !Self::is_valid_char(c)) {
            return Err(UserNameError::InvalidCharacter { char });
        }

        Ok(())
    }

    #[inline]
    fn is_valid_char(c: char) -> bool {
        c.is_alphanumeric() || ALLOWED_SPECIAL_CHARS.contains(&c)
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl fmt::Debug for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserName({:?})", self.original)
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.original
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        for name in ["leifos", "Laura.S", "dev+rango", "a_b-c@d", "7", "ñandú"] {
            assert!(UserName::new(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn test_trim_and_case() {
        let name = UserName::new("  LeifOS ").unwrap();
        assert_eq!(name.original(), "LeifOS");
        assert_eq!(name.canonical(), "leifos");
        assert_eq!(name.to_string(), "LeifOS");
    }

    #[test]
    fn test_nfkc_normalization() {
        // Fullwidth letters become ASCII
        let name = UserName::new("ｌｅｉｆ").unwrap();
        assert_eq!(name.original(), "leif");
    }

    #[test]
    fn test_empty() {
        assert_eq!(UserName::new(""), Err(UserNameError::Empty));
        assert_eq!(UserName::new("   "), Err(UserNameError::Empty));
    }

    #[test]
    fn test_length_limit() {
        assert!(UserName::new("a".repeat(150)).is_ok());
        assert_eq!(
            UserName::new("a".repeat(151)),
            Err(UserNameError::TooLong {
                length: 151,
                max: 150
            })
        );
    }

    #[test]
    fn test_invalid_characters() {
        assert_eq!(
            UserName::new("two words"),
            Err(UserNameError::InvalidCharacter { char: ' ' })
        );
        assert_eq!(
            UserName::new("semi;colon"),
            Err(UserNameError::InvalidCharacter { char: ';' })
        );
        assert_eq!(
            UserName::new("slash/").unwrap_err().to_string(),
            "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters."
        );
    }
}
