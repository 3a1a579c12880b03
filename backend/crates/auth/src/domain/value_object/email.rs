//! Email Value Object
//!
//! Format check only; addresses are never confirmed.

use derive_more::Display;
use thiserror::Error;

/// Maximum email length (per RFC 5321)
const EMAIL_MAX_LENGTH: usize = 254;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmailError {
    #[error("Ensure this value has at most {max} characters (it has {length}).")]
    TooLong { length: usize, max: usize },

    #[error("Enter a valid email address.")]
    InvalidFormat,
}

/// Email address value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[display("{_0}")]
pub struct Email(String);

impl Email {
    /// Validate a non-empty address.
    ///
    /// The domain part is lowercased, the local part is kept as typed.
    pub fn new(email: impl AsRef<str>) -> Result<Self, EmailError> {
        let email = email.as_ref().trim();

        let length = email.chars().count();
        if length > EMAIL_MAX_LENGTH {
            return Err(EmailError::TooLong {
                length,
                max: EMAIL_MAX_LENGTH,
            });
        }

        let (local, domain) = email.rsplit_once('@').ok_or(EmailError::InvalidFormat)?;
        if !Self::is_valid_local(local) || !Self::is_valid_domain(domain) {
            return Err(EmailError::InvalidFormat);
        }

        Ok(Self(format!("{local}@{}", domain.to_lowercase())))
    }

    /// Blank input means "no email given"
    pub fn optional(email: &str) -> Result<Option<Self>, EmailError> {
        if email.trim().is_empty() {
            Ok(None)
        } else {
            Self::new(email).map(Some)
        }
    }

    /// Rebuild from a stored value
    pub fn from_db(email: String) -> Self {
        Self(email)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn is_valid_local(local: &str) -> bool {
        !local.is_empty()
            && local.len() <= 64
            && !local.starts_with('.')
            && !local.ends_with('.')
            && !local.contains("..")
            && local
                .chars()
                .all(|c| c.is_alphanumeric() || "!#$%&'*+/=?^_`{|}~.-".contains(c))
    }

    fn is_valid_domain(domain: &str) -> bool {
        if domain.is_empty() || !domain.contains('.') {
            return false;
        }

        domain.split('.').all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_alphanumeric() || c == '-')
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_email() {
        let email = Email::new(" Leif@Tango.Example.COM ").unwrap();
        assert_eq!(email.as_str(), "Leif@tango.example.com");
    }

    #[test]
    fn test_invalid_email() {
        for bad in [
            "plainaddress",
            "@example.com",
            "user@",
            "user@localhost",
            "user@.example.com",
            "user@example..com",
            "us er@example.com",
            ".user@example.com",
            "user@-example.com",
        ] {
            assert_eq!(Email::new(bad), Err(EmailError::InvalidFormat), "{bad}");
        }
    }

    #[test]
    fn test_optional() {
        assert_eq!(Email::optional("   "), Ok(None));
        assert!(Email::optional("a@b.co").unwrap().is_some());
        assert!(Email::optional("nope").is_err());
    }

    #[test]
    fn test_too_long() {
        let long = format!("{}@example.com", "a".repeat(250));
        assert!(matches!(Email::new(long), Err(EmailError::TooLong { .. })));
    }
}
