//! User Password Value Object
//!
//! Delegates to `platform::password` for hashing and the policy.
//!
//! ```ignore
//! let raw = RawPassword::new("cupcake-lover-42".to_string())?;
//! let hashed = UserPassword::from_raw(&raw, None)?;
//! assert!(hashed.verify(&raw, None));
//! ```

use std::fmt;

use platform::password::{PasswordDigest, PasswordHashError, PasswordPolicyError, PlainPassword};

/// Password as typed, wiped from memory when dropped
pub struct RawPassword(PlainPassword);

impl RawPassword {
    /// Registration path: the site password policy applies
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        PlainPassword::new(raw).map(Self)
    }

    /// Login path: anything may be submitted, it simply fails to verify
    pub fn for_login(raw: String) -> Self {
        Self(PlainPassword::unchecked(raw))
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

/// Stored password hash (Argon2id PHC string)
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(PasswordDigest);

impl UserPassword {
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> Result<Self, PasswordHashError> {
        raw.0.hash(pepper).map(Self)
    }

    pub fn from_db(phc: String) -> Result<Self, PasswordHashError> {
        PasswordDigest::from_phc_string(phc).map(Self)
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(&raw.0, pepper)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UserPassword").field(&"[HASH]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let raw = RawPassword::new("cupcake-lover-42".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, None).unwrap();
        assert!(hashed.verify(&raw, None));
        assert!(!hashed.verify(&RawPassword::for_login("wrong".to_string()), None));
    }

    #[test]
    fn test_policy_is_only_applied_on_registration() {
        assert!(RawPassword::new("short".to_string()).is_err());
        let _ = RawPassword::for_login("short".to_string());
    }

    #[test]
    fn test_from_db() {
        let raw = RawPassword::for_login("cupcake-lover-42".to_string());
        let hashed = UserPassword::from_raw(&raw, None).unwrap();
        let restored = UserPassword::from_db(hashed.as_phc_string().to_string()).unwrap();
        assert!(restored.verify(&raw, None));
        assert!(UserPassword::from_db("plain".to_string()).is_err());
    }
}
