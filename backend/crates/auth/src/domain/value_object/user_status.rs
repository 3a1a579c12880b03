//! User Status Value Object
//!
//! - **Active**: may log in
//! - **Disabled**: keeps its data but every login is refused and any open
//!   session stops authenticating

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i16)]
pub enum UserStatus {
    #[default]
    Active = 0,
    Disabled = 1,
}

impl UserStatus {
    /// Get numeric ID for database storage
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Disabled => "disabled",
        }
    }

    #[inline]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(Self::Active),
            1 => Some(Self::Disabled),
            _ => None,
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_id() {
        assert_eq!(UserStatus::from_id(0), Some(UserStatus::Active));
        assert_eq!(UserStatus::from_id(1), Some(UserStatus::Disabled));
        assert_eq!(UserStatus::from_id(2), None);
    }

    #[test]
    fn test_is_active() {
        assert!(UserStatus::Active.is_active());
        assert!(!UserStatus::Disabled.is_active());
        assert_eq!(UserStatus::default(), UserStatus::Active);
    }

    #[test]
    fn test_display() {
        assert_eq!(UserStatus::Disabled.to_string(), "disabled");
    }
}
