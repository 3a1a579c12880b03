//! Website Value Object
//!
//! A member's personal link, shown on their profile.

use derive_more::Display;
use platform::web_url::{WebUrlError, normalize_http_url};

/// Maximum stored length, scheme included
pub const WEBSITE_MAX_LENGTH: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{_0}")]
pub struct Website(String);

impl Website {
    /// Blank input means "no website"; anything else must be a usable link
    pub fn optional(raw: &str) -> Result<Option<Self>, WebUrlError> {
        if raw.trim().is_empty() {
            return Ok(None);
        }
        normalize_http_url(raw, WEBSITE_MAX_LENGTH).map(|url| Some(Self(url)))
    }

    pub fn from_db(url: String) -> Self {
        Self(url)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_website() {
        assert_eq!(Website::optional(""), Ok(None));
        assert_eq!(
            Website::optional("tangowithdjango.com").unwrap().unwrap().as_str(),
            "http://tangowithdjango.com"
        );
        assert_eq!(Website::optional("no spaces.com"), Err(WebUrlError::Invalid));
    }
}
