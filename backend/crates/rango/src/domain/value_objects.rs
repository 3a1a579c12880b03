//! Domain Value Objects
//!
//! Validated field values for categories and pages. Error messages are
//! shown next to the offending form field.

use std::fmt;

use kernel::id::Id;
use platform::web_url::{WebUrlError, normalize_http_url};
use thiserror::Error;

use crate::domain::services::slugify;

pub struct CategoryMarker;
pub type CategoryId = Id<CategoryMarker>;

pub struct PageMarker;
pub type PageId = Id<PageMarker>;

pub const CATEGORY_NAME_MAX_LENGTH: usize = 128;
pub const PAGE_TITLE_MAX_LENGTH: usize = 128;
pub const PAGE_URL_MAX_LENGTH: usize = 200;

/// Shared by the free-text fields
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextFieldError {
    #[error("This field is required.")]
    Blank,

    #[error("Ensure this value has at most {max} characters (it has {length}).")]
    TooLong { length: usize, max: usize },

    /// Only names: nothing of the name survives slugification
    #[error("Enter a name containing at least one letter or number.")]
    NoSlug,
}

fn required_text(raw: &str, max: usize) -> Result<String, TextFieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TextFieldError::Blank);
    }

    let length = trimmed.chars().count();
    if length > max {
        return Err(TextFieldError::TooLong { length, max });
    }

    Ok(trimmed.to_string())
}

// ============================================================================
// Category
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryName(String);

impl CategoryName {
    pub fn new(raw: &str) -> Result<Self, TextFieldError> {
        let name = required_text(raw, CATEGORY_NAME_MAX_LENGTH)?;
        if slugify(&name).is_empty() {
            return Err(TextFieldError::NoSlug);
        }
        Ok(Self(name))
    }

    pub fn from_db(name: String) -> Self {
        Self(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The slug this name is stored under
    pub fn slug(&self) -> Slug {
        Slug(slugify(&self.0))
    }
}

impl fmt::Display for CategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// URL-safe category key: lowercase ASCII letters, digits, `-` and `_`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slug(String);

impl Slug {
    pub fn from_db(slug: String) -> Self {
        Self(slug)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Page
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTitle(String);

impl PageTitle {
    pub fn new(raw: &str) -> Result<Self, TextFieldError> {
        required_text(raw, PAGE_TITLE_MAX_LENGTH).map(Self)
    }

    pub fn from_db(title: String) -> Self {
        Self(title)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Absolute http(s) link; `http://` is prepended when the scheme is missing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageUrl(String);

impl PageUrl {
    pub fn new(raw: &str) -> Result<Self, WebUrlError> {
        normalize_http_url(raw, PAGE_URL_MAX_LENGTH).map(Self)
    }

    pub fn from_db(url: String) -> Self {
        Self(url)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
