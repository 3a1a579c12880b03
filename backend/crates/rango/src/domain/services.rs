//! Domain Services
//!
//! Pure functions shared by the category model and its forms.

use unicode_normalization::UnicodeNormalization;

/// Turn a display name into a URL slug.
///
/// Accents are folded to ASCII (NFKD, then non-ASCII dropped), the text is
/// lowercased, anything but letters, digits, `_`, `-` and whitespace is
/// removed, and runs of whitespace or hyphens become a single `-`.
/// Leading and trailing `-` and `_` are stripped.
pub fn slugify(name: &str) -> String {
    let ascii: String = name
        .nfkd()
        .filter(char::is_ascii)
        .collect::<String>()
        .to_ascii_lowercase();

    let mut slug = String::with_capacity(ascii.len());
    let mut pending_dash = false;

    for c in ascii.chars() {
        if c.is_whitespace() || c == '-' {
            pending_dash = true;
        } else if c.is_ascii_alphanumeric() || c == '_' {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        }
    }

    slug.trim_matches(|c| c == '-' || c == '_').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Python"), "python");
        assert_eq!(slugify("Other Frameworks"), "other-frameworks");
        assert_eq!(slugify("  Django   Tips -- and  Tricks "), "django-tips-and-tricks");
    }

    #[test]
    fn test_slugify_strips_punctuation() {
        assert_eq!(slugify("C++ & Rust!"), "c-rust");
        assert_eq!(slugify("What's new?"), "whats-new");
        assert_eq!(slugify("_private_"), "private");
    }

    #[test]
    fn test_slugify_folds_accents() {
        assert_eq!(slugify("Café Crème"), "cafe-creme");
        assert_eq!(slugify("Ünïcödé"), "unicode");
    }

    #[test]
    fn test_slugify_can_be_empty() {
        assert_eq!(slugify("日本語"), "");
        assert_eq!(slugify("---"), "");
        assert_eq!(slugify(""), "");
    }
}
