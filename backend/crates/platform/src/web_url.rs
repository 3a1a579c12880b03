//! Web URL helpers
//!
//! Visitors type links the way they see them in the address bar, often
//! without a scheme. Such input gets `http://` prepended, then must parse
//! as an absolute http(s) URL with a host.

use thiserror::Error;
use url::{Host, Url, form_urlencoded};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WebUrlError {
    #[error("This field is required.")]
    Blank,

    #[error("Ensure this value has at most {max} characters (it has {actual}).")]
    TooLong { max: usize, actual: usize },

    #[error("Enter a valid URL.")]
    Invalid,
}

/// Normalize user-entered link text into an absolute http(s) URL string.
///
/// The length limit applies to the stored (normalized) form.
pub fn normalize_http_url(raw: &str, max_len: usize) -> Result<String, WebUrlError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(WebUrlError::Blank);
    }

    let lower = trimmed.to_ascii_lowercase();
    let candidate = if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    };

    let actual = candidate.chars().count();
    if actual > max_len {
        return Err(WebUrlError::TooLong {
            max: max_len,
            actual,
        });
    }

    let parsed = Url::parse(&candidate).map_err(|_| WebUrlError::Invalid)?;
    let host_ok = match parsed.host() {
        Some(Host::Domain(domain)) => is_public_domain(domain),
        Some(Host::Ipv4(_) | Host::Ipv6(_)) => true,
        None => false,
    };
    if !host_ok {
        return Err(WebUrlError::Invalid);
    }

    Ok(candidate)
}

/// `localhost`, or dotted labels ending in an alphabetic (or punycode) TLD.
/// `Url` has already lowercased and punycode-encoded the domain.
fn is_public_domain(domain: &str) -> bool {
    if domain == "localhost" {
        return true;
    }

    let labels: Vec<&str> = domain.strip_suffix('.').unwrap_or(domain).split('.').collect();
    let Some((tld, rest)) = labels.split_last() else {
        return false;
    };
    if rest.is_empty() {
        return false;
    }

    let label_ok = |label: &&str| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    };
    let tld_ok = tld.len() >= 2
        && (tld.chars().all(|c| c.is_ascii_alphabetic()) || tld.starts_with("xn--"));

    rest.iter().all(label_ok) && label_ok(tld) && tld_ok
}

/// `base?next=<path>` with the path form-encoded
pub fn with_next(base: &str, next: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(next.as_bytes()).collect();
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{base}{separator}next={encoded}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_is_prepended() {
        assert_eq!(
            normalize_http_url("docs.python.org/3/", 200),
            Ok("http://docs.python.org/3/".to_string())
        );
        assert_eq!(
            normalize_http_url("  https://www.djangoproject.com/ ", 200),
            Ok("https://www.djangoproject.com/".to_string())
        );
        assert_eq!(
            normalize_http_url("HTTP://Example.com", 200),
            Ok("HTTP://Example.com".to_string())
        );
    }

    #[test]
    fn test_rejections() {
        assert_eq!(normalize_http_url("   ", 200), Err(WebUrlError::Blank));
        assert_eq!(normalize_http_url("not a url", 200), Err(WebUrlError::Invalid));
        assert_eq!(normalize_http_url("http://", 200), Err(WebUrlError::Invalid));
        assert_eq!(normalize_http_url("http://.example.com", 200), Err(WebUrlError::Invalid));
        assert_eq!(
            normalize_http_url("example.com/abcdefgh", 20),
            Err(WebUrlError::TooLong {
                max: 20,
                actual: 27
            })
        );
    }

    #[test]
    fn test_host_must_be_a_domain_localhost_or_ip() {
        assert_eq!(
            normalize_http_url("ftp://example.com", 200),
            Err(WebUrlError::Invalid)
        );
        assert_eq!(normalize_http_url("intranet", 200), Err(WebUrlError::Invalid));
        assert_eq!(normalize_http_url("example.c0m", 200), Err(WebUrlError::Invalid));
        assert_eq!(normalize_http_url("-bad.example.com", 200), Err(WebUrlError::Invalid));

        assert!(normalize_http_url("localhost:8000/rango/", 200).is_ok());
        assert!(normalize_http_url("http://127.0.0.1/", 200).is_ok());
        assert!(normalize_http_url("http://[::1]:8000/", 200).is_ok());
        assert!(normalize_http_url("example.com.", 200).is_ok());
        assert!(normalize_http_url("bücher.example.de", 200).is_ok());
    }

    #[test]
    fn test_with_next() {
        assert_eq!(
            with_next("/rango/login/", "/rango/add_category/"),
            "/rango/login/?next=%2Frango%2Fadd_category%2F"
        );
        assert_eq!(with_next("/login?x=1", "/a b"), "/login?x=1&next=%2Fa+b");
    }
}
