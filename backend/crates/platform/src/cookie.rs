//! Session cookie handling
//!
//! Builds `Set-Cookie` values for issuing and clearing a cookie, and reads
//! a cookie back out of a request's `Cookie` header.

use axum::http::{HeaderMap, HeaderValue, header};
use std::time::Duration;

/// SameSite policy for cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Attributes shared by every cookie a site issues under one name
#[derive(Debug, Clone)]
pub struct CookieSpec {
    pub name: String,
    pub path: String,
    pub secure: bool,
    pub same_site: SameSite,
    /// Lifetime sent as `Max-Age`; `None` issues a browser-session cookie
    pub max_age: Option<Duration>,
}

impl CookieSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: "/".to_string(),
            secure: true,
            same_site: SameSite::Lax,
            max_age: None,
        }
    }

    /// `Set-Cookie` value carrying `value`. Always HttpOnly.
    pub fn issue(&self, value: &str) -> String {
        let mut parts = vec![
            format!("{}={}", self.name, value),
            "HttpOnly".to_string(),
            format!("Path={}", self.path),
        ];

        if let Some(max_age) = self.max_age {
            parts.push(format!("Max-Age={}", max_age.as_secs()));
        }

        self.push_transport_attrs(&mut parts);
        parts.join("; ")
    }

    /// `Set-Cookie` value that makes the browser drop the cookie
    pub fn clear(&self) -> String {
        let mut parts = vec![
            format!("{}=", self.name),
            "HttpOnly".to_string(),
            format!("Path={}", self.path),
            "Max-Age=0".to_string(),
            "Expires=Thu, 01 Jan 1970 00:00:00 GMT".to_string(),
        ];

        self.push_transport_attrs(&mut parts);
        parts.join("; ")
    }

    /// Read this cookie from request headers
    pub fn read(&self, headers: &HeaderMap) -> Option<String> {
        extract_cookie(headers, &self.name)
    }

    fn push_transport_attrs(&self, parts: &mut Vec<String>) {
        if self.secure {
            parts.push("Secure".to_string());
        }
        parts.push(format!("SameSite={}", self.same_site.as_str()));
    }
}

/// Extract a cookie value from headers.
///
/// Browsers may send several `Cookie` headers; all are searched.
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key == name && !value.is_empty()).then(|| value.to_string())
        })
}

/// Convert a built cookie into a header value
pub fn header_value(cookie: &str) -> HeaderValue {
    HeaderValue::from_str(cookie).unwrap_or_else(|_| HeaderValue::from_static(""))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> CookieSpec {
        CookieSpec {
            max_age: Some(Duration::from_secs(1_209_600)),
            ..CookieSpec::new("rango_session")
        }
    }

    #[test]
    fn test_issue() {
        let cookie = spec().issue("abc.def");
        assert!(cookie.starts_with("rango_session=abc.def; HttpOnly"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=1209600"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("SameSite=Lax"));
    }

    #[test]
    fn test_issue_insecure_without_max_age() {
        let spec = CookieSpec {
            secure: false,
            same_site: SameSite::Strict,
            ..CookieSpec::new("s")
        };
        let cookie = spec.issue("v");
        assert!(!cookie.contains("Secure"));
        assert!(!cookie.contains("Max-Age"));
        assert!(cookie.contains("SameSite=Strict"));
    }

    #[test]
    fn test_clear() {
        let cookie = spec().clear();
        assert!(cookie.starts_with("rango_session=;"));
        assert!(cookie.contains("Max-Age=0"));
        assert!(cookie.contains("Expires=Thu, 01 Jan 1970 00:00:00 GMT"));
    }

    #[test]
    fn test_read() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("csrftoken=x; theme=dark"));
        headers.append(header::COOKIE, HeaderValue::from_static("rango_session=tok.sig"));

        assert_eq!(spec().read(&headers), Some("tok.sig".to_string()));
        assert_eq!(extract_cookie(&headers, "theme"), Some("dark".to_string()));
        assert_eq!(extract_cookie(&headers, "missing"), None);
    }

    #[test]
    fn test_read_ignores_cleared_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("rango_session="));
        assert_eq!(spec().read(&headers), None);
    }
}
