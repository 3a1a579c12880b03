//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::cookie::CookieSpec;
use platform::crypto::{SECRET_LEN, random_secret};

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Two weeks, the usual lifetime of a site login
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(14 * 24 * 3600);

pub const DEFAULT_LOGIN_URL: &str = "/rango/login/";

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub session_cookie_name: String,
    /// Session secret key for HMAC signing
    pub session_secret: [u8; SECRET_LEN],
    pub session_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    pub cookie_same_site: SameSite,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Where the login gate sends anonymous visitors
    pub login_url: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "rango_session".to_string(),
            session_secret: [0u8; SECRET_LEN],
            session_ttl: DEFAULT_SESSION_TTL,
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            password_pepper: None,
            login_url: DEFAULT_LOGIN_URL.to_string(),
        }
    }
}

impl AuthConfig {
    /// Create config with a random session secret
    pub fn with_random_secret() -> Self {
        Self {
            session_secret: random_secret(),
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    /// Session TTL for `chrono` arithmetic
    pub fn session_ttl_chrono(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.session_ttl).unwrap_or(chrono::Duration::MAX)
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Attributes of the session cookie
    pub fn cookie_spec(&self) -> CookieSpec {
        CookieSpec {
            secure: self.cookie_secure,
            same_site: self.cookie_same_site,
            max_age: Some(self.session_ttl),
            ..CookieSpec::new(self.session_cookie_name.clone())
        }
    }
}
