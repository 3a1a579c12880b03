//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations with no knowledge of Rango's domain:
//! - Password hashing (Argon2id) and the site password policy
//! - Signed opaque tokens (HMAC-SHA256) for session cookies
//! - Session cookie building and parsing
//! - Normalizing user-entered links

pub mod cookie;
pub mod crypto;
pub mod password;
pub mod web_url;
