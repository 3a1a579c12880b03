//! Server Configuration
//!
//! Read once at startup from the environment (and `.env`).

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use auth::AuthConfig;
use platform::crypto::decode_secret;
use rango::RangoConfig;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub struct ServerConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_upload_bytes: usize,
    pub rango: RangoConfig,
    pub auth: AuthConfig,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let bind_addr = env::var("RANGO_BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("RANGO_BIND_ADDR is not a socket address")?;

        let max_upload_bytes = match env::var("RANGO_MAX_UPLOAD_BYTES") {
            Ok(raw) => raw
                .parse()
                .context("RANGO_MAX_UPLOAD_BYTES is not a number")?,
            Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
        };

        let rango = RangoConfig {
            media_root: env::var("RANGO_MEDIA_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| RangoConfig::default().media_root),
            ..RangoConfig::default()
        };

        Ok(Self {
            database_url,
            bind_addr,
            max_upload_bytes,
            rango,
            auth: auth_config_from_env()?,
        })
    }
}

/// Release builds need a fixed session secret; debug builds make one up,
/// which logs everybody out on restart.
fn auth_config_from_env() -> anyhow::Result<AuthConfig> {
    let mut config = match env::var("RANGO_SESSION_SECRET") {
        Ok(encoded) => AuthConfig {
            session_secret: decode_secret(&encoded).context("RANGO_SESSION_SECRET")?,
            ..AuthConfig::default()
        },
        Err(_) if cfg!(debug_assertions) => {
            tracing::warn!("RANGO_SESSION_SECRET not set, using a random secret");
            AuthConfig::with_random_secret()
        }
        Err(_) => anyhow::bail!("RANGO_SESSION_SECRET must be set in production"),
    };

    config.cookie_secure = match env::var("RANGO_COOKIE_SECURE") {
        Ok(raw) => parse_flag(&raw).context("RANGO_COOKIE_SECURE must be true or false")?,
        Err(_) => !cfg!(debug_assertions),
    };

    Ok(config)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
