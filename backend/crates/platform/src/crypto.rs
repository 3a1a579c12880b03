//! Cryptographic Utilities
//!
//! Signed tokens have the shape `<payload>.<base64url(HMAC-SHA256(payload))>`.
//! The payload is carried in clear; the signature only proves the server
//! issued it.

use base64::{Engine, engine::general_purpose};
use hmac::{Hmac, Mac};
use rand::{RngCore, rngs::OsRng};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Length of a signing secret in bytes
pub const SECRET_LEN: usize = 32;

/// Fresh random signing secret
pub fn random_secret() -> [u8; SECRET_LEN] {
    let mut secret = [0u8; SECRET_LEN];
    OsRng.fill_bytes(&mut secret);
    secret
}

/// Decode a standard base64 secret, rejecting anything that is not exactly
/// [`SECRET_LEN`] bytes.
pub fn decode_secret(encoded: &str) -> Result<[u8; SECRET_LEN], SecretError> {
    let bytes = general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|_| SecretError::NotBase64)?;

    bytes
        .try_into()
        .map_err(|bytes: Vec<u8>| SecretError::WrongLength(bytes.len()))
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SecretError {
    #[error("secret is not valid base64")]
    NotBase64,
    #[error("secret must be {SECRET_LEN} bytes (got {0})")]
    WrongLength(usize),
}

/// Sign `payload` and return the token string
pub fn sign_token(secret: &[u8; SECRET_LEN], payload: &str) -> String {
    let signature = mac(secret, payload).finalize().into_bytes();
    format!(
        "{}.{}",
        payload,
        general_purpose::URL_SAFE_NO_PAD.encode(signature)
    )
}

/// Verify a token produced by [`sign_token`] and return its payload.
///
/// Comparison is constant-time (delegated to `hmac`).
pub fn verify_token<'a>(secret: &[u8; SECRET_LEN], token: &'a str) -> Option<&'a str> {
    let (payload, signature_b64) = token.rsplit_once('.')?;
    if payload.is_empty() {
        return None;
    }

    let signature = general_purpose::URL_SAFE_NO_PAD
        .decode(signature_b64)
        .ok()?;

    mac(secret, payload).verify_slice(&signature).ok()?;
    Some(payload)
}

fn mac(secret: &[u8; SECRET_LEN], payload: &str) -> HmacSha256 {
    let mut mac =
        <HmacSha256 as Mac>::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(payload.as_bytes());
    mac
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_secret() {
        assert!(random_secret().iter().any(|&b| b != 0));
        assert_ne!(random_secret(), random_secret());
    }

    #[test]
    fn test_sign_and_verify() {
        let secret = [7u8; SECRET_LEN];
        let token = sign_token(&secret, "3f1c2c9e-5f4a-4f43-9c1e-6b7d2a0e9f11");
        assert_eq!(
            verify_token(&secret, &token),
            Some("3f1c2c9e-5f4a-4f43-9c1e-6b7d2a0e9f11")
        );
    }

    #[test]
    fn test_tampered_tokens_are_rejected() {
        let secret = [7u8; SECRET_LEN];
        let token = sign_token(&secret, "payload");

        let other_secret = [8u8; SECRET_LEN];
        assert_eq!(verify_token(&other_secret, &token), None);

        let (_, sig) = token.rsplit_once('.').unwrap();
        assert_eq!(verify_token(&secret, &format!("payloae.{sig}")), None);
        assert_eq!(verify_token(&secret, "payload"), None);
        assert_eq!(verify_token(&secret, "payload.!!!"), None);
        assert_eq!(verify_token(&secret, &format!(".{sig}")), None);
    }

    #[test]
    fn test_decode_secret() {
        let encoded = general_purpose::STANDARD.encode([1u8; SECRET_LEN]);
        assert_eq!(decode_secret(&encoded), Ok([1u8; SECRET_LEN]));

        let short = general_purpose::STANDARD.encode([1u8; 16]);
        assert_eq!(decode_secret(&short), Err(SecretError::WrongLength(16)));
        assert_eq!(decode_secret("%%%"), Err(SecretError::NotBase64));
    }

    #[test]
    fn test_hmac_matches_reference_vector() {
        // A zero key pads to the same block as an empty key: HMAC-SHA256("", "").
        let secret = [0u8; SECRET_LEN];
        let signature = mac(&secret, "").finalize().into_bytes();
        assert_eq!(
            hex::encode(signature),
            "b613679a0814d9ec772f95d778c35fc5ff1697c493715653c6c712144292c5ad"
        );
    }
}
