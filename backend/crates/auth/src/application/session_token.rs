//! Session Token
//!
//! The cookie carries `<session_id>.<signature>`; the signature keeps
//! visitors from guessing or forging session IDs.

use platform::crypto::{SECRET_LEN, sign_token, verify_token};
use uuid::Uuid;

pub fn issue(secret: &[u8; SECRET_LEN], session_id: Uuid) -> String {
    sign_token(secret, &session_id.to_string())
}

/// `None` for anything not issued by [`issue`] with the same secret
pub fn parse(secret: &[u8; SECRET_LEN], token: &str) -> Option<Uuid> {
    verify_token(secret, token)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_parse() {
        let secret = [3u8; SECRET_LEN];
        let session_id = Uuid::new_v4();
        let token = issue(&secret, session_id);

        assert!(token.starts_with(&session_id.to_string()));
        assert_eq!(parse(&secret, &token), Some(session_id));
    }

    #[test]
    fn test_rejects_forgeries() {
        let secret = [3u8; SECRET_LEN];
        let token = issue(&secret, Uuid::new_v4());

        assert_eq!(parse(&[4u8; SECRET_LEN], &token), None);
        assert_eq!(parse(&secret, &Uuid::new_v4().to_string()), None);
        assert_eq!(parse(&secret, &sign_token(&secret, "not-a-uuid")), None);
    }
}
