//! User Profile Entity
//!
//! Optional extras collected at registration, one row per user.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{user_id::UserId, website::Website};

#[derive(Debug, Clone)]
pub struct UserProfile {
    pub user_id: UserId,
    pub website: Option<Website>,
    /// Picture path relative to the media root, e.g. `profile_images/x.png`
    pub picture: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn new(user_id: UserId, website: Option<Website>, picture: Option<String>) -> Self {
        Self {
            user_id,
            website,
            picture,
            created_at: Utc::now(),
        }
    }
}
