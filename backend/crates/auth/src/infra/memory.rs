//! In-Memory Repository Implementations
//!
//! Backs tests and local experiments. Mirrors the unique constraints of
//! the PostgreSQL schema.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entity::{
    auth::Auth, auth_session::AuthSession, user::User, user_profile::UserProfile,
};
use crate::domain::repository::{
    AuthRepository, AuthSessionRepository, AuthUnitOfWork, UserProfileRepository,
    UserRepository,
};
use crate::domain::value_object::{user_id::UserId, user_name::UserName};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct Tables {
    users: HashMap<UserId, User>,
    credentials: HashMap<UserId, Auth>,
    profiles: HashMap<UserId, UserProfile>,
    sessions: HashMap<Uuid, AuthSession>,
}

#[derive(Clone, Default)]
pub struct MemoryAuthRepository {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }

    pub async fn profile_count(&self) -> usize {
        self.tables.read().await.profiles.len()
    }

    pub async fn session_count(&self) -> usize {
        self.tables.read().await.sessions.len()
    }
}

impl UserRepository for MemoryAuthRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut tables = self.tables.write().await;
        let taken = tables
            .users
            .values()
            .any(|u| u.user_name.canonical() == user.user_name.canonical());
        if taken {
            return Err(AuthError::UserNameTaken);
        }
        tables.users.insert(user.user_id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.tables.read().await.users.get(user_id).cloned())
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>> {
        Ok(self
            .tables
            .read()
            .await
            .users
            .values()
            .find(|u| u.user_name.canonical() == user_name.canonical())
            .cloned())
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool> {
        Ok(UserRepository::find_by_user_name(self, user_name)
            .await?
            .is_some())
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        if let Some(stored) = self.tables.write().await.users.get_mut(&user.user_id) {
            *stored = user.clone();
        }
        Ok(())
    }
}

impl AuthRepository for MemoryAuthRepository {
    async fn create(&self, auth: &Auth) -> AuthResult<()> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&auth.user_id) {
            return Err(AuthError::Internal("credentials for unknown user".into()));
        }
        tables.credentials.insert(auth.user_id, auth.clone());
        Ok(())
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> AuthResult<Option<Auth>> {
        Ok(self.tables.read().await.credentials.get(user_id).cloned())
    }
}

impl UserProfileRepository for MemoryAuthRepository {
    async fn create(&self, profile: &UserProfile) -> AuthResult<()> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&profile.user_id) {
            return Err(AuthError::Internal("profile for unknown user".into()));
        }
        tables.profiles.insert(profile.user_id, profile.clone());
        Ok(())
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> AuthResult<Option<UserProfile>> {
        Ok(self.tables.read().await.profiles.get(user_id).cloned())
    }
}

impl AuthUnitOfWork for MemoryAuthRepository {
    /// All checks run before the first insert, under one write lock
    async fn create_account(
        &self,
        user: &User,
        auth: &Auth,
        profile: &UserProfile,
    ) -> AuthResult<()> {
        let mut tables = self.tables.write().await;
        let taken = tables
            .users
            .values()
            .any(|u| u.user_name.canonical() == user.user_name.canonical());
        if taken {
            return Err(AuthError::UserNameTaken);
        }
        if auth.user_id != user.user_id || profile.user_id != user.user_id {
            return Err(AuthError::Internal("account rows for different users".into()));
        }

        tables.users.insert(user.user_id, user.clone());
        tables.credentials.insert(user.user_id, auth.clone());
        tables.profiles.insert(user.user_id, profile.clone());
        Ok(())
    }
}

impl AuthSessionRepository for MemoryAuthRepository {
    async fn create(&self, session: &AuthSession) -> AuthResult<()> {
        self.tables
            .write()
            .await
            .sessions
            .insert(session.session_id, session.clone());
        Ok(())
    }

    async fn find_by_id(&self, session_id: Uuid) -> AuthResult<Option<AuthSession>> {
        Ok(self.tables.read().await.sessions.get(&session_id).cloned())
    }

    async fn update(&self, session: &AuthSession) -> AuthResult<()> {
        if let Some(stored) = self
            .tables
            .write()
            .await
            .sessions
            .get_mut(&session.session_id)
        {
            *stored = session.clone();
        }
        Ok(())
    }

    async fn delete(&self, session_id: Uuid) -> AuthResult<()> {
        self.tables.write().await.sessions.remove(&session_id);
        Ok(())
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let now_ms = Utc::now().timestamp_millis();
        let mut tables = self.tables.write().await;
        let before = tables.sessions.len();
        tables.sessions.retain(|_, s| s.expires_at_ms >= now_ms);
        Ok((before - tables.sessions.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_password::{RawPassword, UserPassword};

    #[tokio::test]
    async fn test_user_name_is_unique_ignoring_case() {
        let repo = MemoryAuthRepository::new();
        let first = User::new(UserName::new("leifos").unwrap(), None);
        let second = User::new(UserName::new("LEIFOS").unwrap(), None);

        UserRepository::create(&repo, &first).await.unwrap();
        let err = UserRepository::create(&repo, &second).await.unwrap_err();
        assert!(matches!(err, AuthError::UserNameTaken));
        assert_eq!(repo.user_count().await, 1);
    }

    #[tokio::test]
    async fn test_cleanup_expired() {
        let repo = MemoryAuthRepository::new();
        let user_id = UserId::new();
        let live = AuthSession::new(user_id, chrono::Duration::hours(1));
        let dead = AuthSession::new(user_id, chrono::Duration::seconds(-10));
        AuthSessionRepository::create(&repo, &live).await.unwrap();
        AuthSessionRepository::create(&repo, &dead).await.unwrap();

        assert_eq!(repo.cleanup_expired().await.unwrap(), 1);
        assert_eq!(repo.session_count().await, 1);
    }

    #[tokio::test]
    async fn test_create_account_writes_nothing_on_conflict() {
        let repo = MemoryAuthRepository::new();
        let existing = User::new(UserName::new("leifos").unwrap(), None);
        UserRepository::create(&repo, &existing).await.unwrap();

        let user = User::new(UserName::new("LeifOS").unwrap(), None);
        let raw = RawPassword::new("cupcake-lover-42".to_string()).unwrap();
        let password = UserPassword::from_raw(&raw, None).unwrap();
        let auth = Auth::new(user.user_id, password);
        let profile = UserProfile::new(user.user_id, None, None);

        let err = repo.create_account(&user, &auth, &profile).await.unwrap_err();
        assert!(matches!(err, AuthError::UserNameTaken));
        assert_eq!(repo.user_count().await, 1);
        assert_eq!(repo.profile_count().await, 0);
        assert!(
            AuthRepository::find_by_user_id(&repo, &user.user_id)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_profile_requires_user() {
        let repo = MemoryAuthRepository::new();
        let orphan = UserProfile::new(UserId::new(), None, None);
        assert!(UserProfileRepository::create(&repo, &orphan).await.is_err());
    }
}
