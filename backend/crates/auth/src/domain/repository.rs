//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infra layer.

use uuid::Uuid;

use crate::domain::entity::{
    auth::Auth, auth_session::AuthSession, user::User, user_profile::UserProfile,
};
use crate::domain::value_object::{user_id::UserId, user_name::UserName};
use crate::error::AuthResult;

#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()>;

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Lookup by canonical (lowercase) name
    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>>;

    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool>;

    async fn update(&self, user: &User) -> AuthResult<()>;
}

/// Auth credentials repository trait
#[trait_variant::make(AuthRepository: Send)]
pub trait LocalAuthRepository {
    async fn create(&self, auth: &Auth) -> AuthResult<()>;

    async fn find_by_user_id(&self, user_id: &UserId) -> AuthResult<Option<Auth>>;
}

#[trait_variant::make(UserProfileRepository: Send)]
pub trait LocalUserProfileRepository {
    async fn create(&self, profile: &UserProfile) -> AuthResult<()>;

    async fn find_by_user_id(&self, user_id: &UserId) -> AuthResult<Option<UserProfile>>;
}

#[trait_variant::make(AuthSessionRepository: Send)]
pub trait LocalAuthSessionRepository {
    async fn create(&self, session: &AuthSession) -> AuthResult<()>;

    async fn find_by_id(&self, session_id: Uuid) -> AuthResult<Option<AuthSession>>;

    /// Update session (e.g., last activity)
    async fn update(&self, session: &AuthSession) -> AuthResult<()>;

    async fn delete(&self, session_id: Uuid) -> AuthResult<()>;

    /// Delete expired sessions, returning how many were removed
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}

/// Writes a new account's rows together or not at all
#[trait_variant::make(AuthUnitOfWork: Send)]
pub trait LocalAuthUnitOfWork: UserRepository + AuthRepository + UserProfileRepository {
    /// Persist the user, their credentials and their profile in one transaction
    async fn create_account(
        &self,
        user: &User,
        auth: &Auth,
        profile: &UserProfile,
    ) -> AuthResult<()>;
}

/// An uploaded profile picture before it is stored
#[derive(Debug, Clone)]
pub struct PictureUpload {
    /// Name the browser sent, used only for its extension
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Where profile pictures are kept
#[trait_variant::make(PictureStore: Send)]
pub trait LocalPictureStore {
    /// Store the picture and return its path relative to the media root
    async fn save(&self, upload: PictureUpload) -> AuthResult<String>;

    /// Remove a picture previously returned by `save`
    async fn delete(&self, path: &str) -> AuthResult<()>;
}

/// Everything the identity layer persists, behind one handle
pub trait AuthStore:
    UserRepository
    + AuthRepository
    + UserProfileRepository
    + AuthSessionRepository
    + AuthUnitOfWork
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<T> AuthStore for T where
    T: UserRepository
        + AuthRepository
        + UserProfileRepository
        + AuthSessionRepository
        + AuthUnitOfWork
        + Clone
        + Send
        + Sync
        + 'static
{
}
