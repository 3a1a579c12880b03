//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{auth::Auth, auth_session::AuthSession, user::User, user_profile::UserProfile};
pub use repository::{
    AuthRepository, AuthSessionRepository, AuthStore, AuthUnitOfWork, PictureStore,
    PictureUpload, UserProfileRepository, UserRepository,
};
