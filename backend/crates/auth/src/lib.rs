//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases and configuration
//! - `infra/` - PostgreSQL, in-memory and filesystem implementations
//! - `presentation/` - Session middleware, login gate, viewer extractor
//!
//! ## Features
//! - Registration with username, optional email, password and profile
//! - Username + password sign in, sign out
//! - Server-side sessions referenced by a signed cookie token
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, never stored or logged in clear
//! - Disabled accounts cannot sign in and their sessions stop resolving

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::CurrentUser;
pub use domain::repository::AuthStore;
pub use error::{AuthError, AuthResult};
pub use infra::{FsPictureStore, MemoryAuthRepository, PgAuthRepository};
pub use presentation::{AuthMiddlewareState, Viewer, load_session, require_login};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
