pub mod auth;
pub mod auth_session;
pub mod user;
pub mod user_profile;

pub use auth::Auth;
pub use auth_session::AuthSession;
pub use user::User;
pub use user_profile::UserProfile;
