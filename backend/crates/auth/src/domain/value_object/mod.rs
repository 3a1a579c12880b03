//! Value Object Module

pub mod email;
pub mod user_id;
pub mod user_name;
pub mod user_password;
pub mod user_status;
pub mod website;

pub use email::{Email, EmailError};
pub use user_id::UserId;
pub use user_name::{UserName, UserNameError};
pub use user_password::{RawPassword, UserPassword};
pub use user_status::UserStatus;
pub use website::Website;
