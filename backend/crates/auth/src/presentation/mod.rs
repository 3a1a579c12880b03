//! Presentation Layer
//!
//! Session middleware and the request's viewer.

pub mod middleware;
pub mod viewer;

pub use middleware::{AuthMiddlewareState, load_session, require_login};
pub use viewer::Viewer;
