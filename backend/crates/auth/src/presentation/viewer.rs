//! The visitor behind a request, as resolved by
//! [`load_session`](super::middleware::load_session).

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::application::CurrentUser;

/// `Viewer(None)` is an anonymous visitor.
///
/// Extracting a `Viewer` never fails: routes outside the session layer
/// simply see everyone as anonymous.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Viewer(pub Option<CurrentUser>);

impl Viewer {
    pub fn anonymous() -> Self {
        Self(None)
    }

    pub fn is_authenticated(&self) -> bool {
        self.0.is_some()
    }

    pub fn user(&self) -> Option<&CurrentUser> {
        self.0.as_ref()
    }
}

impl<S> FromRequestParts<S> for Viewer
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<Viewer>().cloned().unwrap_or_default())
    }
}
