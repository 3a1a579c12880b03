//! Auth Middleware
//!
//! - [`load_session`] runs on every request and records the [`Viewer`]
//! - [`require_login`] guards protected routes, sending anonymous visitors
//!   to the login page with a `next` parameter

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use platform::web_url::with_next;

use crate::application::config::AuthConfig;
use crate::application::CheckSessionUseCase;
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::presentation::viewer::Viewer;

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState<R>
where
    R: AuthSessionRepository + UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

/// Resolve the session cookie once per request.
///
/// A missing, forged or stale cookie leaves the visitor anonymous; only a
/// storage failure aborts the request.
pub async fn load_session<R>(
    State(state): State<AuthMiddlewareState<R>>,
    mut req: Request,
    next: Next,
) -> Response
where
    R: AuthSessionRepository + UserRepository + Clone + Send + Sync + 'static,
{
    let token = state.config.cookie_spec().read(req.headers());

    let viewer = match token {
        Some(token) => {
            let use_case =
                CheckSessionUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());
            match use_case.execute(&token).await {
                Ok(current) => Viewer(current),
                Err(e) => return e.into_response(),
            }
        }
        None => Viewer::anonymous(),
    };

    req.extensions_mut().insert(viewer);
    next.run(req).await
}

/// Login gate for protected routes
pub async fn require_login(
    State(config): State<Arc<AuthConfig>>,
    viewer: Viewer,
    req: Request,
    next: Next,
) -> Response {
    if viewer.is_authenticated() {
        return next.run(req).await;
    }

    let next_path = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");

    tracing::debug!(path = %next_path, "Anonymous visitor sent to login");
    Redirect::to(&with_next(&config.login_url, next_path)).into_response()
}
