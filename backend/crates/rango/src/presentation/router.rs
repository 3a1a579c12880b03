//! Rango Router
//!
//! Public pages, the login-gated pages, and the session layer that
//! resolves the visitor for all of them.

use std::sync::Arc;

use auth::{AuthConfig, AuthMiddlewareState, AuthStore, PgAuthRepository, load_session, require_login};
use axum::{Router, middleware, routing::get};
use sqlx::PgPool;

use crate::application::config::RangoConfig;
use crate::domain::repository::RangoStore;
use crate::infra::postgres::PgRangoRepository;
use crate::presentation::handlers::{self, RangoAppState};
use crate::presentation::paths;

/// Create the Rango router backed by PostgreSQL
pub fn rango_router(pool: PgPool, config: RangoConfig, auth_config: AuthConfig) -> Router {
    let state = RangoAppState::new(
        PgRangoRepository::new(pool.clone()),
        PgAuthRepository::new(pool),
        config,
        auth_config,
    );
    rango_router_generic(state)
}

/// Create a Rango router for any repository implementations
pub fn rango_router_generic<R, A>(state: RangoAppState<R, A>) -> Router
where
    R: RangoStore,
    A: AuthStore,
{
    let session = AuthMiddlewareState {
        repo: state.auth_repo.clone(),
        config: state.auth_config.clone(),
    };
    let gate: Arc<AuthConfig> = state.auth_config.clone();

    let protected = Router::new()
        .route(
            paths::ADD_CATEGORY,
            get(handlers::add_category_form).post(handlers::add_category::<R, A>),
        )
        .route(
            paths::ADD_PAGE_ROUTE,
            get(handlers::add_page_form::<R, A>).post(handlers::add_page::<R, A>),
        )
        .route(paths::RESTRICTED, get(handlers::restricted))
        .route(paths::LOGOUT, get(handlers::logout::<R, A>))
        .route_layer(middleware::from_fn_with_state(gate, require_login));

    Router::new()
        .route(paths::INDEX, get(handlers::index::<R, A>))
        .route(paths::ABOUT, get(handlers::about))
        .route(paths::CATEGORY_ROUTE, get(handlers::show_category::<R, A>))
        .route(
            paths::REGISTER,
            get(handlers::register_form).post(handlers::register::<R, A>),
        )
        .route(
            paths::LOGIN,
            get(handlers::login_form).post(handlers::login::<R, A>),
        )
        .merge(protected)
        .with_state(state)
        .layer(middleware::from_fn_with_state(session, load_session::<A>))
}
