//! Rango Backend Module
//!
//! A small directory of categories and the web pages filed under them.
//!
//! Clean Architecture structure:
//! - `domain/` - Categories, pages, slugs, repository traits
//! - `application/` - Use cases and configuration
//! - `infra/` - PostgreSQL and in-memory implementations
//! - `presentation/` - Forms, maud templates, handlers, router
//!
//! Identity (registration, login, sessions, the login gate) lives in the
//! `auth` crate; this crate wires it into the site's pages.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::RangoConfig;
pub use application::CategoryLookup;
pub use domain::repository::RangoStore;
pub use error::{RangoError, RangoResult};
pub use infra::{MemoryRangoRepository, PgRangoRepository};
pub use presentation::{RangoAppState, rango_router, rango_router_generic};
