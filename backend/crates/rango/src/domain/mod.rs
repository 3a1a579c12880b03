//! Domain Layer
//!
//! Contains entities, value objects, repository traits and the slug service.

pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;

// Re-exports
pub use entities::{Category, Page};
pub use repository::{CategoryRepository, PageRepository, RangoStore};
