//! Presentation Layer
//!
//! HTTP handlers, forms, templates and the router.

pub mod forms;
pub mod handlers;
pub mod paths;
pub mod router;
pub mod views;

pub use handlers::RangoAppState;
pub use router::{rango_router, rango_router_generic};
