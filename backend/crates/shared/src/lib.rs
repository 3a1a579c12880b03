//! Shared Kernel - Domain-crossing minimal core
//!
//! The small vocabulary every Rango crate agrees on:
//! - Unified error type and result alias
//! - Typed UUID identifiers
//! - Field-level form errors used to redisplay rejected submissions
//!
//! Nothing here knows about categories, pages or users.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod form;
pub mod id;
