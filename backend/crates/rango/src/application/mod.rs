//! Application Layer
//!
//! Use cases and application services.

pub mod add_category;
pub mod add_page;
pub mod config;
pub mod index;
pub mod show_category;

// Re-exports
pub use add_category::AddCategoryUseCase;
pub use add_page::{AddPageInput, AddPageUseCase};
pub use config::RangoConfig;
pub use index::{IndexOutput, IndexUseCase};
pub use show_category::{CategoryLookup, ShowCategoryUseCase};
