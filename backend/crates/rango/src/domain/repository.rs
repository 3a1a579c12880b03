//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infra layer.

use crate::domain::entities::{Category, Page};
use crate::domain::value_objects::{CategoryId, CategoryName, Slug};
use crate::error::RangoResult;

#[trait_variant::make(CategoryRepository: Send)]
pub trait LocalCategoryRepository {
    async fn create(&self, category: &Category) -> RangoResult<()>;

    /// `Ok(None)` when no category has this slug
    async fn find_by_slug(&self, slug: &str) -> RangoResult<Option<Category>>;

    /// Whether the name or the slug derived from it is already used
    async fn exists_by_name_or_slug(&self, name: &CategoryName, slug: &Slug)
    -> RangoResult<bool>;

    /// Most liked first, ties by name; at most `limit`
    async fn top_by_likes(&self, limit: usize) -> RangoResult<Vec<Category>>;
}

#[trait_variant::make(PageRepository: Send)]
pub trait LocalPageRepository {
    async fn create(&self, page: &Page) -> RangoResult<()>;

    /// Pages of one category in creation order
    async fn find_by_category(&self, category_id: &CategoryId) -> RangoResult<Vec<Page>>;

    /// Most viewed first, ties by title; at most `limit`
    async fn top_by_views(&self, limit: usize) -> RangoResult<Vec<Page>>;
}

/// Category and page storage behind one handle
pub trait RangoStore: CategoryRepository + PageRepository + Clone + Send + Sync + 'static {}

impl<T> RangoStore for T where T: CategoryRepository + PageRepository + Clone + Send + Sync + 'static {}
