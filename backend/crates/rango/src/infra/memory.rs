//! In-Memory Repository Implementations
//!
//! Backs tests and local experiments. Mirrors the unique constraints and
//! orderings of the PostgreSQL schema.

use std::cmp::Reverse;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::entities::{Category, Page};
use crate::domain::repository::{CategoryRepository, PageRepository};
use crate::domain::value_objects::{CategoryId, CategoryName, Slug};
use crate::error::{RangoError, RangoResult};

/// Rows kept in insertion order
#[derive(Default)]
struct Tables {
    categories: Vec<Category>,
    pages: Vec<Page>,
}

#[derive(Clone, Default)]
pub struct MemoryRangoRepository {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryRangoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn category_count(&self) -> usize {
        self.tables.read().await.categories.len()
    }

    pub async fn page_count(&self) -> usize {
        self.tables.read().await.pages.len()
    }

    /// Overwrite the counters of a stored category
    pub async fn set_category_counters(&self, slug: &str, views: i32, likes: i32) {
        let mut tables = self.tables.write().await;
        if let Some(category) = tables
            .categories
            .iter_mut()
            .find(|c| c.slug.as_str() == slug)
        {
            category.views = views;
            category.likes = likes;
        }
    }

    /// Overwrite the view count of every page with this title
    pub async fn set_page_views(&self, title: &str, views: i32) {
        let mut tables = self.tables.write().await;
        for page in tables
            .pages
            .iter_mut()
            .filter(|p| p.title.as_str() == title)
        {
            page.views = views;
        }
    }
}

impl CategoryRepository for MemoryRangoRepository {
    async fn create(&self, category: &Category) -> RangoResult<()> {
        let mut tables = self.tables.write().await;
        let taken = tables
            .categories
            .iter()
            .any(|c| c.name == category.name || c.slug == category.slug);
        if taken {
            return Err(RangoError::CategoryExists);
        }
        tables.categories.push(category.clone());
        Ok(())
    }

    async fn find_by_slug(&self, slug: &str) -> RangoResult<Option<Category>> {
        Ok(self
            .tables
            .read()
            .await
            .categories
            .iter()
            .find(|c| c.slug.as_str() == slug)
            .cloned())
    }

    async fn exists_by_name_or_slug(&self, name: &CategoryName, slug: &Slug) -> RangoResult<bool> {
        Ok(self
            .tables
            .read()
            .await
            .categories
            .iter()
            .any(|c| &c.name == name || &c.slug == slug))
    }

    async fn top_by_likes(&self, limit: usize) -> RangoResult<Vec<Category>> {
        let mut categories = self.tables.read().await.categories.clone();
        categories.sort_by(|a, b| {
            Reverse(a.likes)
                .cmp(&Reverse(b.likes))
                .then_with(|| a.name.as_str().cmp(b.name.as_str()))
        });
        categories.truncate(limit);
        Ok(categories)
    }
}

impl PageRepository for MemoryRangoRepository {
    async fn create(&self, page: &Page) -> RangoResult<()> {
        let mut tables = self.tables.write().await;
        if !tables.categories.iter().any(|c| c.id == page.category_id) {
            return Err(RangoError::Internal("page for unknown category".into()));
        }
        tables.pages.push(page.clone());
        Ok(())
    }

    async fn find_by_category(&self, category_id: &CategoryId) -> RangoResult<Vec<Page>> {
        Ok(self
            .tables
            .read()
            .await
            .pages
            .iter()
            .filter(|p| &p.category_id == category_id)
            .cloned()
            .collect())
    }

    async fn top_by_views(&self, limit: usize) -> RangoResult<Vec<Page>> {
        let mut pages = self.tables.read().await.pages.clone();
        pages.sort_by(|a, b| {
            Reverse(a.views)
                .cmp(&Reverse(b.views))
                .then_with(|| a.title.as_str().cmp(b.title.as_str()))
        });
        pages.truncate(limit);
        Ok(pages)
    }
}
