//! Domain Entities
//!
//! Categories group pages; pages are links to outside resources.

use chrono::{DateTime, Utc};

use crate::domain::value_objects::{
    CategoryId, CategoryName, PageId, PageTitle, PageUrl, Slug,
};

#[derive(Debug, Clone)]
pub struct Category {
    pub id: CategoryId,
    /// Unique
    pub name: CategoryName,
    /// Derived from the name at creation; unique lookup key
    pub slug: Slug,
    pub views: i32,
    pub likes: i32,
    pub created_at: DateTime<Utc>,
}

impl Category {
    pub fn new(name: CategoryName) -> Self {
        let slug = name.slug();
        Self {
            id: CategoryId::new(),
            name,
            slug,
            views: 0,
            likes: 0,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Page {
    pub id: PageId,
    pub category_id: CategoryId,
    pub title: PageTitle,
    pub url: PageUrl,
    pub views: i32,
    pub created_at: DateTime<Utc>,
}

impl Page {
    /// New pages always start with zero views
    pub fn new(category_id: CategoryId, title: PageTitle, url: PageUrl) -> Self {
        Self {
            id: PageId::new(),
            category_id,
            title,
            url,
            views: 0,
            created_at: Utc::now(),
        }
    }
}
