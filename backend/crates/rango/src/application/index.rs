//! Index Use Case
//!
//! The most liked categories and the most viewed pages.

use std::sync::Arc;

use crate::application::config::RangoConfig;
use crate::domain::entities::{Category, Page};
use crate::domain::repository::{CategoryRepository, PageRepository};
use crate::error::RangoResult;

#[derive(Debug, Clone)]
pub struct IndexOutput {
    pub categories: Vec<Category>,
    pub pages: Vec<Page>,
}

pub struct IndexUseCase<C, P>
where
    C: CategoryRepository,
    P: PageRepository,
{
    category_repo: Arc<C>,
    page_repo: Arc<P>,
    config: Arc<RangoConfig>,
}

impl<C, P> IndexUseCase<C, P>
where
    C: CategoryRepository,
    P: PageRepository,
{
    pub fn new(category_repo: Arc<C>, page_repo: Arc<P>, config: Arc<RangoConfig>) -> Self {
        Self {
            category_repo,
            page_repo,
            config,
        }
    }

    pub async fn execute(&self) -> RangoResult<IndexOutput> {
        let limit = self.config.listing_limit;
        let categories = self.category_repo.top_by_likes(limit).await?;
        let pages = self.page_repo.top_by_views(limit).await?;

        Ok(IndexOutput { categories, pages })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{CategoryName, PageTitle, PageUrl};
    use crate::infra::memory::MemoryRangoRepository;

    async fn seed(repo: &MemoryRangoRepository) {
        for (name, likes) in [
            ("Python", 64),
            ("Django", 32),
            ("Other Frameworks", 16),
            ("Rust", 128),
            ("Go", 8),
            ("Perl", 1),
        ] {
            let mut category = Category::new(CategoryName::new(name).unwrap());
            category.likes = likes;
            CategoryRepository::create(repo, &category).await.unwrap();

            for views in [3, likes] {
                let mut page = Page::new(
                    category.id,
                    PageTitle::new(&format!("{name} {views}")).unwrap(),
                    PageUrl::new("http://example.com/").unwrap(),
                );
                page.views = views;
                PageRepository::create(repo, &page).await.unwrap();
            }
        }
    }

    #[tokio::test]
    async fn test_lists_top_five_of_each() {
        let repo = Arc::new(MemoryRangoRepository::new());
        seed(&repo).await;

        let output = IndexUseCase::new(repo.clone(), repo, Arc::new(RangoConfig::default()))
            .execute()
            .await
            .unwrap();

        let names: Vec<_> = output.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Rust", "Python", "Django", "Other Frameworks", "Go"]);

        let views: Vec<_> = output.pages.iter().map(|p| p.views).collect();
        assert_eq!(views, [128, 64, 32, 16, 8]);
    }

    #[tokio::test]
    async fn test_empty_store() {
        let repo = Arc::new(MemoryRangoRepository::new());
        let output = IndexUseCase::new(repo.clone(), repo, Arc::new(RangoConfig::default()))
            .execute()
            .await
            .unwrap();

        assert!(output.categories.is_empty());
        assert!(output.pages.is_empty());
    }
}
