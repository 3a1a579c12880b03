//! Add Page Use Case
//!
//! Pages are only ever added to a category that already exists; the
//! category is resolved first and passed back in.

use std::sync::Arc;

use crate::domain::entities::{Category, Page};
use crate::domain::repository::{CategoryRepository, PageRepository};
use crate::domain::value_objects::{PageTitle, PageUrl};
use crate::error::RangoResult;

#[derive(Debug)]
pub struct AddPageInput {
    pub title: PageTitle,
    pub url: PageUrl,
}

pub struct AddPageUseCase<C, P>
where
    C: CategoryRepository,
    P: PageRepository,
{
    category_repo: Arc<C>,
    page_repo: Arc<P>,
}

impl<C, P> AddPageUseCase<C, P>
where
    C: CategoryRepository,
    P: PageRepository,
{
    pub fn new(category_repo: Arc<C>, page_repo: Arc<P>) -> Self {
        Self {
            category_repo,
            page_repo,
        }
    }

    /// The category pages would be added to, if any
    pub async fn find_category(&self, slug: &str) -> RangoResult<Option<Category>> {
        self.category_repo.find_by_slug(slug).await
    }

    /// Store a new page with zero views under `category`
    pub async fn execute(&self, category: &Category, input: AddPageInput) -> RangoResult<Page> {
        let page = Page::new(category.id, input.title, input.url);
        self.page_repo.create(&page).await?;

        tracing::info!(
            page_id = %page.id,
            category = %category.slug,
            "Page created"
        );

        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::CategoryName;
    use crate::infra::memory::MemoryRangoRepository;

    #[tokio::test]
    async fn test_adds_page_to_existing_category() {
        let repo = Arc::new(MemoryRangoRepository::new());
        let category = Category::new(CategoryName::new("Python").unwrap());
        CategoryRepository::create(repo.as_ref(), &category)
            .await
            .unwrap();

        let use_case = AddPageUseCase::new(repo.clone(), repo.clone());
        let found = use_case.find_category("python").await.unwrap().unwrap();
        let page = use_case
            .execute(
                &found,
                AddPageInput {
                    title: PageTitle::new("Official Python Tutorial").unwrap(),
                    url: PageUrl::new("docs.python.org/3/tutorial/").unwrap(),
                },
            )
            .await
            .unwrap();

        assert_eq!(page.views, 0);
        assert_eq!(page.category_id, category.id);
        assert_eq!(page.url.as_str(), "http://docs.python.org/3/tutorial/");
        assert_eq!(repo.page_count().await, 1);
    }

    #[tokio::test]
    async fn test_unknown_category() {
        let repo = Arc::new(MemoryRangoRepository::new());
        let use_case = AddPageUseCase::new(repo.clone(), repo);
        assert!(use_case.find_category("missing").await.unwrap().is_none());
    }
}
