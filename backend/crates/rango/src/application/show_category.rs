//! Show Category Use Case

use std::sync::Arc;

use crate::domain::entities::{Category, Page};
use crate::domain::repository::{CategoryRepository, PageRepository};
use crate::error::RangoResult;

/// Outcome of looking a category up by slug.
///
/// An unknown slug is an ordinary outcome rendered as its own page state,
/// not an error.
#[derive(Debug, Clone)]
pub enum CategoryLookup {
    Found { category: Category, pages: Vec<Page> },
    NotFound,
}

pub struct ShowCategoryUseCase<C, P>
where
    C: CategoryRepository,
    P: PageRepository,
{
    category_repo: Arc<C>,
    page_repo: Arc<P>,
}

impl<C, P> ShowCategoryUseCase<C, P>
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

    pub async fn execute(&self, slug: &str) -> RangoResult<CategoryLookup> {
        let Some(category) = self.category_repo.find_by_slug(slug).await? else {
            return Ok(CategoryLookup::NotFound);
        };

        let pages = self.page_repo.find_by_category(&category.id).await?;
        Ok(CategoryLookup::Found { category, pages })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{CategoryName, PageTitle, PageUrl};
    use crate::infra::memory::MemoryRangoRepository;

    async fn category_with_pages(repo: &MemoryRangoRepository, name: &str, titles: &[&str]) {
        let category = Category::new(CategoryName::new(name).unwrap());
        CategoryRepository::create(repo, &category).await.unwrap();
        for title in titles {
            let page = Page::new(
                category.id,
                PageTitle::new(title).unwrap(),
                PageUrl::new("https://www.djangoproject.com/").unwrap(),
            );
            PageRepository::create(repo, &page).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_found_lists_only_its_pages() {
        let repo = Arc::new(MemoryRangoRepository::new());
        category_with_pages(&repo, "Python", &["Tutorial", "Docs"]).await;
        category_with_pages(&repo, "Django", &["Project"]).await;

        let lookup = ShowCategoryUseCase::new(repo.clone(), repo)
            .execute("python")
            .await
            .unwrap();

        match lookup {
            CategoryLookup::Found { category, pages } => {
                assert_eq!(category.name.as_str(), "Python");
                let titles: Vec<_> = pages.iter().map(|p| p.title.as_str()).collect();
                assert_eq!(titles, ["Tutorial", "Docs"]);
            }
            CategoryLookup::NotFound => panic!("expected the category"),
        }
    }

    #[tokio::test]
    async fn test_unknown_slug_is_not_found() {
        let repo = Arc::new(MemoryRangoRepository::new());
        let lookup = ShowCategoryUseCase::new(repo.clone(), repo)
            .execute("nope")
            .await
            .unwrap();

        assert!(matches!(lookup, CategoryLookup::NotFound));
    }
}
