//! Add Category Use Case

use std::sync::Arc;

use crate::domain::entities::Category;
use crate::domain::repository::CategoryRepository;
use crate::domain::value_objects::CategoryName;
use crate::error::{RangoError, RangoResult};

pub struct AddCategoryUseCase<C>
where
    C: CategoryRepository,
{
    category_repo: Arc<C>,
}

impl<C> AddCategoryUseCase<C>
where
    C: CategoryRepository,
{
    pub fn new(category_repo: Arc<C>) -> Self {
        Self { category_repo }
    }

    /// Fails with [`RangoError::CategoryExists`] when the name, or the slug
    /// derived from it, is already taken.
    pub async fn execute(&self, name: CategoryName) -> RangoResult<Category> {
        let slug = name.slug();
        if self
            .category_repo
            .exists_by_name_or_slug(&name, &slug)
            .await?
        {
            return Err(RangoError::CategoryExists);
        }

        let category = Category::new(name);
        self.category_repo.create(&category).await?;

        tracing::info!(
            category_id = %category.id,
            slug = %category.slug,
            "Category created"
        );

        Ok(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::MemoryRangoRepository;

    #[tokio::test]
    async fn test_creates_with_slug_and_zero_counters() {
        let repo = Arc::new(MemoryRangoRepository::new());
        let category = AddCategoryUseCase::new(repo.clone())
            .execute(CategoryName::new("Other Frameworks").unwrap())
            .await
            .unwrap();

        assert_eq!(category.slug.as_str(), "other-frameworks");
        assert_eq!((category.likes, category.views), (0, 0));
        assert_eq!(repo.category_count().await, 1);
    }

    #[tokio::test]
    async fn test_rejects_duplicate_name_or_slug() {
        let repo = Arc::new(MemoryRangoRepository::new());
        let use_case = AddCategoryUseCase::new(repo.clone());
        use_case
            .execute(CategoryName::new("Python").unwrap())
            .await
            .unwrap();

        for name in ["Python", "python", "PYTHON!"] {
            let result = use_case.execute(CategoryName::new(name).unwrap()).await;
            assert!(matches!(result, Err(RangoError::CategoryExists)), "{name}");
        }
        assert_eq!(repo.category_count().await, 1);
    }
}
