//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{Category, Page};
use crate::domain::repository::{CategoryRepository, PageRepository};
use crate::domain::value_objects::{
    CategoryId, CategoryName, PageId, PageTitle, PageUrl, Slug,
};
use crate::error::{RangoError, RangoResult};

/// PostgreSQL-backed category and page repository
#[derive(Clone)]
pub struct PgRangoRepository {
    pool: PgPool,
}

impl PgRangoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Two concurrent submissions of the same name can both pass the
/// existence check; the unique indexes decide.
fn category_insert_error(err: sqlx::Error) -> RangoError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => RangoError::CategoryExists,
        _ => RangoError::Database(err),
    }
}

/// Limits come from configuration and are small
fn sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

// ============================================================================
// Category Repository Implementation
// ============================================================================

impl CategoryRepository for PgRangoRepository {
    async fn create(&self, category: &Category) -> RangoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO categories (
                category_id,
                name,
                slug,
                views,
                likes,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(category.id.as_uuid())
        .bind(category.name.as_str())
        .bind(category.slug.as_str())
        .bind(category.views)
        .bind(category.likes)
        .bind(category.created_at)
        .execute(&self.pool)
        .await
        .map_err(category_insert_error)?;

        Ok(())
    }

    async fn find_by_slug(&self, slug: &str) -> RangoResult<Option<Category>> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT
                category_id,
                name,
                slug,
                views,
                likes,
                created_at
            FROM categories
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CategoryRow::into_category))
    }

    async fn exists_by_name_or_slug(&self, name: &CategoryName, slug: &Slug) -> RangoResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM categories WHERE name = $1 OR slug = $2)",
        )
        .bind(name.as_str())
        .bind(slug.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn top_by_likes(&self, limit: usize) -> RangoResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT
                category_id,
                name,
                slug,
                views,
                likes,
                created_at
            FROM categories
            ORDER BY likes DESC, name ASC
            LIMIT $1
            "#,
        )
        .bind(sql_limit(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CategoryRow::into_category).collect())
    }
}

// ============================================================================
// Page Repository Implementation
// ============================================================================

impl PageRepository for PgRangoRepository {
    async fn create(&self, page: &Page) -> RangoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO pages (
                page_id,
                category_id,
                title,
                url,
                views,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(page.id.as_uuid())
        .bind(page.category_id.as_uuid())
        .bind(page.title.as_str())
        .bind(page.url.as_str())
        .bind(page.views)
        .bind(page.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_category(&self, category_id: &CategoryId) -> RangoResult<Vec<Page>> {
        let rows = sqlx::query_as::<_, PageRow>(
            r#"
            SELECT
                page_id,
                category_id,
                title,
                url,
                views,
                created_at
            FROM pages
            WHERE category_id = $1
            ORDER BY created_at ASC, page_seq ASC
            "#,
        )
        .bind(category_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PageRow::into_page).collect())
    }

    async fn top_by_views(&self, limit: usize) -> RangoResult<Vec<Page>> {
        let rows = sqlx::query_as::<_, PageRow>(
            r#"
            SELECT
                page_id,
                category_id,
                title,
                url,
                views,
                created_at
            FROM pages
            ORDER BY views DESC, title ASC
            LIMIT $1
            "#,
        )
        .bind(sql_limit(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PageRow::into_page).collect())
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct CategoryRow {
    category_id: Uuid,
    name: String,
    slug: String,
    views: i32,
    likes: i32,
    created_at: DateTime<Utc>,
}

impl CategoryRow {
    fn into_category(self) -> Category {
        Category {
            id: CategoryId::from_uuid(self.category_id),
            name: CategoryName::from_db(self.name),
            slug: Slug::from_db(self.slug),
            views: self.views,
            likes: self.likes,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PageRow {
    page_id: Uuid,
    category_id: Uuid,
    title: String,
    url: String,
    views: i32,
    created_at: DateTime<Utc>,
}

impl PageRow {
    fn into_page(self) -> Page {
        Page {
            id: PageId::from_uuid(self.page_id),
            category_id: CategoryId::from_uuid(self.category_id),
            title: PageTitle::from_db(self.title),
            url: PageUrl::from_db(self.url),
            views: self.views,
            created_at: self.created_at,
        }
    }
}
