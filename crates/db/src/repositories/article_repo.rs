//! Repository for the `articles` table and the public article view.

use codex_core::types::DbId;
use sqlx::PgPool;

use crate::models::article::{Article, CreateArticle, PublishedArticle};

/// Column list for articles queries.
const COLUMNS: &str = "id, title, author_id, category_id, created_at";

/// Column list for `article_versions_public_view` queries.
const PUBLIC_COLUMNS: &str = "article_id, version_id, title, content, category_id, \
    author_id, author_nickname, created_at, approved_at";

/// Provides article row operations and published-article reads.
pub struct ArticleRepo;

impl ArticleRepo {
    /// Insert a new article row. Its first version is created separately.
    pub async fn create(pool: &PgPool, input: &CreateArticle) -> Result<Article, sqlx::Error> {
        let query = format!(
            "INSERT INTO articles (title, author_id, category_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(&input.title)
            .bind(input.author_id)
            .bind(input.category_id)
            .fetch_one(pool)
            .await
    }

    /// Find an article by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Article>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM articles WHERE id = $1");
        sqlx::query_as::<_, Article>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete an article (its versions cascade). Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List published articles, newest approval first, optionally by category.
    pub async fn list_published(
        pool: &PgPool,
        category_id: Option<DbId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PublishedArticle>, sqlx::Error> {
        let query = format!(
            "SELECT {PUBLIC_COLUMNS} FROM article_versions_public_view
             WHERE ($1::UUID IS NULL OR category_id = $1)
             ORDER BY approved_at DESC NULLS LAST, article_id
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, PublishedArticle>(&query)
            .bind(category_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// The latest approved version of one article, if any.
    pub async fn find_published(
        pool: &PgPool,
        article_id: DbId,
    ) -> Result<Option<PublishedArticle>, sqlx::Error> {
        let query =
            format!("SELECT {PUBLIC_COLUMNS} FROM article_versions_public_view WHERE article_id = $1");
        sqlx::query_as::<_, PublishedArticle>(&query)
            .bind(article_id)
            .fetch_optional(pool)
            .await
    }
}
