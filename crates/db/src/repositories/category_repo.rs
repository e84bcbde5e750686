//! Repository for the `categories` table.

use codex_core::category::VISIBILITY_PUBLIC;
use codex_core::types::DbId;
use sqlx::PgPool;

use crate::models::category::{Category, CreateCategory, UpdateCategory};

/// Column list for categories queries.
const COLUMNS: &str = "id, name, parent_category_id, default_visibility, created_at";

/// Provides CRUD operations for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// List every category ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories ORDER BY name ASC");
        sqlx::query_as::<_, Category>(&query).fetch_all(pool).await
    }

    /// Find a category by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Create a category via `create_category`.
    pub async fn create(pool: &PgPool, input: &CreateCategory) -> Result<Category, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM create_category($1, $2, $3)");
        sqlx::query_as::<_, Category>(&query)
            .bind(input.name.trim())
            .bind(input.parent_category_id)
            .bind(input.default_visibility.as_deref().unwrap_or(VISIBILITY_PUBLIC))
            .fetch_one(pool)
            .await
    }

    /// Update a category via `update_category`. Returns `None` if it does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCategory,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM update_category($1, $2, $3, $4, $5)");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(input.parent_category_id)
            .bind(input.clear_parent)
            .bind(&input.default_visibility)
            .fetch_optional(pool)
            .await
    }

    /// Delete a category via `delete_category`. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let (deleted,): (bool,) = sqlx::query_as("SELECT delete_category($1)")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(deleted)
    }
}
