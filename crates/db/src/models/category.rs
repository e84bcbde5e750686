//! Category models.

use codex_core::category::CategoryNode;
use codex_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub parent_category_id: Option<DbId>,
    pub default_visibility: String,
    pub created_at: Timestamp,
}

impl From<Category> for CategoryNode {
    fn from(c: Category) -> Self {
        CategoryNode::leaf(c.id, c.name, c.parent_category_id, c.default_visibility)
    }
}

/// DTO for creating a new category.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategory {
    pub name: String,
    pub parent_category_id: Option<DbId>,
    /// Defaults to `public` when omitted.
    pub default_visibility: Option<String>,
}

/// DTO for updating a category. `None` fields are left unchanged.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub parent_category_id: Option<DbId>,
    /// Move the category to the top level. Takes precedence over
    /// `parent_category_id`.
    #[serde(default)]
    pub clear_parent: bool,
    pub default_visibility: Option<String>,
}
