//! Article models.
//!
//! An article row only anchors ownership; its displayed content always comes
//! from a version (see [`super::article_version`]).

use codex_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `articles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Article {
    pub id: DbId,
    pub title: String,
    pub author_id: DbId,
    pub category_id: DbId,
    pub created_at: Timestamp,
}

/// DTO for inserting a new article row.
#[derive(Debug, Clone)]
pub struct CreateArticle {
    pub title: String,
    pub author_id: DbId,
    pub category_id: DbId,
}

/// A row from `article_versions_public_view`: the latest approved version of
/// an article.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PublishedArticle {
    pub article_id: DbId,
    pub version_id: DbId,
    pub title: String,
    pub content: String,
    pub category_id: DbId,
    pub author_id: DbId,
    pub author_nickname: Option<String>,
    pub created_at: Timestamp,
    pub approved_at: Option<Timestamp>,
}
