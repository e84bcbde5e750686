//! Article version models.
//!
//! Versions are immutable snapshots; only the moderation columns change, and
//! only through the transition functions in the database.

use codex_core::moderation::VersionStatus;
use codex_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `article_versions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ArticleVersion {
    pub id: DbId,
    pub article_id: DbId,
    pub editor_id: DbId,
    pub title: String,
    pub content: String,
    pub category_id: DbId,
    pub status: String,
    pub moderated_by: Option<DbId>,
    pub moderated_at: Option<Timestamp>,
    pub moderation_reason: Option<String>,
    pub created_at: Timestamp,
}

impl ArticleVersion {
    /// Parsed [`VersionStatus`]. Fails only if the column holds an unknown value.
    pub fn status(&self) -> Result<VersionStatus, codex_core::error::CoreError> {
        VersionStatus::parse(&self.status)
    }
}

/// DTO for `submit_article`.
#[derive(Debug, Clone)]
pub struct CreateArticleVersion {
    pub article_id: DbId,
    pub editor_id: DbId,
    pub title: String,
    pub content: String,
    pub category_id: DbId,
}

/// A row returned by `get_pending_versions_for_moderation`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PendingVersion {
    pub version_id: DbId,
    pub article_id: DbId,
    pub article_title: String,
    pub title: String,
    pub category_id: DbId,
    pub editor_id: DbId,
    pub editor_nickname: Option<String>,
    pub created_at: Timestamp,
}
