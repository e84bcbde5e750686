//! Repository for the `article_versions` table.
//!
//! Creation and every status change go through database functions
//! (`submit_article`, `approve_article_version`, ...).

use codex_core::moderation::ModerationAction;
use codex_core::types::DbId;
use sqlx::PgPool;

use crate::models::article_version::{ArticleVersion, CreateArticleVersion, PendingVersion};

/// Column list for article_versions queries.
const COLUMNS: &str = "id, article_id, editor_id, title, content, category_id, status, \
    moderated_by, moderated_at, moderation_reason, created_at";

/// Column list for `get_pending_versions_for_moderation`.
const PENDING_COLUMNS: &str = "version_id, article_id, article_title, title, category_id, \
    editor_id, editor_nickname, created_at";

/// Provides version submission, reads, and moderation transitions.
pub struct ArticleVersionRepo;

impl ArticleVersionRepo {
    /// Create a pending version via `submit_article`.
    pub async fn submit(
        pool: &PgPool,
        input: &CreateArticleVersion,
    ) -> Result<ArticleVersion, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM submit_article($1, $2, $3, $4, $5)");
        sqlx::query_as::<_, ArticleVersion>(&query)
            .bind(input.article_id)
            .bind(input.editor_id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.category_id)
            .fetch_one(pool)
            .await
    }

    /// Find a version by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ArticleVersion>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM article_versions WHERE id = $1");
        sqlx::query_as::<_, ArticleVersion>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all versions of an article, newest first.
    pub async fn list_by_article(
        pool: &PgPool,
        article_id: DbId,
    ) -> Result<Vec<ArticleVersion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM article_versions
             WHERE article_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, ArticleVersion>(&query)
            .bind(article_id)
            .fetch_all(pool)
            .await
    }

    /// The moderation queue, oldest submission first.
    pub async fn list_pending(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PendingVersion>, sqlx::Error> {
        let query = format!(
            "SELECT {PENDING_COLUMNS} FROM get_pending_versions_for_moderation($1, $2)"
        );
        sqlx::query_as::<_, PendingVersion>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Invoke the transition function for `action` and return the updated row.
    ///
    /// The function raises SQLSTATE `P0002` for a missing version and `55000`
    /// when the version is not in the action's source status.
    pub async fn apply_action(
        pool: &PgPool,
        version_id: DbId,
        action: ModerationAction,
        moderator_id: DbId,
        reason: Option<&str>,
    ) -> Result<ArticleVersion, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {}($1, $2, $3)", action.rpc_name());
        sqlx::query_as::<_, ArticleVersion>(&query)
            .bind(version_id)
            .bind(moderator_id)
            .bind(reason)
            .fetch_one(pool)
            .await
    }
}
