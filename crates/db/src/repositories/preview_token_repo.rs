//! Repository for preview tokens. Only token hashes ever reach the database.

use codex_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::article_version::ArticleVersion;

/// Column list for the version rows returned by `get_version_by_preview_token`.
const VERSION_COLUMNS: &str = "id, article_id, editor_id, title, content, category_id, status, \
    moderated_by, moderated_at, moderation_reason, created_at";

/// Provides preview token issuance and resolution.
pub struct PreviewTokenRepo;

impl PreviewTokenRepo {
    /// Store a token hash for `version_id` via `create_preview_token`.
    pub async fn create(
        pool: &PgPool,
        version_id: DbId,
        token_hash: &str,
        created_by: DbId,
        expires_at: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT create_preview_token($1, $2, $3, $4)")
            .bind(version_id)
            .bind(token_hash)
            .bind(created_by)
            .bind(expires_at)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Resolve a token hash to its version. `None` when the token is unknown,
    /// expired, or the version is no longer previewable.
    pub async fn resolve(
        pool: &PgPool,
        token_hash: &str,
    ) -> Result<Option<ArticleVersion>, sqlx::Error> {
        let query =
            format!("SELECT {VERSION_COLUMNS} FROM get_version_by_preview_token($1)");
        sqlx::query_as::<_, ArticleVersion>(&query)
            .bind(token_hash)
            .fetch_optional(pool)
            .await
    }
}
